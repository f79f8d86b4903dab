//! CPU marching-squares mesher: case table, chunk stitching and seam checks.
#![forbid(unsafe_code)]

pub mod cases;
mod chunk;
mod mesh_build;
mod neighbors;
pub mod validate;

pub use cases::{configuration, triangulate_quad};
pub use chunk::triangulate_chunk;
pub use mesh_build::MeshBuild;
pub use neighbors::ChunkNeighbors;
pub use validate::{SeamLedger, SeamReport, validate_mesh};
