//! Chunked marching-squares map: layout, neighbor wiring and edit dispatch.
#![forbid(unsafe_code)]

mod config;
mod error;
mod map;
mod range;

pub use config::{MapConfig, load_config_from_path};
pub use error::MapError;
pub use map::Map;
pub use range::{ChunkRange, EditReport};
