use contour_chunk::Chunk;

use crate::cases::triangulate_quad;
use crate::mesh_build::MeshBuild;
use crate::neighbors::ChunkNeighbors;

/// Rebuild `out` for `chunk`.
///
/// Interior quads come from the chunk's own cells. The last column, the row
/// above and the top-right corner are closed with ghost copies of the x, y and
/// xy neighbors' boundary cells, shifted by one chunk size into this chunk's
/// frame. Missing neighbors leave that seam open (outer edge of the map).
pub fn triangulate_chunk(chunk: &Chunk, neighbors: ChunkNeighbors<'_>, out: &mut MeshBuild) {
    out.clear_keep_capacity();
    let res = chunk.resolution();
    if res == 0 {
        return;
    }
    let size = chunk.size();
    let last = res - 1;
    out.reserve_quads(res * res);

    for y in 0..last {
        for x in 0..last {
            triangulate_quad(
                out,
                chunk.cell(x, y),
                chunk.cell(x + 1, y),
                chunk.cell(x, y + 1),
                chunk.cell(x + 1, y + 1),
            );
        }
        if let Some(xn) = neighbors.x {
            let b = xn.cell(0, y).translated(size, 0.0);
            let d = xn.cell(0, y + 1).translated(size, 0.0);
            triangulate_quad(out, chunk.cell(last, y), &b, chunk.cell(last, y + 1), &d);
        }
    }

    if let Some(yn) = neighbors.y {
        for x in 0..last {
            let c = yn.cell(x, 0).translated(0.0, size);
            let d = yn.cell(x + 1, 0).translated(0.0, size);
            triangulate_quad(out, chunk.cell(x, last), chunk.cell(x + 1, last), &c, &d);
        }
        if let (Some(xn), Some(xyn)) = (neighbors.x, neighbors.xy) {
            let b = xn.cell(0, last).translated(size, 0.0);
            let c = yn.cell(last, 0).translated(0.0, size);
            let d = xyn.cell(0, 0).translated(size, size);
            triangulate_quad(out, chunk.cell(last, last), &b, &c, &d);
        }
    }

    log::trace!(
        target: "mesh",
        "triangulated chunk ({}, {}) verts={} tris={}",
        chunk.coord.cx,
        chunk.coord.cy,
        out.vertex_count(),
        out.triangle_count()
    );
}
