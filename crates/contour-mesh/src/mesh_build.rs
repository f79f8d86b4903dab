use contour_geom::Vec2;

/// Vertex and index buffers for one chunk.
///
/// Every polygon gets its own vertices; indices are absolute into `pos` and
/// are never renumbered once written.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<Vec2>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across edits.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.idx.clear();
    }

    /// Pre-reserve room for about `n_quads` full quads.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * 4);
        self.idx.reserve(n_quads * 6);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.idx.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Triangle corner positions, resolved through the index buffer.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.triangles().map(|[a, b, c]| {
            [
                self.pos[a as usize],
                self.pos[b as usize],
                self.pos[c as usize],
            ]
        })
    }

    /// Appends a convex polygon as a fan around its first vertex.
    pub fn add_fan(&mut self, verts: &[Vec2]) {
        if verts.len() < 3 {
            return;
        }
        let base = self.pos.len() as u32;
        self.pos.extend_from_slice(verts);
        for i in 1..verts.len() as u32 - 1 {
            self.idx.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    #[inline]
    pub fn add_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.add_fan(&[a, b, c]);
    }

    #[inline]
    pub fn add_quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2) {
        self.add_fan(&[a, b, c, d]);
    }

    #[inline]
    pub fn add_pentagon(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, e: Vec2) {
        self.add_fan(&[a, b, c, d, e]);
    }
}
