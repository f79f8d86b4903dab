use contour_chunk::{Chunk, ChunkCoord, ChunkLinks};
use contour_edit::{FillMode, Stencil, StencilKind};
use contour_geom::{Rect, Vec2};
use contour_mesh::{ChunkNeighbors, MeshBuild, SeamLedger, SeamReport, triangulate_chunk};
use rayon::prelude::*;

use crate::config::MapConfig;
use crate::error::MapError;
use crate::range::{ChunkRange, EditReport};

/// A square grid of chunks with their meshes.
///
/// Chunk `(x, y)` lives at index `y * chunk_resolution + x` and is placed at
/// `(x, y) * chunk_size - half_size`, so the whole map is centered on the
/// origin. Meshes are stored parallel to the chunks and are in chunk-local
/// coordinates; add `chunk_origin(i)` to place them.
pub struct Map {
    config: MapConfig,
    chunk_size: f32,
    spacing: f32,
    half_size: f32,
    chunks: Vec<Chunk>,
    meshes: Vec<MeshBuild>,
}

impl Map {
    pub fn new(config: &MapConfig) -> Result<Self, MapError> {
        config.validate()?;
        let n = config.chunk_resolution;
        let chunk_size = config.chunk_size();
        let mut chunks = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let mut chunk =
                    Chunk::new(ChunkCoord::new(x as i32, y as i32), config.cell_resolution, chunk_size);
                chunk.links = Self::links_for(n, x, y);
                chunks.push(chunk);
            }
        }
        let mut map = Map {
            config: *config,
            chunk_size,
            spacing: config.spacing(),
            half_size: config.size * 0.5,
            chunks,
            meshes: vec![MeshBuild::default(); n * n],
        };
        map.assert_links();
        map.triangulate_all();
        log::info!(
            target: "map",
            "map ready: {}x{} chunks of {}x{} cells, size={} spacing={}",
            n,
            n,
            config.cell_resolution,
            config.cell_resolution,
            config.size,
            map.spacing
        );
        Ok(map)
    }

    fn links_for(n: usize, x: usize, y: usize) -> ChunkLinks {
        let i = y * n + x;
        let has_x = x + 1 < n;
        let has_y = y + 1 < n;
        ChunkLinks {
            x: has_x.then_some(i + 1),
            y: has_y.then_some(i + n),
            xy: (has_x && has_y).then_some(i + n + 1),
        }
    }

    /// Neighbor links must point at the chunk one step right, up and up-right.
    fn assert_links(&self) {
        for chunk in &self.chunks {
            let expect = [
                (chunk.links.x, chunk.coord.offset(1, 0)),
                (chunk.links.y, chunk.coord.offset(0, 1)),
                (chunk.links.xy, chunk.coord.offset(1, 1)),
            ];
            for (link, coord) in expect {
                match link {
                    Some(i) => assert_eq!(
                        self.chunks[i].coord, coord,
                        "chunk {:?} linked to wrong neighbor",
                        chunk.coord
                    ),
                    None => assert!(
                        self.index_of(coord).is_none(),
                        "chunk {:?} missing link to {:?}",
                        chunk.coord,
                        coord
                    ),
                }
            }
        }
    }

    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[inline]
    pub fn chunk_resolution(&self) -> usize {
        self.config.chunk_resolution
    }

    #[inline]
    pub fn cell_resolution(&self) -> usize {
        self.config.cell_resolution
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.config.total_cells_per_side()
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    #[inline]
    pub fn chunk(&self, i: usize) -> &Chunk {
        &self.chunks[i]
    }

    #[inline]
    pub fn chunk_index(&self, x: usize, y: usize) -> usize {
        y * self.config.chunk_resolution + x
    }

    pub fn index_of(&self, coord: ChunkCoord) -> Option<usize> {
        let n = self.config.chunk_resolution as i32;
        if coord.cx < 0 || coord.cy < 0 || coord.cx >= n || coord.cy >= n {
            return None;
        }
        Some(self.chunk_index(coord.cx as usize, coord.cy as usize))
    }

    pub fn chunk_at(&self, x: usize, y: usize) -> Option<&Chunk> {
        let n = self.config.chunk_resolution;
        (x < n && y < n).then(|| &self.chunks[self.chunk_index(x, y)])
    }

    #[inline]
    pub fn mesh(&self, i: usize) -> &MeshBuild {
        &self.meshes[i]
    }

    #[inline]
    pub fn meshes(&self) -> &[MeshBuild] {
        &self.meshes
    }

    pub fn chunk_origin(&self, i: usize) -> Vec2 {
        let coord = self.chunks[i].coord;
        Vec2::new(
            coord.cx as f32 * self.chunk_size - self.half_size,
            coord.cy as f32 * self.chunk_size - self.half_size,
        )
    }

    pub fn neighbors(&self, i: usize) -> ChunkNeighbors<'_> {
        ChunkNeighbors::from_links(&self.chunks, &self.chunks[i])
    }

    /// Per-cell states of chunk `i`, row-major, for debug coloring.
    pub fn cell_states(&self, i: usize) -> Vec<bool> {
        self.chunks[i].states()
    }

    /// State of a cell by whole-map grid coordinate.
    pub fn state_at(&self, gx: i32, gy: i32) -> Option<bool> {
        let n = self.total_cells() as i32;
        if gx < 0 || gy < 0 || gx >= n || gy >= n {
            return None;
        }
        let res = self.config.cell_resolution;
        let (gx, gy) = (gx as usize, gy as usize);
        let chunk = &self.chunks[self.chunk_index(gx / res, gy / res)];
        Some(chunk.state(gx % res, gy % res))
    }

    pub fn filled_count(&self) -> usize {
        self.chunks.iter().map(Chunk::filled_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(MeshBuild::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(MeshBuild::triangle_count).sum()
    }

    /// Map-space position of a grid cell's center.
    pub fn cell_center(&self, gx: i32, gy: i32) -> Vec2 {
        Vec2::new(
            (gx as f32 + 0.5) * self.spacing - self.half_size,
            (gy as f32 + 0.5) * self.spacing - self.half_size,
        )
    }

    /// Grid cell containing a map-space point. May lie outside the grid.
    pub fn resolve_edit(&self, point: Vec2) -> (i32, i32) {
        (
            ((point.x + self.half_size) / self.spacing).floor() as i32,
            ((point.y + self.half_size) / self.spacing).floor() as i32,
        )
    }

    /// Chunks to visit for a stencil of `radius` centered on grid cell `center`.
    ///
    /// The range starts one cell before the clipped stencil so the chunk to the
    /// left (or below) is rebuilt when its seam quads read a changed column
    /// (or row). `None` when the stencil misses the grid entirely.
    pub fn affected_chunks(&self, center: (i32, i32), radius: u32) -> Option<ChunkRange> {
        let last_cell = self.total_cells() as i32 - 1;
        let bounds = Stencil::new(StencilKind::Square, FillMode::Fill, radius)
            .centered_at(center.0, center.1)
            .bounds()
            .clip(last_cell, last_cell)?;
        let res = self.config.cell_resolution as i32;
        let last_chunk = self.config.chunk_resolution - 1;
        Some(ChunkRange {
            x_start: (bounds.x_start - 1).div_euclid(res).max(0) as usize,
            x_end: ((bounds.x_end / res) as usize).min(last_chunk),
            y_start: (bounds.y_start - 1).div_euclid(res).max(0) as usize,
            y_end: ((bounds.y_end / res) as usize).min(last_chunk),
        })
    }

    /// Edit at a map-space point (the input resolver's coordinate).
    pub fn edit(&mut self, point: Vec2, fill: FillMode, radius: u32, kind: StencilKind) -> EditReport {
        if !point.x.is_finite() || !point.y.is_finite() {
            log::debug!(target: "edit", "ignoring non-finite edit point {:?}", point);
            return EditReport::default();
        }
        let (cx, cy) = self.resolve_edit(point);
        self.edit_cell(cx, cy, fill, radius, kind)
    }

    /// Edit centered on a whole-map grid cell.
    pub fn edit_cell(&mut self, gx: i32, gy: i32, fill: FillMode, radius: u32, kind: StencilKind) -> EditReport {
        let stencil = Stencil::new(kind, fill, radius).centered_at(gx, gy);
        self.apply_stencil_global(stencil)
    }

    /// Stamp `stencil` (center in whole-map grid coordinates) into every
    /// affected chunk, then rebuild them. All states are written before any
    /// chunk is triangulated so seams read post-edit neighbors.
    pub fn apply_stencil_global(&mut self, stencil: Stencil) -> EditReport {
        let center = stencil.center();
        let Some(range) = self.affected_chunks(center, stencil.radius()) else {
            log::debug!(target: "edit", "edit at {:?} r={} misses the grid", center, stencil.radius());
            return EditReport::untouched(center);
        };

        let res = self.config.cell_resolution as i32;
        let mut visited = Vec::with_capacity(range.chunk_count());
        let mut cells_changed = 0;
        for (x, y) in range.iter() {
            let i = self.chunk_index(x, y);
            let local = stencil.centered_at(center.0 - x as i32 * res, center.1 - y as i32 * res);
            cells_changed += self.chunks[i].stamp(&local);
            visited.push(i);
        }

        // Nothing changed: every cached mesh is still valid.
        let chunks_rebuilt = if cells_changed > 0 {
            self.rebuild(&visited);
            visited.len()
        } else {
            0
        };

        log::debug!(
            target: "edit",
            "edit at {:?} r={} {:?}/{:?}: chunks x {}..={} y {}..={} changed={} rebuilt={}",
            center,
            stencil.radius(),
            stencil.kind(),
            stencil.fill(),
            range.x_start,
            range.x_end,
            range.y_start,
            range.y_end,
            cells_changed,
            chunks_rebuilt
        );

        EditReport {
            center,
            chunks_visited: visited.len(),
            cells_changed,
            chunks_rebuilt,
        }
    }

    /// Stamp `stencil` (center in chunk-local grid coordinates) into chunk `i`
    /// only, then rebuild it and every chunk that reads it as a ghost.
    /// Returns the number of changed cells.
    pub fn apply_stencil(&mut self, i: usize, stencil: &Stencil) -> usize {
        let changed = self.chunks[i].stamp(stencil);
        if changed > 0 {
            let mut dirty = self.ghost_readers(i);
            dirty.push(i);
            self.rebuild(&dirty);
        }
        changed
    }

    /// Chunks whose seam quads borrow cells from chunk `i`.
    fn ghost_readers(&self, i: usize) -> Vec<usize> {
        let target = Some(i);
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.links.x == target || c.links.y == target || c.links.xy == target)
            .map(|(j, _)| j)
            .collect()
    }

    pub fn triangulate_all(&mut self) {
        let all: Vec<usize> = (0..self.chunks.len()).collect();
        self.rebuild(&all);
    }

    fn rebuild(&mut self, indices: &[usize]) {
        let mut jobs: Vec<(usize, MeshBuild)> = indices
            .iter()
            .map(|&i| (i, std::mem::take(&mut self.meshes[i])))
            .collect();
        let chunks = &self.chunks;
        jobs.par_iter_mut().for_each(|(i, mesh)| {
            let chunk = &chunks[*i];
            triangulate_chunk(chunk, ChunkNeighbors::from_links(chunks, chunk), mesh);
        });
        for (i, mesh) in jobs {
            self.meshes[i] = mesh;
        }
    }

    /// Centers of the first and last cells of the whole grid, in map space.
    pub fn perimeter(&self) -> Rect {
        let last = self.total_cells() as i32 - 1;
        Rect::new(self.cell_center(0, 0), self.cell_center(last, last))
    }

    /// Check that all chunk meshes together form one surface without holes
    /// or duplicated geometry along quad sides.
    pub fn validate_seams(&self) -> SeamReport {
        let mut ledger = SeamLedger::new(self.perimeter(), self.spacing);
        for (i, mesh) in self.meshes.iter().enumerate() {
            ledger.add_mesh(mesh, self.chunk_origin(i));
        }
        ledger.report()
    }
}
