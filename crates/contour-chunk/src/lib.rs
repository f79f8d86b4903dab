//! Chunk cell storage and stencil application.
#![forbid(unsafe_code)]

mod cell;
mod coord;

pub use cell::Cell;
pub use coord::{ChunkCoord, ChunkLinks};

use contour_edit::Stencil;

#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub links: ChunkLinks,
    resolution: usize,
    size: f32,
    spacing: f32,
    cells: Vec<Cell>,
}

impl Chunk {
    /// `resolution` cells per side spread over `size` physical units.
    pub fn new(coord: ChunkCoord, resolution: usize, size: f32) -> Self {
        let spacing = size / resolution as f32;
        let mut cells = Vec::with_capacity(resolution * resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                cells.push(Cell::new(x, y, spacing));
            }
        }
        Chunk {
            coord,
            links: ChunkLinks::none(),
            resolution,
            size,
            spacing,
            cells,
        }
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.resolution + x
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn state(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).state
    }

    #[inline]
    pub fn set_state(&mut self, x: usize, y: usize, state: bool) {
        let i = self.idx(x, y);
        self.cells[i].state = state;
    }

    /// Row-major cell states, bottom row first.
    pub fn states(&self) -> Vec<bool> {
        self.cells.iter().map(|c| c.state).collect()
    }

    #[inline]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.state).count()
    }

    /// Rewrite the cells under `stencil` (center in this chunk's local grid
    /// coordinates). Returns how many cells changed state.
    pub fn stamp(&mut self, stencil: &Stencil) -> usize {
        if self.resolution == 0 {
            return 0;
        }
        let max = self.resolution as i32 - 1;
        let Some(b) = stencil.bounds().clip(max, max) else {
            return 0;
        };
        let mut changed = 0;
        for y in b.y_start..=b.y_end {
            let mut i = self.idx(b.x_start as usize, y as usize);
            for x in b.x_start..=b.x_end {
                let cell = &mut self.cells[i];
                let next = stencil.apply(x, y, cell.state);
                if next != cell.state {
                    cell.state = next;
                    changed += 1;
                }
                i += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_edit::{FillMode, StencilKind};
    use contour_geom::Vec2;

    #[test]
    fn cell_geometry_follows_spacing() {
        let c = Cell::new(2, 1, 0.5);
        assert_eq!(c.center, Vec2::new(1.25, 0.75));
        assert_eq!(c.x_edge, Vec2::new(1.5, 0.75));
        assert_eq!(c.y_edge, Vec2::new(1.25, 1.0));
        assert!(!c.state);
    }

    #[test]
    fn translated_cell_keeps_state_and_shape() {
        let mut c = Cell::new(0, 3, 1.0);
        c.state = true;
        let g = c.translated(8.0, 0.0);
        assert!(g.state);
        assert_eq!(g.center, Vec2::new(8.5, 3.5));
        assert_eq!(g.x_edge - g.center, c.x_edge - c.center);
        assert_eq!(g.y_edge - g.center, c.y_edge - c.center);
        let gxy = c.translated(8.0, 8.0);
        assert_eq!(gxy.y_edge, Vec2::new(8.5, 12.0));
    }

    #[test]
    fn stamp_clips_to_chunk() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), 4, 4.0);
        let s = Stencil::new(StencilKind::Square, FillMode::Fill, 1).centered_at(0, 0);
        assert_eq!(chunk.stamp(&s), 4);
        assert!(chunk.state(0, 0) && chunk.state(1, 0) && chunk.state(0, 1) && chunk.state(1, 1));
        assert!(!chunk.state(2, 0));
        // Second pass changes nothing.
        assert_eq!(chunk.stamp(&s), 0);
    }

    #[test]
    fn stamp_outside_is_noop() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), 4, 4.0);
        let s = Stencil::new(StencilKind::Square, FillMode::Fill, 2).centered_at(-3, 1);
        assert_eq!(chunk.stamp(&s), 0);
        let s = s.centered_at(1, 7);
        assert_eq!(chunk.stamp(&s), 0);
        assert_eq!(chunk.filled_count(), 0);
    }

    #[test]
    fn circle_stamp_skips_corners() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), 8, 8.0);
        let s = Stencil::new(StencilKind::Circle, FillMode::Fill, 2).centered_at(4, 4);
        // dx^2 + dy^2 <= 4 keeps the center, the 8 ring cells and the 4 axis tips.
        assert_eq!(chunk.stamp(&s), 13);
        assert!(!chunk.state(2, 2));
        assert!(chunk.state(4, 2));
        assert!(!chunk.state(3, 2));
    }
}
