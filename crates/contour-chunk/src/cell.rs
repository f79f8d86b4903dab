use contour_geom::Vec2;

/// One grid sample: a state plus the three points the mesher needs.
///
/// `x_edge` and `y_edge` sit halfway to the +x and +y neighbor centers, so the
/// quad to the right and the quad above read the exact same midpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub state: bool,
    pub center: Vec2,
    pub x_edge: Vec2,
    pub y_edge: Vec2,
}

impl Cell {
    pub fn new(x: usize, y: usize, spacing: f32) -> Self {
        let center = Vec2::new((x as f32 + 0.5) * spacing, (y as f32 + 0.5) * spacing);
        let half = spacing * 0.5;
        Self {
            state: false,
            center,
            x_edge: center.translated(half, 0.0),
            y_edge: center.translated(0.0, half),
        }
    }

    /// Copy shifted into another chunk's frame; used for ghost cells.
    #[inline]
    pub fn translated(self, dx: f32, dy: f32) -> Cell {
        Cell {
            state: self.state,
            center: self.center.translated(dx, dy),
            x_edge: self.x_edge.translated(dx, dy),
            y_edge: self.y_edge.translated(dx, dy),
        }
    }
}
