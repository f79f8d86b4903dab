//! Stencils: shape predicates that rewrite a rectangle of cell states.
#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StencilKind {
    #[default]
    Square,
    Circle,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Fill,
    Erase,
}

impl FillMode {
    /// Cell state written by a stencil in this mode.
    #[inline]
    pub fn value(self) -> bool {
        matches!(self, FillMode::Fill)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    what: &'static str,
    got: String,
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.what, self.got)
    }
}

impl std::error::Error for ParseNameError {}

impl FromStr for StencilKind {
    type Err = ParseNameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(StencilKind::Square),
            "circle" => Ok(StencilKind::Circle),
            _ => Err(ParseNameError {
                what: "stencil",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for FillMode {
    type Err = ParseNameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fill" | "filled" => Ok(FillMode::Fill),
            "erase" | "empty" => Ok(FillMode::Erase),
            _ => Err(ParseNameError {
                what: "fill mode",
                got: s.to_string(),
            }),
        }
    }
}

/// Inclusive grid-space rectangle a stencil may touch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StencilBounds {
    pub x_start: i32,
    pub x_end: i32,
    pub y_start: i32,
    pub y_end: i32,
}

impl StencilBounds {
    /// Clip to `[0, x_max] x [0, y_max]`. `None` when nothing is left.
    pub fn clip(self, x_max: i32, y_max: i32) -> Option<StencilBounds> {
        let clipped = StencilBounds {
            x_start: self.x_start.max(0),
            x_end: self.x_end.min(x_max),
            y_start: self.y_start.max(0),
            y_end: self.y_end.min(y_max),
        };
        if clipped.x_start > clipped.x_end || clipped.y_start > clipped.y_end {
            None
        } else {
            Some(clipped)
        }
    }
}

/// A brush: shape, fill value, radius and a grid-space center.
///
/// Callers iterate the (clipped) `bounds()` and ask `apply` for the new state of
/// each cell. A square writes every cell it is asked about; a circle leaves
/// the corners outside its radius untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stencil {
    kind: StencilKind,
    fill: FillMode,
    radius: u32,
    center_x: i32,
    center_y: i32,
}

impl Stencil {
    pub fn new(kind: StencilKind, fill: FillMode, radius: u32) -> Self {
        Self {
            kind,
            fill,
            radius,
            center_x: 0,
            center_y: 0,
        }
    }

    #[inline]
    pub fn kind(&self) -> StencilKind {
        self.kind
    }

    #[inline]
    pub fn fill(&self) -> FillMode {
        self.fill
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    #[inline]
    pub fn set_center(&mut self, x: i32, y: i32) {
        self.center_x = x;
        self.center_y = y;
    }

    #[inline]
    pub fn centered_at(mut self, x: i32, y: i32) -> Self {
        self.set_center(x, y);
        self
    }

    pub fn bounds(&self) -> StencilBounds {
        let r = self.radius_i32();
        StencilBounds {
            x_start: self.center_x.saturating_sub(r),
            x_end: self.center_x.saturating_add(r),
            y_start: self.center_y.saturating_sub(r),
            y_end: self.center_y.saturating_add(r),
        }
    }

    /// New state for cell `(x, y)`; only meaningful inside `bounds()`.
    pub fn apply(&self, x: i32, y: i32, current: bool) -> bool {
        match self.kind {
            StencilKind::Square => self.fill.value(),
            StencilKind::Circle => {
                let dx = i64::from(x) - i64::from(self.center_x);
                let dy = i64::from(y) - i64::from(self.center_y);
                let r = i64::from(self.radius);
                if dx * dx + dy * dy <= r * r {
                    self.fill.value()
                } else {
                    current
                }
            }
        }
    }

    #[inline]
    fn radius_i32(&self) -> i32 {
        i32::try_from(self.radius).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn footprint(stencil: &Stencil) -> Vec<(i32, i32)> {
        let b = stencil.bounds();
        let mut out = Vec::new();
        for y in b.y_start..=b.y_end {
            for x in b.x_start..=b.x_end {
                // An empty cell that becomes filled was touched by the stencil.
                if stencil.apply(x, y, false) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn bounds_are_centered() {
        let s = Stencil::new(StencilKind::Square, FillMode::Fill, 2).centered_at(5, -1);
        assert_eq!(
            s.bounds(),
            StencilBounds {
                x_start: 3,
                x_end: 7,
                y_start: -3,
                y_end: 1
            }
        );
    }

    #[test]
    fn clip_drops_outside_rectangles() {
        let b = Stencil::new(StencilKind::Square, FillMode::Fill, 1)
            .centered_at(-3, 2)
            .bounds();
        assert_eq!(b.clip(7, 7), None);
        let b = Stencil::new(StencilKind::Square, FillMode::Fill, 1)
            .centered_at(0, 7)
            .bounds();
        assert_eq!(
            b.clip(7, 7),
            Some(StencilBounds {
                x_start: 0,
                x_end: 1,
                y_start: 6,
                y_end: 7
            })
        );
    }

    #[test]
    fn radius_zero_touches_only_center() {
        for kind in [StencilKind::Square, StencilKind::Circle] {
            let s = Stencil::new(kind, FillMode::Fill, 0).centered_at(4, 4);
            assert_eq!(footprint(&s), vec![(4, 4)], "{kind:?}");
        }
    }

    #[test]
    fn circle_radius_one_is_a_plus() {
        let s = Stencil::new(StencilKind::Circle, FillMode::Fill, 1).centered_at(0, 0);
        assert_eq!(footprint(&s), vec![(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn erase_square_ignores_current_state() {
        let s = Stencil::new(StencilKind::Square, FillMode::Erase, 1).centered_at(0, 0);
        assert!(!s.apply(1, 1, true));
        assert!(!s.apply(0, 0, false));
    }

    #[test]
    fn circle_outside_radius_keeps_current_state() {
        let s = Stencil::new(StencilKind::Circle, FillMode::Erase, 2).centered_at(0, 0);
        assert!(s.apply(2, 2, true));
        assert!(!s.apply(2, 2, false));
        assert!(!s.apply(1, 1, true));
    }

    #[test]
    fn names_parse_and_deserialize() {
        assert_eq!("Circle".parse::<StencilKind>(), Ok(StencilKind::Circle));
        assert_eq!("erase".parse::<FillMode>(), Ok(FillMode::Erase));
        assert!("hexagon".parse::<StencilKind>().is_err());

        #[derive(Deserialize)]
        struct Brush {
            stencil: StencilKind,
            fill: FillMode,
        }
        let b: Brush = toml::from_str("stencil = \"circle\"\nfill = \"erase\"").unwrap();
        assert_eq!(b.stencil, StencilKind::Circle);
        assert_eq!(b.fill, FillMode::Erase);
    }

    proptest! {
        // Circle footprint is exactly the cells within squared distance r^2,
        // and a strict subset of the square's footprint once r >= 1.
        #[test]
        fn circle_is_disc_subset_of_square(r in 0u32..=6, cx in -20i32..=20, cy in -20i32..=20) {
            let sq = Stencil::new(StencilKind::Square, FillMode::Fill, r).centered_at(cx, cy);
            let ci = Stencil::new(StencilKind::Circle, FillMode::Fill, r).centered_at(cx, cy);
            let sq_cells = footprint(&sq);
            let ci_cells = footprint(&ci);
            for &(x, y) in &ci_cells {
                prop_assert!(sq_cells.contains(&(x, y)));
                let (dx, dy) = (x - cx, y - cy);
                prop_assert!(dx * dx + dy * dy <= (r * r) as i32);
            }
            let expected = sq_cells
                .iter()
                .filter(|&&(x, y)| (x - cx).pow(2) + (y - cy).pow(2) <= (r * r) as i32)
                .count();
            prop_assert_eq!(ci_cells.len(), expected);
            if r >= 1 {
                prop_assert!(ci_cells.len() < sq_cells.len());
            } else {
                prop_assert_eq!(ci_cells.len(), sq_cells.len());
            }
        }

        // Applying the same stencil twice gives the same states as applying it once.
        #[test]
        fn apply_is_idempotent(r in 0u32..=4, kind_circle in any::<bool>(), erase in any::<bool>(), states in prop::collection::vec(any::<bool>(), 81)) {
            let kind = if kind_circle { StencilKind::Circle } else { StencilKind::Square };
            let fill = if erase { FillMode::Erase } else { FillMode::Fill };
            let s = Stencil::new(kind, fill, r).centered_at(4, 4);
            let b = s.bounds().clip(8, 8).unwrap();
            let run = |mut grid: Vec<bool>| {
                for y in b.y_start..=b.y_end {
                    for x in b.x_start..=b.x_end {
                        let i = (y * 9 + x) as usize;
                        grid[i] = s.apply(x, y, grid[i]);
                    }
                }
                grid
            };
            let once = run(states);
            let twice = run(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
