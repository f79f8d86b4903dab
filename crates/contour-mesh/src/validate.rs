//! Seam checks for stitched chunk meshes.
//!
//! Every polygon side that runs along a line through cell centers is a quad
//! side, and the quad on the other side must emit the same segment. So in a
//! correctly stitched mesh each such edge is seen exactly twice, except on the
//! outer perimeter of the whole grid. Contour edges join edge midpoints and
//! never lie on a center line, so they are skipped.
//!
//! All mesh vertices sit on the half-spacing lattice anchored at the first cell
//! center: even lattice steps are center lines, odd steps are midpoint lines.
//! Vertices are keyed by lattice step so chunk origins that do not add up
//! exactly in `f32` still match.

use contour_geom::{Rect, Vec2};
use hashbrown::HashMap;

use crate::mesh_build::MeshBuild;

type LatticePoint = [i32; 2];

#[derive(Hash, Eq, PartialEq, Clone, Copy)]
struct EdgeKey([i32; 4]);

fn make_edge_key(a: LatticePoint, b: LatticePoint) -> EdgeKey {
    if a < b {
        EdgeKey([a[0], a[1], b[0], b[1]])
    } else {
        EdgeKey([b[0], b[1], a[0], a[1]])
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeamReport {
    /// Interior quad sides emitted only once: a hole in the surface.
    pub open_edges: Vec<(Vec2, Vec2)>,
    /// Edges emitted more than twice: duplicated geometry.
    pub overlapping_edges: Vec<(Vec2, Vec2, u32)>,
    pub edges_checked: usize,
}

impl SeamReport {
    #[inline]
    pub fn is_watertight(&self) -> bool {
        self.open_edges.is_empty() && self.overlapping_edges.is_empty()
    }
}

/// Accumulates triangle edges from several chunk meshes in a shared frame.
pub struct SeamLedger {
    /// Centers of the first and last cells of the whole grid.
    perimeter: Rect,
    half_spacing: f32,
    /// Lattice step of the last center line on each axis.
    last_step: LatticePoint,
    edges: HashMap<EdgeKey, (Vec2, Vec2, u32)>,
}

impl SeamLedger {
    pub fn new(perimeter: Rect, spacing: f32) -> Self {
        let half_spacing = spacing * 0.5;
        let span = perimeter.size();
        Self {
            perimeter,
            half_spacing,
            last_step: [
                (span.x / half_spacing).round() as i32,
                (span.y / half_spacing).round() as i32,
            ],
            edges: HashMap::new(),
        }
    }

    #[inline]
    fn lattice(&self, v: Vec2) -> LatticePoint {
        let d = v - self.perimeter.min;
        [
            (d.x / self.half_spacing).round() as i32,
            (d.y / self.half_spacing).round() as i32,
        ]
    }

    /// Add every triangle edge of `mesh`, shifted by the chunk's `origin`.
    pub fn add_mesh(&mut self, mesh: &MeshBuild, origin: Vec2) {
        for [p, q, r] in mesh.triangle_positions() {
            let (p, q, r) = (p + origin, q + origin, r + origin);
            for (a, b) in [(p, q), (q, r), (r, p)] {
                let key = make_edge_key(self.lattice(a), self.lattice(b));
                self.edges
                    .entry(key)
                    .and_modify(|e| e.2 += 1)
                    .or_insert((a, b, 1));
            }
        }
    }

    pub fn report(&self) -> SeamReport {
        let mut report = SeamReport {
            edges_checked: self.edges.len(),
            ..SeamReport::default()
        };
        for (key, &(a, b, count)) in &self.edges {
            if count > 2 {
                report.overlapping_edges.push((a, b, count));
            } else if count == 1 && self.is_interior_grid_edge(key) {
                report.open_edges.push((a, b));
            }
        }
        if !report.is_watertight() {
            log::warn!(
                target: "mesh",
                "seam check: {} open, {} overlapping of {} edges",
                report.open_edges.len(),
                report.overlapping_edges.len(),
                report.edges_checked
            );
        }
        report
    }

    fn is_interior_grid_edge(&self, key: &EdgeKey) -> bool {
        let [ax, ay, bx, by] = key.0;
        let interior_center_line =
            |step: i32, last: i32| step % 2 == 0 && step > 0 && step < last;
        (ax == bx && interior_center_line(ax, self.last_step[0]))
            || (ay == by && interior_center_line(ay, self.last_step[1]))
    }
}

/// Check a single unpartitioned mesh whose first cell center is at `perimeter.min`.
pub fn validate_mesh(mesh: &MeshBuild, perimeter: Rect, spacing: f32) -> SeamReport {
    let mut ledger = SeamLedger::new(perimeter, spacing);
    ledger.add_mesh(mesh, Vec2::ZERO);
    ledger.report()
}
