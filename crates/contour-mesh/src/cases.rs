//! Marching-squares case table.
//!
//! Corners of a quad: `a` bottom-left, `b` bottom-right, `c` top-left,
//! `d` top-right. The configuration code packs their states as
//! `a | b << 1 | c << 2 | d << 3`.

use contour_chunk::Cell;

use crate::mesh_build::MeshBuild;

pub const CASE_COUNT: usize = 16;

#[inline]
pub fn configuration(a: &Cell, b: &Cell, c: &Cell, d: &Cell) -> u8 {
    (a.state as u8) | (b.state as u8) << 1 | (c.state as u8) << 2 | (d.state as u8) << 3
}

/// Emit the filled part of one quad into `out`.
///
/// The saddle codes 6 and 9 are split into two corner triangles; the filled
/// corners are never bridged, so single-cell diagonal streaks stay disconnected.
pub fn triangulate_quad(out: &mut MeshBuild, a: &Cell, b: &Cell, c: &Cell, d: &Cell) {
    match configuration(a, b, c, d) {
        0 => {}
        1 => out.add_triangle(a.center, a.y_edge, a.x_edge),
        2 => out.add_triangle(b.center, a.x_edge, b.y_edge),
        4 => out.add_triangle(c.center, c.x_edge, a.y_edge),
        8 => out.add_triangle(d.center, b.y_edge, c.x_edge),
        3 => out.add_quad(a.center, a.y_edge, b.y_edge, b.center),
        5 => out.add_quad(a.center, c.center, c.x_edge, a.x_edge),
        10 => out.add_quad(a.x_edge, c.x_edge, d.center, b.center),
        12 => out.add_quad(a.y_edge, c.center, d.center, b.y_edge),
        15 => out.add_quad(a.center, c.center, d.center, b.center),
        7 => out.add_pentagon(a.center, c.center, c.x_edge, b.y_edge, b.center),
        11 => out.add_pentagon(b.center, a.center, a.y_edge, c.x_edge, d.center),
        13 => out.add_pentagon(c.center, d.center, b.y_edge, a.x_edge, a.center),
        14 => out.add_pentagon(d.center, b.center, a.x_edge, a.y_edge, c.center),
        6 => {
            out.add_triangle(b.center, a.x_edge, b.y_edge);
            out.add_triangle(c.center, c.x_edge, a.y_edge);
        }
        9 => {
            out.add_triangle(a.center, a.y_edge, a.x_edge);
            out.add_triangle(d.center, b.y_edge, c.x_edge);
        }
        code => unreachable!("configuration code {code} out of range"),
    }
}
