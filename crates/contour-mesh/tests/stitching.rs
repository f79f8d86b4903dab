use contour_chunk::{Chunk, ChunkCoord};
use contour_geom::{Rect, Vec2};
use contour_mesh::{ChunkNeighbors, MeshBuild, SeamLedger, triangulate_chunk, triangulate_quad};
use proptest::prelude::*;

type Tri = [[u32; 2]; 3];

fn tri_bits(t: [Vec2; 3]) -> Tri {
    [t[0].to_bits(), t[1].to_bits(), t[2].to_bits()]
}

fn chunk_from_states(coord: ChunkCoord, res: usize, spacing: f32, state: impl Fn(usize, usize) -> bool) -> Chunk {
    let mut c = Chunk::new(coord, res, res as f32 * spacing);
    for y in 0..res {
        for x in 0..res {
            c.set_state(x, y, state(x, y));
        }
    }
    c
}

#[test]
fn seam_column_matches_unpartitioned_grid() {
    let column = [true, false, true];
    let a = chunk_from_states(ChunkCoord::new(0, 0), 3, 1.0, |x, y| x == 2 && column[y]);
    let b = chunk_from_states(ChunkCoord::new(1, 0), 3, 1.0, |x, y| x == 0 && column[y]);
    let whole = chunk_from_states(ChunkCoord::new(0, 0), 6, 1.0, |x, y| {
        y < 3 && (x == 2 || x == 3) && column[y]
    });

    let mut mesh_a = MeshBuild::default();
    triangulate_chunk(&a, ChunkNeighbors::new(Some(&b), None, None), &mut mesh_a);
    let seam: Vec<Tri> = mesh_a
        .triangle_positions()
        .filter(|t| t.iter().any(|p| p.x > 2.5))
        .map(tri_bits)
        .collect();

    let mut expected = MeshBuild::default();
    for y in 0..2 {
        triangulate_quad(
            &mut expected,
            whole.cell(2, y),
            whole.cell(3, y),
            whole.cell(2, y + 1),
            whole.cell(3, y + 1),
        );
    }
    let expected: Vec<Tri> = expected.triangle_positions().map(tri_bits).collect();

    // [1,0,1] against [1,0,1]: code 3 (bottom half) then code 12 (top half).
    assert_eq!(seam.len(), 4);
    assert_eq!(seam, expected);
}

#[test]
fn missing_corner_quad_leaves_a_hole() {
    let full = |coord| chunk_from_states(coord, 3, 1.0, |_, _| true);
    let a = full(ChunkCoord::new(0, 0));
    let x = full(ChunkCoord::new(1, 0));
    let y = full(ChunkCoord::new(0, 1));
    let xy = full(ChunkCoord::new(1, 1));

    let perimeter = Rect::new(Vec2::splat(0.5), Vec2::splat(5.5));
    let build = |with_xy: bool| {
        let mut ledger = SeamLedger::new(perimeter, 1.0);
        let mut out = MeshBuild::default();
        let corner = if with_xy { Some(&xy) } else { None };
        triangulate_chunk(&a, ChunkNeighbors::new(Some(&x), Some(&y), corner), &mut out);
        ledger.add_mesh(&out, Vec2::ZERO);
        triangulate_chunk(&x, ChunkNeighbors::new(None, Some(&xy), None), &mut out);
        ledger.add_mesh(&out, Vec2::new(3.0, 0.0));
        triangulate_chunk(&y, ChunkNeighbors::new(Some(&xy), None, None), &mut out);
        ledger.add_mesh(&out, Vec2::new(0.0, 3.0));
        triangulate_chunk(&xy, ChunkNeighbors::empty(), &mut out);
        ledger.add_mesh(&out, Vec2::new(3.0, 3.0));
        ledger.report()
    };

    assert!(build(true).is_watertight());
    let holed = build(false);
    assert_eq!(holed.open_edges.len(), 4);
}

fn four_chunks_vs_whole(res: usize, states: &[bool]) -> (Vec<Tri>, Vec<Tri>, bool) {
    let n = res * 2;
    let at = |gx: usize, gy: usize| states[gy * n + gx];
    let make = |cx: usize, cy: usize| {
        chunk_from_states(ChunkCoord::new(cx as i32, cy as i32), res, 1.0, |x, y| {
            at(cx * res + x, cy * res + y)
        })
    };
    let a = make(0, 0);
    let x = make(1, 0);
    let y = make(0, 1);
    let xy = make(1, 1);
    let size = res as f32;

    let mut ledger = SeamLedger::new(
        Rect::new(Vec2::splat(0.5), Vec2::splat(n as f32 - 0.5)),
        1.0,
    );
    let mut parts = Vec::new();
    let mut out = MeshBuild::default();
    let jobs = [
        (&a, ChunkNeighbors::new(Some(&x), Some(&y), Some(&xy)), Vec2::ZERO),
        (&x, ChunkNeighbors::new(None, Some(&xy), None), Vec2::new(size, 0.0)),
        (&y, ChunkNeighbors::new(Some(&xy), None, None), Vec2::new(0.0, size)),
        (&xy, ChunkNeighbors::empty(), Vec2::new(size, size)),
    ];
    for (chunk, nbrs, origin) in jobs {
        triangulate_chunk(chunk, nbrs, &mut out);
        ledger.add_mesh(&out, origin);
        parts.extend(
            out.triangle_positions()
                .map(|t| tri_bits([t[0] + origin, t[1] + origin, t[2] + origin])),
        );
    }

    let whole = chunk_from_states(ChunkCoord::new(0, 0), n, 1.0, at);
    let mut whole_mesh = MeshBuild::default();
    triangulate_chunk(&whole, ChunkNeighbors::empty(), &mut whole_mesh);
    let mut expected: Vec<Tri> = whole_mesh.triangle_positions().map(tri_bits).collect();

    parts.sort();
    expected.sort();
    (parts, expected, ledger.report().is_watertight())
}

proptest! {
    // Four stitched chunks produce exactly the triangles of one unpartitioned
    // grid with the same states, and the union has no holes or overlaps.
    #[test]
    fn stitched_chunks_equal_whole_grid(
        res in 1usize..=5,
        states in prop::collection::vec(any::<bool>(), 100),
    ) {
        let (parts, expected, watertight) = four_chunks_vs_whole(res, &states);
        prop_assert_eq!(parts, expected);
        prop_assert!(watertight);
    }
}
