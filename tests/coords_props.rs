//! Property tests for coordinate folding and dirty-rect bookkeeping.

use proptest::prelude::*;
use sandfall_engine::{ChunkDims, IntRect};

fn dims() -> impl Strategy<Value = ChunkDims> {
    (1..=128i32, 1..=128i32, 1..=8i32).prop_map(|(w, h, s)| ChunkDims::new(w, h, s))
}

proptest! {
    #[test]
    fn world_to_chunk_local_round_trips(dims in dims(), x in -100_000..100_000i32, y in -100_000..100_000i32) {
        let chunk = dims.grid_to_chunk(x, y);
        let local = dims.grid_to_chunk_local(x, y);

        prop_assert!(local.x >= 0 && local.x < dims.width);
        prop_assert!(local.y >= 0 && local.y < dims.height);

        let back = dims.local_to_grid(chunk, local);
        prop_assert_eq!((back.x, back.y), (x, y));
    }

    #[test]
    fn pixel_to_grid_floors(dims in dims(), x in -1_000..1_000i32, y in -1_000..1_000i32, fx in 0.0f32..0.99, fy in 0.0f32..0.99) {
        let s = dims.cell_size as f32;
        let px = x as f32 * s + fx * s;
        let py = y as f32 * s + fy * s;
        let cell = dims.pos_to_grid(px, py);
        prop_assert_eq!((cell.x, cell.y), (x, y));
    }

    #[test]
    fn pixel_chunk_agrees_with_cell_chunk(dims in dims(), x in -10_000..10_000i32, y in -10_000..10_000i32) {
        let s = dims.cell_size as f32;
        // cell centre keeps the float conversion away from chunk edges
        let px = (x as f32 + 0.5) * s;
        let py = (y as f32 + 0.5) * s;
        prop_assert_eq!(dims.world_to_chunk(px, py), dims.grid_to_chunk(x, y));
    }

    #[test]
    fn rect_include_covers_every_point(points in prop::collection::vec((0..64i32, 0..64i32), 1..40)) {
        let mut rect = IntRect::empty(64, 64);
        for &(x, y) in &points {
            rect.include(x, y);
        }
        prop_assert!(!rect.is_empty());
        for &(x, y) in &points {
            prop_assert!(rect.min_x <= x && x <= rect.max_x);
            prop_assert!(rect.min_y <= y && y <= rect.max_y);
        }
        // tight: every edge touches some point
        prop_assert!(points.iter().any(|&(x, _)| x == rect.min_x));
        prop_assert!(points.iter().any(|&(x, _)| x == rect.max_x));
        prop_assert!(points.iter().any(|&(_, y)| y == rect.min_y));
        prop_assert!(points.iter().any(|&(_, y)| y == rect.max_y));
    }

    #[test]
    fn rect_union_is_order_independent(a in prop::collection::vec((0..64i32, 0..64i32), 0..10),
                                       b in prop::collection::vec((0..64i32, 0..64i32), 0..10)) {
        let fold = |pts: &[(i32, i32)]| {
            let mut r = IntRect::empty(64, 64);
            for &(x, y) in pts {
                r.include(x, y);
            }
            r
        };
        let (ra, rb) = (fold(&a), fold(&b));
        let all: Vec<_> = a.iter().chain(b.iter()).copied().collect();
        prop_assert_eq!(ra.union(&rb), rb.union(&ra));
        prop_assert_eq!(ra.union(&rb), fold(&all));
    }
}
