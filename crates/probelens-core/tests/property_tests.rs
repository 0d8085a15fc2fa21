use probelens_core::catalog::ResidualVariable;
use probelens_core::density;
use probelens_core::gradient::Rgb;
use probelens_core::grid::GridSelectionController;
use probelens_core::range::RangeClipController;
use proptest::prelude::*;
use std::collections::HashMap;

// --- STRATEGIES ---

#[derive(Debug, Clone)]
enum RangeOp {
    Down(f32),
    Move(f32),
    Up,
    Cancel,
    SetMin(f32),
    SetMax(f32),
}

fn arb_range_op() -> impl Strategy<Value = RangeOp> {
    prop_oneof![
        (-2.0..3.0f32).prop_map(RangeOp::Down),
        (-2.0..3.0f32).prop_map(RangeOp::Move),
        Just(RangeOp::Up),
        Just(RangeOp::Cancel),
        (-2.0..3.0f32).prop_map(RangeOp::SetMin),
        (-2.0..3.0f32).prop_map(RangeOp::SetMax),
    ]
}

const KINDS: [&str; 4] = ["attn_out", "attn_block_out", "mlp_out", "mlp_block_out"];

fn full_catalog(layers: usize) -> ResidualVariable {
    let mut directions = HashMap::new();
    for layer in 0..layers {
        for kind in KINDS {
            directions.insert(format!("layers.{}.{}", layer, kind), vec![0.0]);
        }
    }
    ResidualVariable {
        name: "prop_var".to_string(),
        num_directions: directions.len(),
        dim: 1,
        directions,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn clip_invariant_survives_any_gesture(
        ops in proptest::collection::vec(arb_range_op(), 0..64)
    ) {
        let mut controller = RangeClipController::default();
        for op in ops {
            match op {
                RangeOp::Down(f) => { controller.pointer_down(f); }
                RangeOp::Move(f) => { controller.pointer_move(f); }
                RangeOp::Up => controller.pointer_up(),
                RangeOp::Cancel => controller.pointer_cancel(),
                RangeOp::SetMin(v) => { controller.set_min(v); }
                RangeOp::SetMax(v) => { controller.set_max(v); }
            }
            let range = controller.range();
            prop_assert!(range.min <= range.max);
            prop_assert!((0.0..=1.0).contains(&range.min));
            prop_assert!((0.0..=1.0).contains(&range.max));
        }
    }

    #[test]
    fn densities_never_negative(
        scores in proptest::collection::vec(any::<f32>(), 0..48),
        resolution in 1usize..200
    ) {
        let curve = density::estimate(&scores, resolution, 0.02);
        prop_assert_eq!(curve.points.len(), resolution + 1);
        for point in &curve.points {
            prop_assert!(point.density >= 0.0);
            prop_assert!(point.density.is_finite());
        }
    }

    #[test]
    fn lerp_stays_within_channel_bounds(
        lr in any::<u8>(), lg in any::<u8>(), lb in any::<u8>(),
        hr in any::<u8>(), hg in any::<u8>(), hb in any::<u8>(),
        t in -1.0..2.0f32
    ) {
        let low = Rgb::new(lr, lg, lb);
        let high = Rgb::new(hr, hg, hb);
        let out = Rgb::lerp(low, high, t);

        prop_assert!(out.r >= low.r.min(high.r) && out.r <= low.r.max(high.r));
        prop_assert!(out.g >= low.g.min(high.g) && out.g <= low.g.max(high.g));
        prop_assert!(out.b >= low.b.min(high.b) && out.b <= low.b.max(high.b));
    }

    #[test]
    fn drag_selects_exactly_the_rectangle(
        layers in 1usize..6,
        a_row in 0usize..8, a_col in 0usize..4,
        b_row in 0usize..8, b_col in 0usize..4
    ) {
        let a_row = a_row % layers;
        let b_row = b_row % layers;

        let mut grid = GridSelectionController::from_catalog(&full_catalog(layers));
        grid.pointer_down(a_row, a_col);
        grid.pointer_move(b_row, b_col);
        grid.pointer_up();

        let (r0, r1) = (a_row.min(b_row), a_row.max(b_row));
        let (c0, c1) = (a_col.min(b_col), a_col.max(b_col));
        for row in 0..layers {
            for col in 0..4 {
                let key = format!("layers.{}.{}", row, KINDS[col]);
                let inside = row >= r0 && row <= r1 && col >= c0 && col <= c1;
                prop_assert_eq!(grid.is_selected(&key), inside);
            }
        }
    }
}
