//! Property tests for the active-section spy and the scroll animator.
//!
//! The spy must be a deterministic, non-decreasing step function of the
//! scroll offset for any section layout, and anchor scrolling must settle
//! on its clamped target for any duration.

use proptest::prelude::*;

use spark_scroll::engine::{self, arrays, registry};
use spark_scroll::state::{scroll, viewport};
use spark_scroll::types::Easing;

const NAV: f32 = 80.0;

/// Build a page from section gaps, returning tops in section order.
fn build_page(gaps: &[f32]) -> Vec<f32> {
    registry::reset_registry();
    let mut tops = Vec::with_capacity(gaps.len());
    let mut top = 0.0f32;
    for (order, gap) in gaps.iter().enumerate() {
        let id = format!("s{order}");
        let index = engine::register(&id, &id, order as u32).unwrap();
        arrays::set_geometry(index, top, *gap);
        tops.push(top);
        top += gap;
    }
    tops
}

fn position_of(index: usize) -> usize {
    registry::ordered_indices()
        .iter()
        .position(|&i| i == index)
        .unwrap()
}

proptest! {
    #[test]
    fn spy_is_non_decreasing_step_function(
        gaps in prop::collection::vec(100.0f32..1500.0, 2..8),
        offsets in prop::collection::vec(0.0f32..12000.0, 2..20),
    ) {
        build_page(&gaps);

        let mut offsets = offsets;
        offsets.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut prev_position = 0usize;
        for offset in offsets {
            let active = spark_scroll::state::spy::active_section_at(offset, NAV)
                .expect("measured page always has an active section");
            let position = position_of(active);
            prop_assert!(
                position >= prev_position,
                "active section moved backwards at offset {offset}"
            );
            prev_position = position;
        }
    }

    #[test]
    fn spy_is_deterministic(
        gaps in prop::collection::vec(100.0f32..1500.0, 2..8),
        offset in 0.0f32..12000.0,
    ) {
        build_page(&gaps);

        let first = spark_scroll::state::spy::active_section_at(offset, NAV);
        let second = spark_scroll::state::spy::active_section_at(offset, NAV);
        prop_assert_eq!(first, second);
        prop_assert!(first.is_some());
    }

    #[test]
    fn smooth_scroll_settles_on_clamped_target(
        gaps in prop::collection::vec(200.0f32..1500.0, 2..8),
        target in 0usize..8,
        duration in 1.0f64..2000.0,
    ) {
        let tops = build_page(&gaps);
        let target = target % gaps.len();
        let document: f32 = gaps.iter().sum();

        viewport::set_viewport(900.0, document);
        scroll::reset_scroll_state();

        let id = format!("s{target}");
        scroll::smooth_scroll_to(&id, NAV, duration, Easing::EaseInOutCubic, 0.0);

        let mut now = 0.0;
        while scroll::tick_scroll(now) {
            now += 16.0;
            prop_assert!(now < duration + 1000.0, "animation failed to settle");
        }

        let expected = (tops[target] - NAV).clamp(0.0, viewport::max_scroll());
        prop_assert!((scroll::offset_y() - expected).abs() < scroll::SETTLE_EPSILON);
    }
}
