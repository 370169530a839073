//! Viewport Reveal Tracker - boundary-crossing detection.
//!
//! Per section, an intersection test against a viewport band: a section
//! counts as in view once the configured fraction of the viewport height
//! has crossed its top edge. The test is evaluated from current geometry
//! every tick, so the result is identical whether the section entered
//! scrolling up or scrolling down.
//!
//! The tracker is explicitly non-sticky: leaving the band resets the
//! section to hidden immediately, and re-entering replays the entrance
//! animation. Each boundary crossing produces exactly one phase flip,
//! independent of scroll velocity.

use crate::config::CoordinatorConfig;
use crate::engine::{arrays, registry};
use crate::state::animate;
use crate::types::{Px, RevealPhase};

/// Band intersection test for one section.
///
/// The band spans from the scroll offset down to
/// `offset + viewport_height * (1 - band_ratio)`; a section is in view
/// while its box overlaps that band. Unmeasured geometry counts as not
/// intersecting for this tick (re-evaluated once the host measures it).
pub fn is_in_view(index: usize, offset: Px, viewport_height: Px, band_ratio: f32) -> bool {
    let Some(top) = arrays::get_top(index) else {
        return false;
    };
    let Some(height) = arrays::get_height(index) else {
        return false;
    };

    let band_top = offset;
    let band_bottom = offset + viewport_height * (1.0 - band_ratio.clamp(0.0, 1.0));
    top < band_bottom && top + height > band_top
}

/// Re-evaluate every section's band membership and apply phase flips.
///
/// Sections crossing into the band this tick form a cohort; each cohort
/// member gets a stagger delay of `base + k * step` in registry order, so
/// a page-load burst cascades instead of popping in at once.
pub fn recompute_reveals(offset: Px, viewport_height: Px, now_ms: f64, config: &CoordinatorConfig) {
    let mut cohort = 0usize;

    for index in registry::ordered_indices() {
        let ratio = arrays::get_reveal_ratio(index).unwrap_or(config.reveal_band_ratio);
        let in_view = is_in_view(index, offset, viewport_height, ratio);
        let phase = arrays::get_reveal_phase(index);

        match (in_view, phase) {
            (true, RevealPhase::Hidden) => {
                let delay = config.reveal_base_delay_ms + cohort as f64 * config.stagger_step_ms;
                cohort += 1;
                animate::begin_enter(
                    index,
                    now_ms,
                    delay,
                    config.reveal_duration_ms,
                    config.reveal_easing,
                    config.hidden_offset,
                );
            }
            (false, RevealPhase::Entering | RevealPhase::Visible) => {
                animate::to_hidden(index);
            }
            // Already on the right side of the boundary: idempotent.
            (true, RevealPhase::Entering | RevealPhase::Visible)
            | (false, RevealPhase::Hidden) => {}
        }
    }
}

/// Reset every section to hidden (unmount / testing).
pub fn reset_reveal_state() {
    for index in registry::ordered_indices() {
        animate::to_hidden(index);
    }
}
