//! Reveal Animator - per-section entrance animation.
//!
//! Drives the `hidden → entering → visible` machine (and `visible → hidden`
//! on exit) for each section independently. `entering` interpolates opacity
//! and vertical offset toward the visible rest values over a fixed duration,
//! optionally after a stagger delay.
//!
//! Interruption semantics: starting a transition while one is mid-flight
//! cancels it and restarts from the current interpolated snapshot - no
//! queue, no cross-fade. Transitions are independent per section; nothing
//! couples one section's animation to another's.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::engine::arrays;
use crate::types::{Easing, Px, RevealPhase, RevealStyle};

// =============================================================================
// Animation Registry
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct RevealAnimation {
    start_ms: f64,
    delay_ms: f64,
    duration_ms: f64,
    easing: Easing,
    /// Snapshot the interpolation starts from (the hidden rest style, or
    /// the mid-flight values of a cancelled animation).
    from: RevealStyle,
}

thread_local! {
    /// In-flight animations keyed by section index.
    static ANIMATIONS: RefCell<HashMap<usize, RevealAnimation>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Transitions
// =============================================================================

/// Transition a section to `entering`.
///
/// The interpolation starts from the section's current style snapshot, so a
/// section cancelled mid-exit resumes from wherever it visually is.
pub fn begin_enter(
    index: usize,
    now_ms: f64,
    delay_ms: f64,
    duration_ms: f64,
    easing: Easing,
    hidden_offset: Px,
) {
    let from = style_of(index, now_ms, hidden_offset);

    ANIMATIONS.with(|anims| {
        anims.borrow_mut().insert(
            index,
            RevealAnimation {
                start_ms: now_ms,
                delay_ms,
                duration_ms,
                easing,
                from,
            },
        );
    });
    arrays::set_reveal_phase(index, RevealPhase::Entering);
    tracing::trace!(index, delay_ms, "reveal entering");
}

/// Transition a section to `hidden` immediately.
///
/// Cancels any in-flight interpolation. The tracker calls this the moment a
/// section leaves the viewport band, so re-entry replays the full entrance.
pub fn to_hidden(index: usize) {
    ANIMATIONS.with(|anims| {
        anims.borrow_mut().remove(&index);
    });
    arrays::set_reveal_phase(index, RevealPhase::Hidden);
}

/// Advance all in-flight animations to `now_ms`.
///
/// Sections whose interpolation has run its course land in `visible`.
/// Returns `true` while any animation is still in flight.
pub fn tick_animations(now_ms: f64) -> bool {
    let finished: Vec<usize> = ANIMATIONS.with(|anims| {
        anims
            .borrow()
            .iter()
            .filter(|(_, anim)| now_ms - anim.start_ms >= anim.delay_ms + anim.duration_ms)
            .map(|(&index, _)| index)
            .collect()
    });

    for index in finished {
        ANIMATIONS.with(|anims| {
            anims.borrow_mut().remove(&index);
        });
        arrays::set_reveal_phase(index, RevealPhase::Visible);
        tracing::trace!(index, "reveal visible");
    }

    ANIMATIONS.with(|anims| !anims.borrow().is_empty())
}

// =============================================================================
// Style Interpolation
// =============================================================================

/// Current presentation style for a section.
///
/// Pure with respect to the frame clock: repeated evaluation at the same
/// `now_ms` with unchanged phase yields the same style.
pub fn style_of(index: usize, now_ms: f64, hidden_offset: Px) -> RevealStyle {
    match arrays::get_reveal_phase(index) {
        RevealPhase::Hidden => RevealStyle::hidden(hidden_offset),
        RevealPhase::Visible => RevealStyle::VISIBLE,
        RevealPhase::Entering => ANIMATIONS.with(|anims| {
            let anims = anims.borrow();
            let Some(anim) = anims.get(&index) else {
                // Phase says entering but no animation is tracked; treat as
                // settled rather than glitching back to hidden.
                return RevealStyle::VISIBLE;
            };

            let elapsed = now_ms - anim.start_ms - anim.delay_ms;
            if elapsed <= 0.0 {
                return anim.from;
            }
            let t = anim.easing.apply((elapsed / anim.duration_ms).min(1.0) as f32);
            RevealStyle {
                opacity: anim.from.opacity + (1.0 - anim.from.opacity) * t,
                offset_y: anim.from.offset_y * (1.0 - t),
            }
        }),
    }
}

/// Number of in-flight animations (diagnostics and tests).
pub fn animating_count() -> usize {
    ANIMATIONS.with(|anims| anims.borrow().len())
}

/// Reset animator state.
pub fn reset_animation_state() {
    ANIMATIONS.with(|anims| anims.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::{self, reset_registry};

    const HIDDEN: Px = 30.0;

    fn setup() -> usize {
        reset_registry();
        reset_animation_state();
        registry::register("about", "About", 1).unwrap()
    }

    #[test]
    fn test_hidden_rest_style() {
        let index = setup();

        let style = style_of(index, 0.0, HIDDEN);
        assert_eq!(style, RevealStyle::hidden(HIDDEN));
    }

    #[test]
    fn test_enter_interpolates_to_visible() {
        let index = setup();

        begin_enter(index, 0.0, 0.0, 600.0, Easing::Linear, HIDDEN);
        assert_eq!(arrays::get_reveal_phase(index), RevealPhase::Entering);

        let mid = style_of(index, 300.0, HIDDEN);
        assert!((mid.opacity - 0.5).abs() < 1e-4);
        assert!((mid.offset_y - 15.0).abs() < 1e-3);

        assert!(!tick_animations(600.0));
        assert_eq!(arrays::get_reveal_phase(index), RevealPhase::Visible);
        assert_eq!(style_of(index, 600.0, HIDDEN), RevealStyle::VISIBLE);
    }

    #[test]
    fn test_delay_holds_start_style() {
        let index = setup();

        begin_enter(index, 0.0, 200.0, 600.0, Easing::Linear, HIDDEN);

        // Still waiting out the stagger delay.
        assert_eq!(style_of(index, 100.0, HIDDEN), RevealStyle::hidden(HIDDEN));
        assert!(tick_animations(100.0));

        // Completes only after delay + duration.
        assert!(tick_animations(700.0));
        assert!(!tick_animations(800.0));
        assert_eq!(arrays::get_reveal_phase(index), RevealPhase::Visible);
    }

    #[test]
    fn test_exit_cancels_and_resets() {
        let index = setup();

        begin_enter(index, 0.0, 0.0, 600.0, Easing::Linear, HIDDEN);
        tick_animations(300.0);

        to_hidden(index);
        assert_eq!(arrays::get_reveal_phase(index), RevealPhase::Hidden);
        assert_eq!(animating_count(), 0);
        assert_eq!(style_of(index, 300.0, HIDDEN), RevealStyle::hidden(HIDDEN));
    }

    #[test]
    fn test_restart_resumes_from_snapshot() {
        let index = setup();

        begin_enter(index, 0.0, 0.0, 600.0, Easing::Linear, HIDDEN);
        let snapshot = style_of(index, 300.0, HIDDEN);

        // Restart mid-flight: the new interpolation starts at the snapshot,
        // not back at the hidden rest values.
        begin_enter(index, 300.0, 0.0, 600.0, Easing::Linear, HIDDEN);
        let restarted = style_of(index, 300.0, HIDDEN);
        assert_eq!(restarted, snapshot);
        assert!(restarted.opacity > 0.0);

        let later = style_of(index, 450.0, HIDDEN);
        assert!(later.opacity > restarted.opacity);
    }

    #[test]
    fn test_idempotent_at_rest() {
        let index = setup();

        // Repeated evaluation with unchanged state is stable.
        assert_eq!(style_of(index, 0.0, HIDDEN), style_of(index, 1000.0, HIDDEN));

        begin_enter(index, 0.0, 0.0, 600.0, Easing::Linear, HIDDEN);
        tick_animations(600.0);
        assert_eq!(style_of(index, 700.0, HIDDEN), RevealStyle::VISIBLE);
        assert_eq!(style_of(index, 9999.0, HIDDEN), RevealStyle::VISIBLE);
    }
}
