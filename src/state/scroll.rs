//! Scroll State Module
//!
//! Owns the scroll offset and everything derived from it:
//! - Offset signal (fed by host scroll events, clamped to the document)
//! - `scrolled_past_threshold` for the nav chrome's opaque variant
//! - Animated smooth-scroll to a registered anchor (eased, cancellable)
//!
//! Only one scroll position exists, so there is a single in-flight
//! animation at most: re-invoking `smooth_scroll_to` cancels the previous
//! animation (last caller wins, no queue).

use std::cell::RefCell;

use spark_signals::{Signal, signal};

use crate::engine::{arrays, registry};
use crate::state::viewport;
use crate::types::{Easing, Px};

// =============================================================================
// Scroll Signals
// =============================================================================

thread_local! {
    static OFFSET_Y: Signal<Px> = signal(0.0);
    static SCROLLED: Signal<bool> = signal(false);

    /// At most one in-flight anchor animation.
    static ACTIVE_ANIMATION: RefCell<Option<ScrollAnimation>> = const { RefCell::new(None) };
}

/// Get the current scroll offset.
pub fn offset_y() -> Px {
    OFFSET_Y.with(|s| s.get())
}

/// Get the offset signal for reactive tracking.
pub fn offset_signal() -> Signal<Px> {
    OFFSET_Y.with(|s| s.clone())
}

/// Whether the offset has passed the nav chrome threshold (reactive).
pub fn scrolled_past_threshold() -> bool {
    SCROLLED.with(|s| s.get())
}

/// Get the scrolled signal for reactive tracking.
pub fn scrolled_signal() -> Signal<bool> {
    SCROLLED.with(|s| s.clone())
}

/// Set the scroll offset, clamped to `[0, max_scroll]`.
pub fn set_offset(offset: Px) {
    let clamped = offset.clamp(0.0, viewport::max_scroll());
    OFFSET_Y.with(|s| s.set(clamped));
}

/// Recompute `scrolled_past_threshold` from the current offset.
///
/// Idempotent; safe to call on every scroll and resize tick.
pub fn recompute_scrolled(threshold: Px) {
    let scrolled = offset_y() > threshold;
    SCROLLED.with(|s| {
        if s.get() != scrolled {
            s.set(scrolled);
        }
    });
}

// =============================================================================
// Smooth Scroll Animation
// =============================================================================

/// Offset settles exactly on the target; this epsilon only guards float
/// comparison in callers.
pub const SETTLE_EPSILON: Px = 0.5;

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: Px,
    target: Px,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

/// Start an animated scroll to a registered anchor.
///
/// Computes `target = section_top - offset_px`, clamps it to the valid
/// scroll range and interpolates from the current offset over
/// `duration_ms` using `easing`. An in-flight animation is cancelled.
///
/// Unknown ids and sections without measured geometry are logged no-ops;
/// the offset is left unchanged. Returns whether an animation started.
pub fn smooth_scroll_to(
    id: &str,
    offset_px: Px,
    duration_ms: f64,
    easing: Easing,
    now_ms: f64,
) -> bool {
    let Some(index) = registry::get_index(id) else {
        tracing::debug!(id, "smooth scroll to unknown anchor ignored");
        return false;
    };
    let Some(top) = arrays::get_top(index) else {
        tracing::debug!(id, index, "smooth scroll target not yet measured");
        return false;
    };

    let from = offset_y();
    let target = (top - offset_px).clamp(0.0, viewport::max_scroll());

    if duration_ms <= 0.0 || (target - from).abs() < SETTLE_EPSILON {
        // Nothing to animate: jump and settle.
        ACTIVE_ANIMATION.with(|anim| *anim.borrow_mut() = None);
        set_offset(target);
        return false;
    }

    tracing::trace!(id, from, target, duration_ms, "smooth scroll started");
    ACTIVE_ANIMATION.with(|anim| {
        *anim.borrow_mut() = Some(ScrollAnimation {
            from,
            target,
            start_ms: now_ms,
            duration_ms,
            easing,
        });
    });
    true
}

/// Advance the in-flight animation to `now_ms`.
///
/// Returns `true` while the animation is still running. On completion the
/// offset lands exactly on the target.
pub fn tick_scroll(now_ms: f64) -> bool {
    let step = ACTIVE_ANIMATION.with(|anim| {
        let mut anim = anim.borrow_mut();
        let Some(current) = *anim else {
            return None;
        };

        let t = ((now_ms - current.start_ms) / current.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            *anim = None;
            Some((current.target, false))
        } else {
            let eased = current.easing.apply(t as f32);
            Some((current.from + (current.target - current.from) * eased, true))
        }
    });

    match step {
        Some((offset, running)) => {
            set_offset(offset);
            running
        }
        None => false,
    }
}

/// Cancel the in-flight animation, leaving the offset where it is.
///
/// The host calls this when direct user scrolling takes over.
pub fn cancel_scroll() {
    ACTIVE_ANIMATION.with(|anim| *anim.borrow_mut() = None);
}

/// Whether an anchor animation is in flight.
pub fn is_scroll_animating() -> bool {
    ACTIVE_ANIMATION.with(|anim| anim.borrow().is_some())
}

// =============================================================================
// Reset (unmount / testing)
// =============================================================================

/// Reset all scroll state.
pub fn reset_scroll_state() {
    ACTIVE_ANIMATION.with(|anim| *anim.borrow_mut() = None);
    OFFSET_Y.with(|s| s.set(0.0));
    SCROLLED.with(|s| s.set(false));
}
