//! Mount API - coordinator lifecycle and frame driver.
//!
//! Entry point for wiring the engine to a host page. The host:
//!
//! 1. calls [`mount`] with a [`CoordinatorConfig`] and keeps the handle,
//! 2. registers sections and feeds measurements ([`section_measured`]),
//! 3. forwards scroll/resize events ([`on_scroll_event`], [`on_resize_event`]),
//! 4. calls [`tick`] once per animation frame with its frame timestamp,
//! 5. renders from [`snapshot`] or a [`subscribe`] effect,
//! 6. drops or [`MountHandle::unmount`]s the handle on teardown.
//!
//! `tick` returns whether any animation is still in flight, so hosts that
//! schedule frames on demand know to keep requesting them.
//!
//! # Example
//!
//! ```ignore
//! use spark_scroll::pipeline::{self, mount};
//! use spark_scroll::engine::registry;
//!
//! let handle = mount(Default::default());
//! registry::register("home", "Home", 0)?;
//! pipeline::section_measured("home", 0.0, 900.0);
//! pipeline::on_resize_event(900.0, 5400.0);
//!
//! // per animation frame:
//! let animating = pipeline::tick(now_ms);
//!
//! handle.unmount();
//! ```

use std::cell::RefCell;

use spark_signals::effect;

use crate::config::CoordinatorConfig;
use crate::engine::{arrays, registry};
use crate::state::{animate, menu, reveal, scroll, spy, viewport};
use crate::types::{CoordinatorSnapshot, Px, SectionSnapshot};

use super::frame;

// =============================================================================
// Coordinator State
// =============================================================================

thread_local! {
    static CONFIG: RefCell<CoordinatorConfig> = RefCell::new(CoordinatorConfig::default());
    static MOUNTED: RefCell<bool> = const { RefCell::new(false) };
    /// Timestamp of the last applied tick; snapshots interpolate at this
    /// instant so repeated reads between ticks agree.
    static LAST_TICK_MS: RefCell<f64> = const { RefCell::new(0.0) };
}

/// Current coordinator config.
pub fn config() -> CoordinatorConfig {
    CONFIG.with(|c| c.borrow().clone())
}

fn is_mounted() -> bool {
    MOUNTED.with(|m| *m.borrow())
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]. Owns the coordinator's lifetime: dropping
/// it (or calling [`unmount`](Self::unmount)) releases every piece of
/// engine state, after which event feeds become no-ops. An event handler
/// still firing after unmount is a host-side leak; the guard keeps it
/// harmless and logs it.
#[derive(Debug)]
pub struct MountHandle {
    unmounted: bool,
}

impl MountHandle {
    /// Tear the coordinator down explicitly.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        reset_coordinator_state();
        tracing::debug!("coordinator unmounted");
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Mount the coordinator.
///
/// Clears any previous engine state (a stale mount cannot leak into a new
/// one) and installs `config`.
pub fn mount(config: CoordinatorConfig) -> MountHandle {
    reset_coordinator_state();
    CONFIG.with(|c| *c.borrow_mut() = config);
    MOUNTED.with(|m| *m.borrow_mut() = true);
    tracing::debug!("coordinator mounted");
    MountHandle { unmounted: false }
}

/// Reset every engine subsystem. Called on unmount and from tests.
pub fn reset_coordinator_state() {
    MOUNTED.with(|m| *m.borrow_mut() = false);
    LAST_TICK_MS.with(|t| *t.borrow_mut() = 0.0);
    CONFIG.with(|c| *c.borrow_mut() = CoordinatorConfig::default());
    frame::reset_frame_state();
    animate::reset_animation_state();
    scroll::reset_scroll_state();
    spy::reset_spy_state();
    menu::reset_menu_state();
    viewport::reset_viewport_state();
    registry::reset_registry();
}

// =============================================================================
// Event Intake
// =============================================================================

/// Host scroll listener: latch the newest offset for the next tick.
pub fn on_scroll_event(offset: Px) {
    if !is_mounted() {
        tracing::debug!(offset, "scroll event after unmount ignored");
        return;
    }
    frame::note_scroll(offset);
}

/// Host resize listener: latch the newest viewport measurements.
pub fn on_resize_event(viewport_height: Px, document_height: Px) {
    if !is_mounted() {
        tracing::debug!("resize event after unmount ignored");
        return;
    }
    frame::note_resize(viewport_height, document_height);
}

/// Host measurement feed: a section's node mounted or moved.
///
/// Unknown ids are logged no-ops; the section simply stays unmeasured.
pub fn section_measured(id: &str, top: Px, height: Px) {
    match registry::get_index(id) {
        Some(index) => {
            arrays::set_geometry(index, top, height);
            frame::note_geometry();
        }
        None => tracing::debug!(id, "measurement for unregistered section ignored"),
    }
}

/// Host measurement feed: a section's node left the host tree. The section
/// reads as not intersecting until measured again.
pub fn section_unmeasured(id: &str) {
    if let Some(index) = registry::get_index(id) {
        arrays::clear_geometry(index);
        frame::note_geometry();
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Animated scroll to a registered anchor using the configured offset,
/// duration and easing. Unknown ids are ignored.
pub fn request_scroll_to(id: &str, now_ms: f64) {
    if !is_mounted() {
        return;
    }
    let config = config();
    scroll::smooth_scroll_to(
        id,
        config.scroll_offset,
        config.scroll_duration_ms,
        config.scroll_easing,
        now_ms,
    );
    // Covers the zero-duration jump, which moves the offset without an
    // animation for the next tick to notice.
    frame::note_nav();
}

/// Nav link selection: close the mobile menu (if open) and scroll.
pub fn select_nav_link(id: &str, now_ms: f64) {
    if !is_mounted() {
        return;
    }
    menu::close();
    request_scroll_to(id, now_ms);
}

/// Mobile menu toggle-button activation.
pub fn toggle_menu() {
    if !is_mounted() {
        return;
    }
    menu::toggle();
}

// =============================================================================
// Frame Driver
// =============================================================================

/// Run one coordinator tick at the host's frame timestamp.
///
/// Applies the freshest latched input, advances the scroll animation,
/// recomputes the nav threshold, the active section and every section's
/// reveal phase, then advances reveal animations. Returns `true` while any
/// animation is still in flight so the host keeps scheduling frames.
///
/// A tick with nothing dirty and no animation in flight is a no-op: the
/// derived state is already current, so the recompute pass is skipped.
pub fn tick(now_ms: f64) -> bool {
    if !is_mounted() {
        return false;
    }
    LAST_TICK_MS.with(|t| *t.borrow_mut() = now_ms);

    let (flags, pending) = frame::take();
    if flags.contains(frame::DirtyFlags::RESIZE) {
        if let Some((viewport_height, document_height)) = pending.viewport {
            viewport::set_viewport(viewport_height, document_height);
            // Document shrank: keep the offset in the valid range.
            scroll::set_offset(scroll::offset_y());
        }
    }
    if flags.contains(frame::DirtyFlags::SCROLL) {
        if let Some(offset) = pending.scroll_offset {
            scroll::set_offset(offset);
        }
    }

    // Checked before advancing so the settling frame still recomputes at
    // the final offset.
    let animating_in = scroll::is_scroll_animating() || animate::animating_count() > 0;
    if flags.is_empty() && !animating_in {
        return false;
    }

    let scroll_animating = scroll::tick_scroll(now_ms);

    let config = config();
    let offset = scroll::offset_y();
    scroll::recompute_scrolled(config.scrolled_threshold);
    spy::recompute_active(offset, config.activation_offset);
    reveal::recompute_reveals(offset, viewport::viewport_height(), now_ms, &config);
    let reveals_animating = animate::tick_animations(now_ms);

    scroll_animating || reveals_animating
}

// =============================================================================
// Observation Surface
// =============================================================================

/// Assemble the render-facing view of the coordinator.
///
/// Reading it inside an effect subscribes to the underlying signals, so
/// the effect re-runs exactly when something render-relevant changes.
pub fn snapshot() -> CoordinatorSnapshot {
    let config = config();
    let now_ms = LAST_TICK_MS.with(|t| *t.borrow());

    let reveal_phase_by_id = registry::all()
        .into_iter()
        .map(|section| SectionSnapshot {
            phase: arrays::get_reveal_phase(section.index),
            style: animate::style_of(section.index, now_ms, config.hidden_offset),
            id: section.id,
        })
        .collect();

    CoordinatorSnapshot {
        active_section_id: spy::active_section_id(),
        reveal_phase_by_id,
        menu_open: menu::is_open(),
        scrolled_past_threshold: scroll::scrolled_past_threshold(),
    }
}

/// Subscribe to coordinator changes.
///
/// `callback` runs immediately with the current snapshot and again whenever
/// a signal it depends on changes. Returns a stop function; call it before
/// the subscribing component goes away (a subscription that outlives its
/// owner is a leak).
pub fn subscribe(callback: impl Fn(CoordinatorSnapshot) + 'static) -> Box<dyn FnOnce()> {
    let stop = effect(move || {
        callback(snapshot());
    });
    Box::new(stop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RevealPhase;

    fn setup() -> MountHandle {
        reset_coordinator_state();
        mount(CoordinatorConfig::default())
    }

    fn register_page() {
        for (i, id) in ["home", "about", "skills"].iter().enumerate() {
            registry::register(id, id, i as u32).unwrap();
            section_measured(id, i as Px * 1000.0, 1000.0);
        }
        on_resize_event(900.0, 3000.0);
    }

    #[test]
    fn test_tick_applies_freshest_input() {
        let _handle = setup();
        register_page();

        on_scroll_event(100.0);
        on_scroll_event(950.0);
        tick(0.0);

        // Only the newest offset was applied.
        assert_eq!(scroll::offset_y(), 950.0);
        assert_eq!(spy::active_section_id().as_deref(), Some("about"));
        assert!(scroll::scrolled_past_threshold());
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let _handle = setup();
        register_page();

        on_scroll_event(2100.0);
        tick(0.0);
        assert_eq!(scroll::offset_y(), 2100.0);

        // Document shrinks under the current offset.
        on_resize_event(900.0, 2400.0);
        tick(16.0);
        assert_eq!(scroll::offset_y(), 1500.0);
    }

    #[test]
    fn test_snapshot_shape() {
        let _handle = setup();
        register_page();

        on_scroll_event(0.0);
        tick(0.0);

        let snap = snapshot();
        assert_eq!(snap.active_section_id.as_deref(), Some("home"));
        assert_eq!(snap.reveal_phase_by_id.len(), 3);
        assert_eq!(snap.reveal_phase_by_id[0].id, "home");
        assert_eq!(snap.reveal_phase_by_id[0].phase, RevealPhase::Entering);
        assert!(!snap.menu_open);
        assert!(!snap.scrolled_past_threshold);
    }

    #[test]
    fn test_events_after_unmount_are_noops() {
        let handle = setup();
        register_page();
        handle.unmount();

        on_scroll_event(500.0);
        assert!(!tick(0.0));
        assert_eq!(scroll::offset_y(), 0.0);
        assert_eq!(registry::count(), 0);
    }

    #[test]
    fn test_mount_clears_stale_state() {
        let _handle = setup();
        register_page();
        on_scroll_event(500.0);
        tick(0.0);

        let _handle = setup();
        assert_eq!(registry::count(), 0);
        assert_eq!(scroll::offset_y(), 0.0);
        assert_eq!(spy::active_section(), None);
    }

    #[test]
    fn test_measurement_alone_reaches_next_tick() {
        let _handle = setup();
        registry::register("home", "Home", 0).unwrap();
        registry::register("about", "About", 1).unwrap();
        on_resize_event(900.0, 2000.0);
        tick(0.0);
        assert_eq!(spy::active_section(), None);

        // No scroll or resize this frame, only a measurement.
        section_measured("home", 0.0, 1000.0);
        tick(16.0);
        assert_eq!(spy::active_section_id().as_deref(), Some("home"));
    }

    #[test]
    fn test_instant_nav_jump_recomputes_same_tick() {
        let _handle = mount(CoordinatorConfig {
            scroll_duration_ms: 0.0,
            ..CoordinatorConfig::default()
        });
        register_page();
        tick(0.0);

        // The jump moves the offset without leaving an animation behind;
        // the request itself must dirty the next tick.
        request_scroll_to("skills", 16.0);
        tick(16.0);
        assert_eq!(scroll::offset_y(), 1920.0);
        assert_eq!(spy::active_section_id().as_deref(), Some("skills"));
    }

    #[test]
    fn test_clean_tick_skips_derived_recompute() {
        let _handle = setup();
        register_page();
        on_scroll_event(950.0);
        tick(0.0);
        // Let the entrance animations run out so nothing is in flight.
        tick(2000.0);
        assert_eq!(spy::active_section_id().as_deref(), Some("about"));

        // An array write that bypasses the intake notes is not visible to
        // a clean tick.
        let skills = registry::get_index("skills").unwrap();
        arrays::set_geometry(skills, 1010.0, 1000.0);
        assert!(!tick(2016.0));
        assert_eq!(spy::active_section_id().as_deref(), Some("about"));

        // The noted measurement is.
        section_measured("skills", 1010.0, 1000.0);
        tick(2032.0);
        assert_eq!(spy::active_section_id().as_deref(), Some("skills"));
    }

    #[test]
    fn test_tick_reports_animation_in_flight() {
        let _handle = setup();
        register_page();
        on_resize_event(900.0, 3000.0);
        tick(0.0);

        request_scroll_to("skills", 16.0);
        assert!(tick(16.0));

        let mut now = 16.0;
        while tick(now) {
            now += 16.0;
        }
        assert!((scroll::offset_y() - (2000.0 - 80.0)).abs() < scroll::SETTLE_EPSILON);
    }
}
