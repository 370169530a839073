//! Coordinator configuration.
//!
//! Every tunable the engine consults lives here. The defaults reproduce the
//! reference site: an 80px fixed nav, a 50px "scrolled" threshold, 700ms
//! anchor scrolling and 600ms entrance reveals with a 100ms stagger step.

use serde::{Deserialize, Serialize};

use crate::types::{Easing, Px};

/// Height of the fixed navigation chrome, in logical pixels.
///
/// Doubles as the default anchor-scroll offset and the spy's activation
/// offset: a section becomes active once its top passes under the nav.
pub const NAV_HEIGHT: Px = 80.0;

/// Scroll offset past which the nav chrome switches to its opaque variant.
pub const SCROLLED_THRESHOLD: Px = 50.0;

/// Default duration of an animated anchor scroll.
pub const SCROLL_DURATION_MS: f64 = 700.0;

/// Duration of a section's entrance reveal.
pub const REVEAL_DURATION_MS: f64 = 600.0;

/// Extra delay applied per sibling when several sections reveal together.
pub const STAGGER_STEP_MS: f64 = 100.0;

/// Fraction of the viewport height a section must cross before it counts
/// as in view.
pub const REVEAL_BAND_RATIO: f32 = 0.2;

/// Vertical displacement of the hidden reveal state, in logical pixels.
pub const HIDDEN_OFFSET: Px = 30.0;

/// Tunables for the scroll/reveal coordinator.
///
/// `Default` reproduces the reference site; hosts that persist settings can
/// round-trip this through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Offset subtracted from a section top when scrolling to its anchor.
    pub scroll_offset: Px,
    /// Activation offset for the active-section spy.
    pub activation_offset: Px,
    /// Scroll offset past which `scrolled_past_threshold` turns on.
    pub scrolled_threshold: Px,
    /// Anchor scroll duration in milliseconds.
    pub scroll_duration_ms: f64,
    /// Easing curve for anchor scrolling.
    pub scroll_easing: Easing,
    /// Entrance reveal duration in milliseconds.
    pub reveal_duration_ms: f64,
    /// Base delay before a reveal starts, in milliseconds.
    pub reveal_base_delay_ms: f64,
    /// Per-sibling stagger step for reveals triggered together.
    pub stagger_step_ms: f64,
    /// Default viewport-band ratio for the reveal tracker.
    pub reveal_band_ratio: f32,
    /// Easing curve for reveals.
    pub reveal_easing: Easing,
    /// Vertical displacement of the hidden reveal state.
    pub hidden_offset: Px,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            scroll_offset: NAV_HEIGHT,
            activation_offset: NAV_HEIGHT,
            scrolled_threshold: SCROLLED_THRESHOLD,
            scroll_duration_ms: SCROLL_DURATION_MS,
            scroll_easing: Easing::EaseInOutCubic,
            reveal_duration_ms: REVEAL_DURATION_MS,
            reveal_base_delay_ms: 0.0,
            stagger_step_ms: STAGGER_STEP_MS,
            reveal_band_ratio: REVEAL_BAND_RATIO,
            reveal_easing: Easing::EaseOutCubic,
            hidden_offset: HIDDEN_OFFSET,
        }
    }
}
