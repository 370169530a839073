//! Core types for spark-scroll.
//!
//! These types define the foundation that everything builds on.
//! They flow through the reactive pipeline and define what the host's
//! renderer understands.

use serde::{Deserialize, Serialize};

// =============================================================================
// Logical Pixels
// =============================================================================

/// Logical pixel value, as reported by the host's geometry queries.
///
/// All offsets, heights and animation distances in the engine are in
/// logical pixels. f32 gives sub-pixel interpolation during animation
/// without the host having to round anything.
pub type Px = f32;

// =============================================================================
// Reveal Phase
// =============================================================================

/// Entrance-animation phase for a section.
///
/// Transition table (driven by the reveal tracker and the frame clock):
///
/// ```text
/// Hidden   --enter band-->  Entering
/// Entering --duration up->  Visible
/// Entering --exit band--->  Hidden      (animation cancelled)
/// Visible  --exit band--->  Hidden      (non-sticky: replays on re-entry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    /// Off-screen rest state: opacity 0, offset +30 logical pixels.
    #[default]
    Hidden,
    /// Interpolating toward the visible values.
    Entering,
    /// On-screen rest state: opacity 1, offset 0.
    Visible,
}

/// Interpolated presentation values for a section's entrance animation.
///
/// The host applies these directly (CSS opacity/translate, canvas alpha,
/// whatever its render layer uses).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// 0.0 (fully hidden) to 1.0 (fully visible).
    pub opacity: f32,
    /// Vertical displacement from the rest position, in logical pixels.
    /// Positive = pushed down.
    pub offset_y: Px,
}

impl RevealStyle {
    /// Rest style for the hidden phase.
    pub const fn hidden(offset: Px) -> Self {
        Self {
            opacity: 0.0,
            offset_y: offset,
        }
    }

    /// Rest style for the visible phase.
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
    };
}

// =============================================================================
// Easing
// =============================================================================

/// Time-interpolation curve for smooth scrolling and reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Fast start, decelerating settle. Used for reveals.
    EaseOutCubic,
    /// Slow-fast-slow. Used for anchor scrolling.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] through the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Per-section slice of a [`CoordinatorSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSnapshot {
    pub id: String,
    pub phase: RevealPhase,
    pub style: RevealStyle,
}

/// Everything the render layer needs for one frame, in registry order.
///
/// Produced by `pipeline::snapshot()`; reading it inside an effect creates
/// reactive dependencies on the underlying signals.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorSnapshot {
    /// Active section for nav highlighting. `None` only before the first
    /// geometry measurement.
    pub active_section_id: Option<String>,
    /// Reveal phase and interpolated style per section, registry order.
    pub reveal_phase_by_id: Vec<SectionSnapshot>,
    /// Mobile menu open flag.
    pub menu_open: bool,
    /// Whether the nav chrome should render its opaque variant.
    pub scrolled_past_threshold: bool,
}
