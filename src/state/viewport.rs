//! Viewport state signals.
//!
//! Root geometry signals for the coordination pipeline: viewport height and
//! document height, fed by the host's measurement layer. The engine never
//! queries a platform API itself; the host pushes fresh values on resize
//! (manual bounding-box feed), which keeps the intersection contract
//! backend-agnostic.

use spark_signals::{Signal, signal};

use crate::types::Px;

// =============================================================================
// Viewport Signals
// =============================================================================

thread_local! {
    static VIEWPORT_HEIGHT: Signal<Px> = signal(0.0);
    static DOCUMENT_HEIGHT: Signal<Px> = signal(0.0);
}

/// Get the current viewport height.
pub fn viewport_height() -> Px {
    VIEWPORT_HEIGHT.with(|h| h.get())
}

/// Get the current document height.
pub fn document_height() -> Px {
    DOCUMENT_HEIGHT.with(|h| h.get())
}

/// Set viewport and document heights (called on resize events).
pub fn set_viewport(viewport_height: Px, document_height: Px) {
    VIEWPORT_HEIGHT.with(|h| h.set(viewport_height.max(0.0)));
    DOCUMENT_HEIGHT.with(|h| h.set(document_height.max(0.0)));
}

/// Get the viewport height signal for reactive tracking.
pub fn viewport_height_signal() -> Signal<Px> {
    VIEWPORT_HEIGHT.with(|h| h.clone())
}

/// Get the document height signal for reactive tracking.
pub fn document_height_signal() -> Signal<Px> {
    DOCUMENT_HEIGHT.with(|h| h.clone())
}

/// Maximum valid scroll offset: `document_height - viewport_height`,
/// floored at zero for documents shorter than the viewport.
pub fn max_scroll() -> Px {
    (document_height() - viewport_height()).max(0.0)
}

/// Reset viewport state (unmount / testing).
pub fn reset_viewport_state() {
    set_viewport(0.0, 0.0);
}
