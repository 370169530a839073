//! Per-section parallel arrays.
//!
//! Sections are indices into columnar reactive arrays rather than objects:
//! - top/height: measured geometry, fed by the host (None = not yet mounted)
//! - order: total order used for iteration and spy tie-breaks
//! - reveal band ratio: per-section override of the configured band
//! - reveal phase: the entrance-animation state machine's current phase
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained
//! tracking, so deriveds re-run only when the cells they read change.

use spark_signals::{DirtySet, TrackedSlotArray, dirty_set, tracked_slot_array};

use crate::types::{Px, RevealPhase};

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Dirty set shared by every section column. Writes record the touched
    /// index here for incremental consumers.
    static SECTION_DIRTY_SET: DirtySet = dirty_set();

    /// Section top edge in document coordinates. None until measured.
    static SECTION_TOP: TrackedSlotArray<Option<Px>> = tracked_slot_array(
        Some(None),
        SECTION_DIRTY_SET.with(|s| s.clone())
    );

    /// Section height. None until measured.
    static SECTION_HEIGHT: TrackedSlotArray<Option<Px>> = tracked_slot_array(
        Some(None),
        SECTION_DIRTY_SET.with(|s| s.clone())
    );

    /// Order index (defines the section total order).
    static ORDER_INDEX: TrackedSlotArray<u32> = tracked_slot_array(
        Some(0),
        SECTION_DIRTY_SET.with(|s| s.clone())
    );

    /// Per-section reveal band ratio override. None = use the config value.
    static REVEAL_RATIO: TrackedSlotArray<Option<f32>> = tracked_slot_array(
        Some(None),
        SECTION_DIRTY_SET.with(|s| s.clone())
    );

    /// Current reveal phase.
    static REVEAL_PHASE: TrackedSlotArray<RevealPhase> = tracked_slot_array(
        Some(RevealPhase::Hidden),
        SECTION_DIRTY_SET.with(|s| s.clone())
    );
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    // TrackedSlotArray auto-expands; peek to trigger expansion.
    SECTION_TOP.with(|arr| { let _ = arr.peek(index); });
    SECTION_HEIGHT.with(|arr| { let _ = arr.peek(index); });
    ORDER_INDEX.with(|arr| { let _ = arr.peek(index); });
    REVEAL_RATIO.with(|arr| { let _ = arr.peek(index); });
    REVEAL_PHASE.with(|arr| { let _ = arr.peek(index); });
}

/// Reset all arrays.
pub fn reset() {
    SECTION_TOP.with(|arr| for i in 0..arr.len() { arr.clear(i); });
    SECTION_HEIGHT.with(|arr| for i in 0..arr.len() { arr.clear(i); });
    ORDER_INDEX.with(|arr| for i in 0..arr.len() { arr.clear(i); });
    REVEAL_RATIO.with(|arr| for i in 0..arr.len() { arr.clear(i); });
    REVEAL_PHASE.with(|arr| for i in 0..arr.len() { arr.clear(i); });
    SECTION_DIRTY_SET.with(|s| s.borrow_mut().clear());
}

// =============================================================================
// Geometry
// =============================================================================

/// Get section top at index (reactive). None = geometry unavailable.
pub fn get_top(index: usize) -> Option<Px> {
    SECTION_TOP.with(|arr| arr.get(index)).flatten()
}

/// Get section height at index (reactive).
pub fn get_height(index: usize) -> Option<Px> {
    SECTION_HEIGHT.with(|arr| arr.get(index)).flatten()
}

/// Store a fresh measurement for a section.
///
/// Resize invalidates downstream state automatically: everything that read
/// these cells re-evaluates against the new geometry.
pub fn set_geometry(index: usize, top: Px, height: Px) {
    SECTION_TOP.with(|arr| arr.set_value(index, Some(top)));
    SECTION_HEIGHT.with(|arr| arr.set_value(index, Some(height)));
}

/// Drop a section's measurement (its node unmounted from the host tree).
pub fn clear_geometry(index: usize) {
    SECTION_TOP.with(|arr| arr.set_value(index, None));
    SECTION_HEIGHT.with(|arr| arr.set_value(index, None));
}

// =============================================================================
// Order Index
// =============================================================================

/// Get order index at index (reactive).
pub fn get_order_index(index: usize) -> u32 {
    ORDER_INDEX.with(|arr| arr.get(index)).unwrap_or(0)
}

/// Set order index at index.
pub fn set_order_index(index: usize, order: u32) {
    ORDER_INDEX.with(|arr| arr.set_value(index, order));
}

// =============================================================================
// Reveal Band Ratio
// =============================================================================

/// Get the reveal band ratio override at index (reactive).
pub fn get_reveal_ratio(index: usize) -> Option<f32> {
    REVEAL_RATIO.with(|arr| arr.get(index)).flatten()
}

/// Set a per-section reveal band ratio.
pub fn set_reveal_ratio(index: usize, ratio: f32) {
    REVEAL_RATIO.with(|arr| arr.set_value(index, Some(ratio)));
}

// =============================================================================
// Reveal Phase
// =============================================================================

/// Get reveal phase at index (reactive).
pub fn get_reveal_phase(index: usize) -> RevealPhase {
    REVEAL_PHASE.with(|arr| arr.get(index)).unwrap_or(RevealPhase::Hidden)
}

/// Set reveal phase at index.
pub fn set_reveal_phase(index: usize, phase: RevealPhase) {
    REVEAL_PHASE.with(|arr| arr.set_value(index, phase));
}
