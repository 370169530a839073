//! Active-Section Spy - nav highlighting.
//!
//! Derives which section is "active" from the scroll offset. A section's
//! activation point is `top - activation_offset`; the active section is the
//! one with the largest activation point still at or below the offset.
//! Above the first section the first is active by default, and past the
//! last activation point the last stays active for good (the page bottom
//! never reverts to "nothing active").

use spark_signals::{Signal, signal};

use crate::engine::{arrays, registry};
use crate::types::Px;

thread_local! {
    static ACTIVE_SECTION: Signal<Option<usize>> = signal(None);
}

/// Currently active section index (reactive). `None` only before any
/// section has measured geometry.
pub fn active_section() -> Option<usize> {
    ACTIVE_SECTION.with(|s| s.get())
}

/// Currently active section id (reactive).
pub fn active_section_id() -> Option<String> {
    active_section().and_then(registry::get_id)
}

/// Get the active-section signal for reactive tracking.
pub fn active_section_signal() -> Signal<Option<usize>> {
    ACTIVE_SECTION.with(|s| s.clone())
}

/// Pure spy computation: active section for a given offset.
///
/// Sections without measured geometry are skipped for the tick; they pick
/// up on the next tick once the host has measured them. Equal activation
/// points resolve to the higher order index.
pub fn active_section_at(offset: Px, activation_offset: Px) -> Option<usize> {
    let mut first_measured: Option<usize> = None;
    let mut best: Option<(Px, usize)> = None;

    for index in registry::ordered_indices() {
        let Some(top) = arrays::get_top(index) else {
            continue;
        };
        if first_measured.is_none() {
            first_measured = Some(index);
        }

        let activation = top - activation_offset;
        if activation <= offset {
            // >= so that equal activation points prefer the later section
            // (iteration is in ascending order-index order).
            match best {
                Some((best_activation, _)) if activation < best_activation => {}
                _ => best = Some((activation, index)),
            }
        }
    }

    best.map(|(_, index)| index).or(first_measured)
}

/// Recompute and publish the active section for the current tick.
pub fn recompute_active(offset: Px, activation_offset: Px) {
    let active = active_section_at(offset, activation_offset);
    ACTIVE_SECTION.with(|s| {
        if s.get() != active {
            tracing::trace!(?active, offset, "active section changed");
            s.set(active);
        }
    });
}

/// Reset spy state.
pub fn reset_spy_state() {
    ACTIVE_SECTION.with(|s| s.set(None));
}
