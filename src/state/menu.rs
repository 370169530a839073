//! Mobile Menu State Machine.
//!
//! Two states, `closed` and `open`. The toggle button flips between them;
//! selecting a nav link closes the menu as a side effect (the selection
//! itself is handled by the scroll controller). Created closed on mount,
//! destroyed on unmount. Outside-click close is a product decision the
//! engine does not take; hosts that want it call [`close`] from their own
//! listener.

use spark_signals::{Signal, signal};

thread_local! {
    static MENU_OPEN: Signal<bool> = signal(false);
}

/// Whether the mobile menu is open (reactive).
pub fn is_open() -> bool {
    MENU_OPEN.with(|s| s.get())
}

/// Get the menu signal for reactive tracking.
pub fn menu_signal() -> Signal<bool> {
    MENU_OPEN.with(|s| s.clone())
}

/// Toggle-button activation: `closed ⇄ open`.
pub fn toggle() {
    MENU_OPEN.with(|s| s.set(!s.get()));
}

/// Force the menu closed (nav selection, or a host-owned outside-click
/// listener). Idempotent.
pub fn close() {
    MENU_OPEN.with(|s| {
        if s.get() {
            s.set(false);
        }
    });
}

/// Reset menu state (unmount / testing).
pub fn reset_menu_state() {
    close();
}
