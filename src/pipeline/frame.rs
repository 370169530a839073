//! Frame coalescing - at most one geometry application per tick.
//!
//! Scroll and resize listeners can fire many times between animation
//! frames. Handlers latch the raw values here (freshest wins, older values
//! are overwritten) and the tick applies the survivors once, so per-frame
//! work is bounded no matter how fast events arrive and no handler ever
//! acts on stale geometry.

use std::cell::RefCell;

use bitflags::bitflags;

use crate::types::Px;

bitflags! {
    /// Which inputs changed since the last tick. An empty set means the
    /// tick has nothing new to apply and derived state is already current.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const SCROLL = 1 << 0;
        const RESIZE = 1 << 1;
        /// Section geometry was measured or dropped.
        const GEOMETRY = 1 << 2;
        /// An anchor navigation was requested.
        const NAV = 1 << 3;
    }
}

/// Latched raw values, drained by the tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingInput {
    pub scroll_offset: Option<Px>,
    pub viewport: Option<(Px, Px)>,
}

thread_local! {
    static DIRTY: RefCell<DirtyFlags> = const { RefCell::new(DirtyFlags::empty()) };
    static PENDING: RefCell<PendingInput> = RefCell::new(PendingInput::default());
}

/// Latch a scroll event. The most recent offset wins.
pub fn note_scroll(offset: Px) {
    PENDING.with(|p| p.borrow_mut().scroll_offset = Some(offset));
    DIRTY.with(|d| d.borrow_mut().insert(DirtyFlags::SCROLL));
}

/// Latch a resize event. The most recent measurement wins.
pub fn note_resize(viewport_height: Px, document_height: Px) {
    PENDING.with(|p| p.borrow_mut().viewport = Some((viewport_height, document_height)));
    DIRTY.with(|d| d.borrow_mut().insert(DirtyFlags::RESIZE));
}

/// Note a section measurement change. No payload to latch; the arrays
/// already hold the freshest geometry.
pub fn note_geometry() {
    DIRTY.with(|d| d.borrow_mut().insert(DirtyFlags::GEOMETRY));
}

/// Note an anchor-navigation request.
pub fn note_nav() {
    DIRTY.with(|d| d.borrow_mut().insert(DirtyFlags::NAV));
}

/// Drain the latched input, clearing the dirty set.
pub fn take() -> (DirtyFlags, PendingInput) {
    let flags = DIRTY.with(|d| {
        let mut d = d.borrow_mut();
        let flags = *d;
        *d = DirtyFlags::empty();
        flags
    });
    let pending = PENDING.with(|p| std::mem::take(&mut *p.borrow_mut()));
    (flags, pending)
}

/// Whether any input is waiting for the next tick.
pub fn is_dirty() -> bool {
    DIRTY.with(|d| !d.borrow().is_empty())
}

/// Reset frame state (unmount / testing).
pub fn reset_frame_state() {
    let _ = take();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_frame_state();
    }

    #[test]
    fn test_freshest_scroll_wins() {
        setup();

        note_scroll(10.0);
        note_scroll(20.0);
        note_scroll(30.0);

        let (flags, pending) = take();
        assert_eq!(flags, DirtyFlags::SCROLL);
        assert_eq!(pending.scroll_offset, Some(30.0));
    }

    #[test]
    fn test_take_drains() {
        setup();

        note_scroll(10.0);
        note_resize(900.0, 4000.0);
        assert!(is_dirty());

        let (flags, pending) = take();
        assert_eq!(flags, DirtyFlags::SCROLL | DirtyFlags::RESIZE);
        assert_eq!(pending.viewport, Some((900.0, 4000.0)));

        assert!(!is_dirty());
        let (flags, pending) = take();
        assert_eq!(flags, DirtyFlags::empty());
        assert_eq!(pending, PendingInput::default());
    }

    #[test]
    fn test_payloadless_flags() {
        setup();

        note_geometry();
        note_nav();

        let (flags, pending) = take();
        assert_eq!(flags, DirtyFlags::GEOMETRY | DirtyFlags::NAV);
        assert_eq!(pending, PendingInput::default());
    }
}
