//! Pipeline - the coordinating layer.
//!
//! Owns the frame loop: event intake is latched in [`frame`], applied once
//! per tick by [`mount::tick`], and observed through [`mount::snapshot`] /
//! [`mount::subscribe`].

pub mod frame;
pub mod mount;

pub use frame::{DirtyFlags, PendingInput};
pub use mount::{
    config, mount, on_resize_event, on_scroll_event, request_scroll_to,
    reset_coordinator_state, section_measured, section_unmeasured, select_nav_link, snapshot,
    subscribe, tick, toggle_menu, MountHandle,
};
