//! # spark-scroll
//!
//! Reactive scroll and reveal coordination engine for single-page sites.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Sections are indices into columnar reactive arrays; the host registers
//! each section once, feeds geometry measurements and scroll/resize events,
//! and drives the engine with one [`pipeline::tick`] per animation frame:
//!
//! ```text
//! host events → frame latch → tick → {scroll, spy, reveal, animate} → snapshot
//! ```
//!
//! The engine owns all navigation/reveal state: the active section for nav
//! highlighting, animated anchor scrolling, the nav chrome's scrolled flag,
//! per-section entrance-animation phases and the mobile menu toggle. It
//! performs no platform calls itself - geometry comes in, styles go out -
//! so it runs identically under DOM, WASM or a test harness.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Px, RevealPhase, Easing, snapshots)
//! - [`config`] - Coordinator tunables
//! - [`engine`] - Section registry and per-section arrays
//! - [`state`] - Scroll, spy, reveal, animate, menu, viewport systems
//! - [`pipeline`] - Mount lifecycle, frame coalescing, tick driver

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::CoordinatorConfig;

pub use error::{Error, Result};

pub use engine::{
    all as sections, register, register_with_band, reset_registry, Section,
};

pub use state::{
    menu::{is_open as menu_is_open, toggle as menu_toggle},
    scroll::{offset_y, scrolled_past_threshold, smooth_scroll_to},
    spy::{active_section_id, active_section_signal},
    viewport::{document_height, viewport_height},
};

pub use pipeline::{
    mount, on_resize_event, on_scroll_event, request_scroll_to, section_measured,
    section_unmeasured, select_nav_link, snapshot, subscribe, tick, toggle_menu, MountHandle,
};
