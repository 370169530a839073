//! State Module - Runtime state management systems
//!
//! The reactive state systems that power the page's interactivity:
//!
//! - **Viewport** - viewport/document height signals, geometry feed
//! - **Scroll** - offset, nav threshold, animated anchor scrolling
//! - **Spy** - active-section derivation for nav highlighting
//! - **Reveal** - viewport-band crossing detection (non-sticky)
//! - **Animate** - per-section entrance animation machine
//! - **Menu** - mobile menu open/closed toggle

pub mod animate;
pub mod menu;
pub mod reveal;
pub mod scroll;
pub mod spy;
pub mod viewport;
