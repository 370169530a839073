//! Engine - section catalogue and per-section reactive storage.
//!
//! Sections are indices into columnar reactive arrays (parallel-array
//! style). The registry owns allocation and the id↔index mapping; the
//! arrays own everything addressed by index.

pub mod arrays;
pub mod registry;

pub use registry::{
    all, count, get_id, get_index, get_label, is_registered, ordered_indices, register,
    register_with_band, reset_registry, Section,
};
