//! Error taxonomy.
//!
//! Only registration can fail loudly. Runtime degrade conditions (unknown
//! anchor, unmeasured geometry) are handled in place: the operation becomes
//! a logged no-op and the affected section renders as "not highlighted" /
//! "not revealed" for that tick.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A section id was registered twice. Sections are registered once at
    /// mount and are immutable for the page's lifetime.
    #[error("section id {0:?} is already registered")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, Error>;
