//! Section Registry - Index allocation for parallel arrays.
//!
//! Manages the ordered catalogue of sections:
//! - ID ↔ Index bidirectional mapping
//! - Registration-time duplicate rejection
//! - ReactiveSet for registered indices (deriveds react to registration)
//! - Iteration in order-index order
//!
//! Sections are registered once at mount and live for the page's lifetime;
//! there is no removal operation, so indices are dense and never reused.

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::ReactiveSet;

use crate::error::{Error, Result};
use super::arrays;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map section ID to array index.
    static ID_TO_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());

    /// Map array index to section ID.
    static INDEX_TO_ID: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Nav label per index.
    static LABELS: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Set of registered indices. ReactiveSet so deriveds that iterate the
    /// catalogue automatically react when sections are registered. Mutation
    /// takes `&mut self`, hence the RefCell.
    static REGISTERED: RefCell<ReactiveSet<usize>> = RefCell::new(ReactiveSet::new());

    /// Next index to allocate.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };
}

// =============================================================================
// Section View
// =============================================================================

/// A registered section, as seen by the host (nav rendering etc).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub index: usize,
    pub id: String,
    pub label: String,
    pub order_index: u32,
}

// =============================================================================
// Registration
// =============================================================================

/// Register a section.
///
/// # Arguments
/// * `id` - Anchor id, unique for the page.
/// * `label` - Nav label.
/// * `order_index` - Position in the section total order.
///
/// # Errors
/// [`Error::DuplicateId`] if `id` is already registered.
pub fn register(id: &str, label: &str, order_index: u32) -> Result<usize> {
    let duplicate = ID_TO_INDEX.with(|map| map.borrow().contains_key(id));
    if duplicate {
        return Err(Error::DuplicateId(id.to_string()));
    }

    let index = NEXT_INDEX.with(|next| {
        let mut next = next.borrow_mut();
        let index = *next;
        *next += 1;
        index
    });

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().insert(id.to_string(), index);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().insert(index, id.to_string());
    });
    LABELS.with(|map| {
        map.borrow_mut().insert(index, label.to_string());
    });

    // Ensure arrays have capacity before the index becomes visible to
    // deriveds iterating the registered set.
    arrays::ensure_capacity(index);
    arrays::set_order_index(index, order_index);

    REGISTERED.with(|set| {
        set.borrow_mut().insert(index);
    });

    tracing::debug!(id, index, order_index, "section registered");
    Ok(index)
}

/// Register a section with a per-section reveal band ratio.
///
/// The reference site reveals its contact section on a shallower band (0.1)
/// than the rest of the page (0.2).
pub fn register_with_band(id: &str, label: &str, order_index: u32, band_ratio: f32) -> Result<usize> {
    let index = register(id, label, order_index)?;
    arrays::set_reveal_ratio(index, band_ratio);
    Ok(index)
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for a section ID.
pub fn get_index(id: &str) -> Option<usize> {
    ID_TO_INDEX.with(|map| map.borrow().get(id).copied())
}

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned())
}

/// Get nav label for an index.
pub fn get_label(index: usize) -> Option<String> {
    LABELS.with(|map| map.borrow().get(&index).cloned())
}

/// Check if an index is registered.
pub fn is_registered(index: usize) -> bool {
    REGISTERED.with(|set| set.borrow().contains(&index))
}

/// Number of registered sections.
pub fn count() -> usize {
    REGISTERED.with(|set| set.borrow().len())
}

/// Registered indices in order-index order.
///
/// Equal order indices sort by allocation index, so iteration is stable.
/// Creates a reactive dependency when called from a derived/effect.
pub fn ordered_indices() -> Vec<usize> {
    // iter() borrows the set, so collect before leaving the closure.
    let mut indices: Vec<usize> =
        REGISTERED.with(|set| set.borrow().iter().copied().collect());
    indices.sort_by_key(|&index| (arrays::get_order_index(index), index));
    indices
}

/// All sections in order-index order.
pub fn all() -> Vec<Section> {
    ordered_indices()
        .into_iter()
        .filter_map(|index| {
            let id = get_id(index)?;
            let label = get_label(index)?;
            Some(Section {
                index,
                id,
                label,
                order_index: arrays::get_order_index(index),
            })
        })
        .collect()
}

// =============================================================================
// Reset (unmount / testing)
// =============================================================================

/// Reset all registry state.
pub fn reset_registry() {
    ID_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_ID.with(|map| map.borrow_mut().clear());
    LABELS.with(|map| map.borrow_mut().clear());
    REGISTERED.with(|set| set.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    arrays::reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_registry();
    }

    #[test]
    fn test_register_allocates_dense_indices() {
        setup();

        let home = register("home", "Home", 0).unwrap();
        let about = register("about", "About", 1).unwrap();

        assert_eq!(home, 0);
        assert_eq!(about, 1);
        assert!(is_registered(home));
        assert!(!is_registered(2));
        assert_eq!(count(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        setup();

        register("home", "Home", 0).unwrap();
        let err = register("home", "Home again", 7).unwrap_err();
        assert_eq!(err, Error::DuplicateId("home".to_string()));

        // The original registration is untouched.
        assert_eq!(count(), 1);
        assert_eq!(get_label(0).as_deref(), Some("Home"));
    }

    #[test]
    fn test_id_mapping() {
        setup();

        let index = register("skills", "Skills", 2).unwrap();
        assert_eq!(get_index("skills"), Some(index));
        assert_eq!(get_id(index).as_deref(), Some("skills"));
        assert_eq!(get_index("missing"), None);
    }

    #[test]
    fn test_ordered_iteration() {
        setup();

        // Registered out of order on purpose.
        register("contact", "Contact", 5).unwrap();
        register("home", "Home", 0).unwrap();
        register("about", "About", 1).unwrap();

        let ids: Vec<String> = all().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["home", "about", "contact"]);
    }

    #[test]
    fn test_equal_order_indices_stable() {
        setup();

        let a = register("a", "A", 3).unwrap();
        let b = register("b", "B", 3).unwrap();

        assert_eq!(ordered_indices(), vec![a, b]);
    }

    #[test]
    fn test_register_with_band() {
        setup();

        let index = register_with_band("contact", "Contact", 5, 0.1).unwrap();
        assert_eq!(arrays::get_reveal_ratio(index), Some(0.1));
    }
}
