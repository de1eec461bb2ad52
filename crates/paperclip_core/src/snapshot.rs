use std::collections::HashMap;

use crate::{Ad, AdId, Category, CategoryId};

/// Name shown for ads whose category is not part of the loaded set.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A committed, internally consistent pair of category and ad collections.
///
/// Snapshots are immutable once built. The repository replaces them wholesale
/// and readers share them behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    generation: u64,
    categories: Vec<Category>,
    ads: Vec<Ad>,
    category_names: HashMap<CategoryId, String>,
}

impl Snapshot {
    /// The empty snapshot held before the first successful refresh.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(generation: u64, categories: Vec<Category>, ads: Vec<Ad>) -> Self {
        let category_names = categories
            .iter()
            .map(|category| (category.id, category.name.clone()))
            .collect();
        Self {
            generation,
            categories,
            ads,
            category_names,
        }
    }

    /// Commit counter: 0 for the initial empty snapshot, +1 per successful refresh.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn ads(&self) -> &[Ad] {
        &self.ads
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.ads.is_empty()
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn ad(&self, id: AdId) -> Option<&Ad> {
        self.ads.iter().find(|ad| ad.id == id)
    }

    /// Display name of a category, or [`UNKNOWN_CATEGORY`] when it is not loaded.
    pub fn category_name(&self, id: CategoryId) -> &str {
        self.category_names
            .get(&id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_generation_zero() {
        let snapshot = Snapshot::empty();
        assert_eq!(snapshot.generation(), 0);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.category_name(1), UNKNOWN_CATEGORY);
    }

    #[test]
    fn category_names_are_indexed_at_construction() {
        let snapshot = Snapshot::new(
            3,
            vec![
                Category { id: 1, name: "Véhicule".into() },
                Category { id: 5, name: "Maison".into() },
            ],
            Vec::new(),
        );
        assert_eq!(snapshot.generation(), 3);
        assert_eq!(snapshot.category_name(5), "Maison");
        assert_eq!(snapshot.category_name(999), "Unknown");
        assert!(!snapshot.is_empty());
    }
}
