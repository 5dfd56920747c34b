use crate::engine::{Catalog, Descriptor};
use crate::error::Result;
use crate::search::{BinarySearch, LinearSearch, SearchEvent, SearchState, Searchable};

pub type SearchCatalog<T> = Catalog<SearchState<T>, SearchEvent<T>>;
pub type SearchDescriptor<T> = Descriptor<SearchState<T>, SearchEvent<T>>;

/// Registry of the search units for item type `T`.
///
/// Searches never reorder items, so their descriptors carry no stability key.
pub fn search_catalog<T: Searchable>() -> Result<SearchCatalog<T>> {
    Catalog::new(vec![
        SearchDescriptor::<T>::builder(LinearSearch::ID, "Linear Search")
            .description("Examines each item from left to right until the key is found.")
            .complexity("O(n)", "O(1)", "O(n)")
            .factory(|| Box::new(LinearSearch))
            .build()?,
        SearchDescriptor::<T>::builder(BinarySearch::ID, "Binary Search")
            .description("Halves a sorted range on every comparison.")
            .complexity("O(log n)", "O(1)", "O(log n)")
            .factory(|| Box::new(BinarySearch))
            .build()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CancelSignal, Pipeline, Runner, STABILITY};

    #[tokio::test]
    async fn test_pipeline_over_search_catalog() {
        let catalog = search_catalog::<char>().unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["linear-search", "binary-search"]);

        let pipeline = Pipeline::from_catalog(Runner::new(Vec::new()), &catalog).unwrap();
        let state = SearchState::new(vec!['a', 'c', 'e', 'g'], 'e');
        let result = pipeline
            .execute("binary-search", &state, &CancelSignal::new())
            .await
            .unwrap();

        assert_eq!(result.result().map(|r| r.index), Some(2));
        assert!(!state.is_complete());
    }

    #[test]
    fn test_search_descriptors_carry_no_stability() {
        let catalog = search_catalog::<i64>().unwrap();
        for descriptor in catalog.descriptors() {
            assert_eq!(descriptor.stability(), None);
            assert!(!descriptor.metadata().contains_key(STABILITY));
            assert!(descriptor.complexity_average().is_some());
        }
    }
}
