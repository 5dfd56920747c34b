use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where (and after how many comparisons) the key was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub item: T,
    pub index: usize,
    pub comparisons: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState<T> {
    items: Arc<[T]>,
    key: T,
    current_index: Option<usize>,
    comparisons: usize,
    is_complete: bool,
    result: Option<SearchResult<T>>,
}

impl<T: Clone> SearchState<T> {
    pub fn new(items: impl Into<Arc<[T]>>, key: T) -> Self {
        Self {
            items: items.into(),
            key,
            current_index: None,
            comparisons: 0,
            is_complete: false,
            result: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn key(&self) -> &T {
        &self.key
    }

    /// Index of the item compared most recently.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn result(&self) -> Option<&SearchResult<T>> {
        self.result.as_ref()
    }

    /// Move the cursor to `index` and count one comparison.
    pub(crate) fn inspect(&mut self, index: usize) -> Option<&T> {
        self.current_index = Some(index);
        self.comparisons += 1;
        self.items.get(index)
    }

    pub(crate) fn record_match(&mut self, index: usize) {
        self.result = self.items.get(index).map(|item| SearchResult {
            item: item.clone(),
            index,
            comparisons: self.comparisons,
        });
    }

    pub(crate) fn mark_complete(&mut self) {
        self.is_complete = true;
    }
}
