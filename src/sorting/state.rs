//! The sortable collection an algorithm mutates.
//!
//! Length never changes once a state is built: the only mutations are
//! [`swap`](SortingState::swap), [`replace`](SortingState::replace) and
//! [`move_item`](SortingState::move_item), each of which validates its
//! indices first. `Clone` is a full deep copy and is the isolation
//! primitive the runner relies on.

use crate::error::{EngineError, Result};
use crate::sorting::item::SortingItem;
use serde::{Deserialize, Serialize};
use std::ops::Index;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortingState {
    items: Vec<SortingItem>,
}

impl SortingState {
    pub fn new(items: Vec<SortingItem>) -> Self {
        Self { items }
    }

    /// Label each value with its input position (`item-0000`, `item-0001`, ...).
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Self {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| SortingItem::new(value, format!("item-{index:04}")))
            .collect()
    }

    pub fn from_labeled_values<L: Into<String>>(values: impl IntoIterator<Item = (i32, L)>) -> Self {
        values
            .into_iter()
            .map(|(value, label)| SortingItem::new(value, label))
            .collect()
    }

    pub fn items(&self) -> &[SortingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SortingItem> {
        self.items.get(index)
    }

    pub fn values(&self) -> Vec<i32> {
        self.items.iter().map(SortingItem::value).collect()
    }

    pub fn stable_ids(&self) -> Vec<&str> {
        self.items.iter().map(SortingItem::stable_id).collect()
    }

    pub fn swap(&mut self, left: usize, right: usize) -> Result<()> {
        self.check_index("left", left)?;
        self.check_index("right", right)?;
        self.items.swap(left, right);
        Ok(())
    }

    pub fn replace(&mut self, index: usize, item: SortingItem) -> Result<()> {
        self.check_index("index", index)?;
        self.items[index] = item;
        Ok(())
    }

    /// Remove the item at `source` and reinsert it at `target`.
    ///
    /// `target` may equal `len()`, which moves the item to the end.
    pub fn move_item(&mut self, source: usize, target: usize) -> Result<()> {
        self.check_index("source", source)?;
        if target > self.items.len() {
            return Err(EngineError::IndexOutOfRange {
                name: "target",
                index: target,
                len: self.items.len(),
            });
        }

        let item = self.items.remove(source);
        if target >= self.items.len() {
            self.items.push(item);
        } else {
            self.items.insert(target, item);
        }
        Ok(())
    }

    fn check_index(&self, name: &'static str, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(EngineError::IndexOutOfRange {
                name,
                index,
                len: self.items.len(),
            })
        }
    }
}

impl Index<usize> for SortingState {
    type Output = SortingItem;

    fn index(&self, index: usize) -> &SortingItem {
        &self.items[index]
    }
}

impl FromIterator<SortingItem> for SortingState {
    fn from_iter<I: IntoIterator<Item = SortingItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
