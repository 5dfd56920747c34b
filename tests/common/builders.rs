//! Test data builders for creating sorting inputs

use algovis_rs::{SortingItem, SortingState};

/// Builder for labeled sorting inputs
#[derive(Default)]
pub struct StateBuilder {
    items: Vec<SortingItem>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, value: i32, label: &str) -> Self {
        self.items.push(SortingItem::new(value, label));
        self
    }

    /// Append values labelled `item-NNNN` by their position.
    pub fn values(mut self, values: &[i32]) -> Self {
        let offset = self.items.len();
        for (i, value) in values.iter().enumerate() {
            self.items
                .push(SortingItem::new(*value, format!("item-{:04}", offset + i)));
        }
        self
    }

    pub fn build(self) -> SortingState {
        SortingState::new(self.items)
    }
}

/// The labeled example used across stability tests
pub fn labeled_example() -> SortingState {
    StateBuilder::new()
        .item(4, "A")
        .item(2, "B")
        .item(2, "C")
        .item(3, "D")
        .item(1, "E")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_builder() {
        let state = StateBuilder::new().item(9, "x").values(&[1, 2]).build();

        assert_eq!(state.values(), vec![9, 1, 2]);
        assert_eq!(state.stable_ids(), vec!["x", "item-0001", "item-0002"]);
    }
}
