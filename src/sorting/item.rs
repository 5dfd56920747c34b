use serde::{Deserialize, Serialize};
use std::fmt;

/// A sort key paired with the identity label used to check stability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingItem {
    value: i32,
    stable_id: String,
}

impl SortingItem {
    pub fn new(value: i32, stable_id: impl Into<String>) -> Self {
        Self {
            value,
            stable_id: stable_id.into(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn stable_id(&self) -> &str {
        &self.stable_id
    }
}

impl fmt::Display for SortingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.stable_id)
    }
}
