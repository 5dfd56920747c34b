use crate::engine::StepEvent;
use crate::search::Searchable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchEventKind {
    Examine,
    Found,
    NotFound,
    Complete,
}

impl SearchEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEventKind::Examine => "Examine",
            SearchEventKind::Found => "Found",
            SearchEventKind::NotFound => "NotFound",
            SearchEventKind::Complete => "Complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEvent<T> {
    pub kind: SearchEventKind,
    pub item: Option<T>,
    pub index: Option<usize>,
    pub key: T,
    pub is_match: bool,
}

impl<T: Clone> SearchEvent<T> {
    pub fn examine(item: &T, index: usize, key: &T, is_match: bool) -> Self {
        Self {
            kind: SearchEventKind::Examine,
            item: Some(item.clone()),
            index: Some(index),
            key: key.clone(),
            is_match,
        }
    }

    pub fn found(item: &T, index: usize, key: &T) -> Self {
        Self {
            kind: SearchEventKind::Found,
            item: Some(item.clone()),
            index: Some(index),
            key: key.clone(),
            is_match: true,
        }
    }

    pub fn not_found(key: &T) -> Self {
        Self {
            kind: SearchEventKind::NotFound,
            item: None,
            index: None,
            key: key.clone(),
            is_match: false,
        }
    }

    pub fn complete(key: &T, found: bool) -> Self {
        Self {
            kind: SearchEventKind::Complete,
            item: None,
            index: None,
            key: key.clone(),
            is_match: found,
        }
    }
}

impl<T: Searchable> StepEvent for SearchEvent<T> {
    fn kind(&self) -> &'static str {
        self.kind.as_str()
    }
}
