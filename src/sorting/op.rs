//! Sorting operations: the event half of every sorting step.
//!
//! Indices are `usize`, so a negative index cannot be constructed in
//! memory. The serialised form uses signed integers for interop with
//! external renderers; deserialising a negative index fails with
//! [`EngineError::NegativeIndex`].

use crate::engine::step::StepEvent;
use crate::error::{EngineError, Result};
use crate::sorting::item::SortingItem;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOpKind {
    Highlight,
    Compare,
    Swap,
    Insert,
    Pivot,
    Partition,
    Finalize,
}

impl SortOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOpKind::Highlight => "Highlight",
            SortOpKind::Compare => "Compare",
            SortOpKind::Swap => "Swap",
            SortOpKind::Insert => "Insert",
            SortOpKind::Pivot => "Pivot",
            SortOpKind::Partition => "Partition",
            SortOpKind::Finalize => "Finalize",
        }
    }
}

impl fmt::Display for SortOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instrumented sorting action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSortOp", into = "RawSortOp")]
pub enum SortOp {
    Highlight { index: usize, message: String },
    Compare { left: usize, right: usize },
    Swap { left: usize, right: usize },
    /// `item` is an owned copy, decoupled from the mutable state.
    Insert {
        source: usize,
        target: usize,
        item: SortingItem,
    },
    Pivot { index: usize },
    Partition { left: usize, right: usize },
    Finalize { message: String },
}

impl SortOp {
    pub fn highlight(index: usize, message: impl Into<String>) -> Self {
        SortOp::Highlight {
            index,
            message: message.into(),
        }
    }

    pub fn compare(left: usize, right: usize) -> Self {
        SortOp::Compare { left, right }
    }

    pub fn swap(left: usize, right: usize) -> Self {
        SortOp::Swap { left, right }
    }

    pub fn insert(source: usize, target: usize, item: &SortingItem) -> Self {
        SortOp::Insert {
            source,
            target,
            item: item.clone(),
        }
    }

    pub fn pivot(index: usize) -> Self {
        SortOp::Pivot { index }
    }

    pub fn partition(left: usize, right: usize) -> Self {
        SortOp::Partition { left, right }
    }

    pub fn finalize(message: impl Into<String>) -> Self {
        SortOp::Finalize {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> SortOpKind {
        match self {
            SortOp::Highlight { .. } => SortOpKind::Highlight,
            SortOp::Compare { .. } => SortOpKind::Compare,
            SortOp::Swap { .. } => SortOpKind::Swap,
            SortOp::Insert { .. } => SortOpKind::Insert,
            SortOp::Pivot { .. } => SortOpKind::Pivot,
            SortOp::Partition { .. } => SortOpKind::Partition,
            SortOp::Finalize { .. } => SortOpKind::Finalize,
        }
    }

    /// Human-readable label. Kinds without a custom message use their name.
    pub fn message(&self) -> &str {
        match self {
            SortOp::Highlight { message, .. } | SortOp::Finalize { message } => message.as_str(),
            other => other.kind().as_str(),
        }
    }

    pub fn primary_index(&self) -> Option<usize> {
        match *self {
            SortOp::Highlight { index, .. } | SortOp::Pivot { index } => Some(index),
            SortOp::Compare { left, .. }
            | SortOp::Swap { left, .. }
            | SortOp::Partition { left, .. } => Some(left),
            SortOp::Insert { source, .. } => Some(source),
            SortOp::Finalize { .. } => None,
        }
    }

    pub fn secondary_index(&self) -> Option<usize> {
        match *self {
            SortOp::Compare { right, .. }
            | SortOp::Swap { right, .. }
            | SortOp::Partition { right, .. } => Some(right),
            SortOp::Insert { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn item(&self) -> Option<&SortingItem> {
        match self {
            SortOp::Insert { item, .. } => Some(item),
            _ => None,
        }
    }
}

impl StepEvent for SortOp {
    fn kind(&self) -> &'static str {
        SortOp::kind(self).as_str()
    }
}

impl fmt::Display for SortOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOp::Highlight { index, message } => write!(f, "Highlight({index}): {message}"),
            SortOp::Compare { left, right } => write!(f, "Compare({left}, {right})"),
            SortOp::Swap { left, right } => write!(f, "Swap({left}, {right})"),
            SortOp::Insert { source, target, item } => {
                write!(f, "Insert({source} -> {target}, {item})")
            }
            SortOp::Pivot { index } => write!(f, "Pivot({index})"),
            SortOp::Partition { left, right } => write!(f, "Partition({left}, {right})"),
            SortOp::Finalize { message } => write!(f, "Finalize: {message}"),
        }
    }
}

/// Wire form with signed indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
enum RawSortOp {
    Highlight { index: i64, message: String },
    Compare { left: i64, right: i64 },
    Swap { left: i64, right: i64 },
    Insert {
        source: i64,
        target: i64,
        item: SortingItem,
    },
    Pivot { index: i64 },
    Partition { left: i64, right: i64 },
    Finalize { message: String },
}

fn non_negative(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| EngineError::NegativeIndex { name, value })
}

fn signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

impl TryFrom<RawSortOp> for SortOp {
    type Error = EngineError;

    fn try_from(raw: RawSortOp) -> Result<Self> {
        Ok(match raw {
            RawSortOp::Highlight { index, message } => {
                SortOp::highlight(non_negative("index", index)?, message)
            }
            RawSortOp::Compare { left, right } => {
                SortOp::compare(non_negative("left", left)?, non_negative("right", right)?)
            }
            RawSortOp::Swap { left, right } => {
                SortOp::swap(non_negative("left", left)?, non_negative("right", right)?)
            }
            RawSortOp::Insert { source, target, item } => SortOp::Insert {
                source: non_negative("source", source)?,
                target: non_negative("target", target)?,
                item,
            },
            RawSortOp::Pivot { index } => SortOp::pivot(non_negative("index", index)?),
            RawSortOp::Partition { left, right } => {
                SortOp::partition(non_negative("left", left)?, non_negative("right", right)?)
            }
            RawSortOp::Finalize { message } => SortOp::finalize(message),
        })
    }
}

impl From<SortOp> for RawSortOp {
    fn from(op: SortOp) -> Self {
        match op {
            SortOp::Highlight { index, message } => RawSortOp::Highlight {
                index: signed(index),
                message,
            },
            SortOp::Compare { left, right } => RawSortOp::Compare {
                left: signed(left),
                right: signed(right),
            },
            SortOp::Swap { left, right } => RawSortOp::Swap {
                left: signed(left),
                right: signed(right),
            },
            SortOp::Insert { source, target, item } => RawSortOp::Insert {
                source: signed(source),
                target: signed(target),
                item,
            },
            SortOp::Pivot { index } => RawSortOp::Pivot {
                index: signed(index),
            },
            SortOp::Partition { left, right } => RawSortOp::Partition {
                left: signed(left),
                right: signed(right),
            },
            SortOp::Finalize { message } => RawSortOp::Finalize { message },
        }
    }
}
