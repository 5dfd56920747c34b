//! Sorting domain: item/state model, operations, algorithm units and the
//! default catalog.

pub mod algorithms;
pub mod catalog;
pub mod engine;
pub mod item;
pub mod op;
pub mod state;

use crate::engine::StepPublisher;

pub use catalog::{default_catalog, default_descriptors, SortCatalog, SortDescriptor};
pub use engine::{SortSink, SortingEngine};
pub use item::SortingItem;
pub use op::{SortOp, SortOpKind};
pub use state::SortingState;

/// Publish capability handed to sorting units.
pub type SortPublisher<'a> = StepPublisher<'a, SortingState, SortOp>;
