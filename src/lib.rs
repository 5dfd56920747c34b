//! # AlgoVis-RS: Instrumented Algorithm Execution Engine
//!
//! Runs step-by-step algorithms (sorting, searching) against a private copy
//! of the caller's input and publishes an immutable snapshot of the state
//! after every observable mutation. Observers ("sinks") receive those
//! snapshots in order and may keep them, forward them to a render thread,
//! log them, or export them.
//!
//! ## Architecture
//!
//! - **Engine**: generic runner, step publisher, catalog and pipeline
//! - **Sinks**: recording, crossbeam channel, tracing and JSON-lines observers
//! - **Sorting**: nine instrumented sorts over labeled integer items
//! - **Search**: linear and binary search over any ordered item type
//! - **Communication**: async sinks awaited in registration order, with
//!   cooperative cancellation through [`CancelSignal`]
//!
//! ## Configuration
//!
//! [`EngineConfig`] is a TOML document covering pacing, channel sinks,
//! logging and the default algorithm. See [`config`].
//!
//! ## Example
//!
//! ```ignore
//! use algovis_rs::{
//!     config::EngineConfig,
//!     sinks::ChannelSink,
//!     sorting::{SortingEngine, SortingState},
//!     CancelSignal,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> algovis_rs::Result<()> {
//!     let config = EngineConfig::load_or_default("algovis.toml");
//!     let _guard = algovis_rs::logging::init(&config.logging);
//!
//!     let (sink, frames) = ChannelSink::from_config(&config.channel)?;
//!     std::thread::spawn(move || {
//!         for message in frames {
//!             println!("{:?}", message.snapshot().values());
//!         }
//!     });
//!
//!     let engine = SortingEngine::with_config(vec![Arc::new(sink)], &config)?;
//!     let input = SortingState::from_values([5, 3, 8, 1]);
//!     let sorted = engine.execute_default(&input, &CancelSignal::new()).await?;
//!     assert_eq!(sorted.values(), vec![1, 3, 5, 8]);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod search;
pub mod sinks;
pub mod sorting;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{
    Algorithm, CancelSignal, Catalog, Descriptor, Pacing, Pipeline, Runner, SharedSink, Step,
    StepEvent, StepPublisher, StepSink,
};
pub use error::{AlgorithmError, EngineError, Result};
pub use search::{BinarySearch, LinearSearch, SearchEvent, SearchState};
pub use sorting::{SortOp, SortingEngine, SortingItem, SortingState};
