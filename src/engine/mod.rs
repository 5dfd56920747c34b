//! Generic instrumented-execution engine.
//!
//! Everything in this module is generic over a state type `S` and an event
//! type `E`, so any algorithm domain can reuse it:
//!
//! ```text
//! caller ──► Pipeline::execute(id, &input)
//!               │ Catalog lookup + factory
//!               ▼
//!            Runner::execute(&algorithm, &input)
//!               │ clone ► initialize ► run(publish…) ► complete ► clone
//!               ▼
//!            sinks (registration order, one clone per call)
//! ```

pub mod algorithm;
pub mod cancel;
pub mod catalog;
pub mod pipeline;
pub mod runner;
pub mod sink;
pub mod step;

pub use algorithm::{Algorithm, BoxedAlgorithm, StepPublisher};
pub use cancel::CancelSignal;
pub use catalog::{
    AlgorithmFactory, Catalog, CatalogEntry, Descriptor, DescriptorBuilder, Stability,
    COMPLEXITY_AVERAGE, COMPLEXITY_BEST, COMPLEXITY_WORST, STABILITY,
};
pub use pipeline::Pipeline;
pub use runner::{Pacing, Runner, StateCloner};
pub use sink::{SharedSink, StepSink};
pub use step::{Step, StepEvent};
