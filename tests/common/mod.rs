//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod sinks;

use algovis_rs::sinks::RecordingSink;
use algovis_rs::sorting::{SortOp, SortSink, SortingState};
use std::sync::Arc;
use std::time::Duration;

/// Create a test timeout duration
pub fn test_timeout() -> Duration {
    Duration::from_millis(100)
}

pub type SortRecorder = RecordingSink<SortingState, SortOp>;

/// A recording sink plus the shared handle the runner needs.
pub fn recorder() -> (Arc<SortRecorder>, SortSink) {
    let recorder = Arc::new(SortRecorder::new());
    let shared: SortSink = recorder.clone();
    (recorder, shared)
}

/// Every sort id in the default catalog.
pub fn sort_ids() -> Vec<String> {
    algovis_rs::sorting::default_catalog()
        .expect("default catalog")
        .ids()
        .map(str::to_string)
        .collect()
}
