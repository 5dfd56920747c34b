//! Instrumented sorting algorithm units.
//!
//! Every unit is a stateless strategy. Shared conventions:
//! - Inputs of length 0 or 1 publish a single `Finalize` and return.
//! - A `Compare` or `Highlight` is published before the `Swap`/`Insert` it
//!   justifies.
//! - [`StepPublisher::checkpoint`](crate::engine::StepPublisher::checkpoint)
//!   runs before every unit of work; a cancelled run never publishes
//!   `Finalize`.

mod bubble;
mod counting;
mod heap;
mod insertion;
mod merge;
mod quick;
mod radix;
mod selection;
mod shell;

pub use bubble::BubbleSort;
pub use counting::{CountingSort, MAX_COUNTING_RANGE};
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use radix::RadixSort;
pub use selection::SelectionSort;
pub use shell::ShellSort;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::engine::{Algorithm, CancelSignal, Runner, SharedSink};
    use crate::error::Result;
    use crate::sinks::RecordingSink;
    use crate::sorting::{SortOp, SortOpKind, SortingState};
    use std::sync::Arc;

    /// Run `algorithm` over `values` and return the result plus every op.
    pub(crate) async fn run_sort(
        algorithm: &dyn Algorithm<SortingState, SortOp>,
        values: &[i32],
    ) -> Result<(SortingState, Vec<SortOp>)> {
        let recorder = Arc::new(RecordingSink::<SortingState, SortOp>::new());
        let runner = Runner::new(vec![recorder.clone() as SharedSink<SortingState, SortOp>]);
        let input = SortingState::from_values(values.iter().copied());

        let result = runner
            .execute(algorithm, &input, &CancelSignal::new())
            .await?;
        let ops = recorder
            .steps()
            .into_iter()
            .map(|step| step.event().clone())
            .collect();
        Ok((result, ops))
    }

    pub(crate) fn kinds(ops: &[SortOp]) -> Vec<SortOpKind> {
        ops.iter().map(SortOp::kind).collect()
    }
}
