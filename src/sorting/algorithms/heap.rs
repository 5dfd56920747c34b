use crate::engine::Algorithm;
use crate::error::Result;
use crate::sorting::{SortOp, SortPublisher, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Heap sort complete";

/// Builds a max-heap in place, then repeatedly moves the root behind the heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl HeapSort {
    pub const ID: &'static str = "heap-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for HeapSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        for start in (0..=(len - 2) / 2).rev() {
            publisher.checkpoint()?;
            publisher.publish(state, SortOp::highlight(start, "Sift down")).await?;
            sift_down(state, publisher, start, len - 1).await?;
        }

        for end in (1..len).rev() {
            publisher.checkpoint()?;
            publisher.publish(state, SortOp::highlight(0, "Swap heap root")).await?;
            state.swap(0, end)?;
            publisher.publish(state, SortOp::swap(0, end)).await?;
            sift_down(state, publisher, 0, end - 1).await?;
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}

/// Restore the max-heap property for the subtree at `start`, `end` inclusive.
async fn sift_down(
    state: &mut SortingState,
    publisher: &mut SortPublisher<'_>,
    start: usize,
    end: usize,
) -> Result<()> {
    let mut root = start;
    loop {
        publisher.checkpoint()?;
        let left_child = root * 2 + 1;
        if left_child > end {
            return Ok(());
        }

        let mut largest = root;
        publisher.publish(state, SortOp::highlight(root, "Compare children")).await?;
        publisher.publish(state, SortOp::compare(root, left_child)).await?;
        if state[largest].value() < state[left_child].value() {
            largest = left_child;
        }

        let right_child = left_child + 1;
        if right_child <= end {
            publisher.publish(state, SortOp::compare(root, right_child)).await?;
            if state[largest].value() < state[right_child].value() {
                largest = right_child;
            }
        }

        if largest == root {
            return Ok(());
        }
        state.swap(root, largest)?;
        publisher.publish(state, SortOp::swap(root, largest)).await?;
        root = largest;
    }
}
