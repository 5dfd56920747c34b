use crate::engine::Algorithm;
use crate::error::Result;
use crate::sorting::{SortOp, SortPublisher, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Quick sort complete";

/// Lomuto partition quick sort with the last element of each range as pivot.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl QuickSort {
    pub const ID: &'static str = "quick-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for QuickSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        // Ranges are inclusive; the left range is pushed last so it is sorted first.
        let mut ranges = vec![(0, len - 1)];
        while let Some((left, right)) = ranges.pop() {
            if left >= right {
                continue;
            }
            publisher.checkpoint()?;
            let pivot = partition(state, publisher, left, right).await?;
            ranges.push((pivot + 1, right));
            if pivot > left {
                ranges.push((left, pivot - 1));
            }
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}

async fn partition(
    state: &mut SortingState,
    publisher: &mut SortPublisher<'_>,
    left: usize,
    right: usize,
) -> Result<usize> {
    let pivot_value = state[right].value();
    let mut store = left;
    publisher.publish(state, SortOp::pivot(right)).await?;

    for i in left..right {
        publisher.checkpoint()?;
        publisher.publish(state, SortOp::compare(i, right)).await?;
        if state[i].value() <= pivot_value {
            if i != store {
                state.swap(store, i)?;
                publisher.publish(state, SortOp::swap(store, i)).await?;
            }
            store += 1;
        }
    }

    if store != right {
        state.swap(store, right)?;
        publisher.publish(state, SortOp::swap(store, right)).await?;
    }
    publisher.publish(state, SortOp::partition(left, right)).await?;
    Ok(store)
}
