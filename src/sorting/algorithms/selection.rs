use crate::engine::Algorithm;
use crate::error::Result;
use crate::sorting::{SortOp, SortPublisher, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Selection sort complete";

/// Scans for the minimum of the unsorted suffix; at most one swap per pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl SelectionSort {
    pub const ID: &'static str = "selection-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for SelectionSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        for i in 0..len - 1 {
            publisher.checkpoint()?;
            let mut min = i;
            publisher.publish(state, SortOp::highlight(i, "Select pivot")).await?;

            for j in i + 1..len {
                publisher.checkpoint()?;
                publisher.publish(state, SortOp::compare(min, j)).await?;
                if state[j].value() < state[min].value() {
                    min = j;
                }
            }

            if min != i {
                state.swap(i, min)?;
                publisher.publish(state, SortOp::swap(i, min)).await?;
            }
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::algorithms::test_support::run_sort;
    use crate::sorting::SortOpKind;

    #[tokio::test]
    async fn test_one_swap_per_displaced_minimum() {
        let (result, ops) = run_sort(&SelectionSort, &[3, 1, 2]).await.unwrap();
        assert_eq!(result.values(), vec![1, 2, 3]);

        let swaps: Vec<_> = ops.iter().filter(|op| op.kind() == SortOpKind::Swap).collect();
        assert_eq!(swaps, vec![&SortOp::swap(0, 1), &SortOp::swap(1, 2)]);
    }
}
