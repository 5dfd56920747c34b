use crate::engine::Algorithm;
use crate::error::Result;
use crate::sorting::{SortOp, SortPublisher, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Bubble sort complete";

/// Adjacent-swap passes, stopping after the first pass without a swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl BubbleSort {
    pub const ID: &'static str = "bubble-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for BubbleSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        for pass_end in (1..len).rev() {
            publisher.checkpoint()?;
            let mut swapped = false;
            publisher
                .publish(state, SortOp::highlight(pass_end, "Start bubble pass"))
                .await?;

            for index in 0..pass_end {
                publisher.checkpoint()?;
                publisher.publish(state, SortOp::compare(index, index + 1)).await?;

                if state[index].value() > state[index + 1].value() {
                    state.swap(index, index + 1)?;
                    swapped = true;
                    publisher.publish(state, SortOp::swap(index, index + 1)).await?;
                }
            }

            if !swapped {
                break;
            }
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::algorithms::test_support::{kinds, run_sort};
    use crate::sorting::SortOpKind;

    #[tokio::test]
    async fn test_sorts_and_exits_early() {
        let (result, ops) = run_sort(&BubbleSort, &[1, 2, 3]).await.unwrap();
        assert_eq!(result.values(), vec![1, 2, 3]);
        // One pass over sorted input, then stop.
        assert_eq!(
            kinds(&ops),
            vec![
                SortOpKind::Highlight,
                SortOpKind::Compare,
                SortOpKind::Compare,
                SortOpKind::Finalize,
            ]
        );
    }

    #[tokio::test]
    async fn test_swap_follows_compare() {
        let (result, ops) = run_sort(&BubbleSort, &[2, 1]).await.unwrap();
        assert_eq!(result.values(), vec![1, 2]);
        assert_eq!(
            &ops[..3],
            &[
                SortOp::highlight(1, "Start bubble pass"),
                SortOp::compare(0, 1),
                SortOp::swap(0, 1),
            ]
        );
    }
}
