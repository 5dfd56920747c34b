use crate::engine::Algorithm;
use crate::error::Result;
use crate::sorting::{SortOp, SortPublisher, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Insertion sort complete";

/// Grows a sorted prefix, moving each new item left past strictly larger keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl InsertionSort {
    pub const ID: &'static str = "insertion-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for InsertionSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        for i in 1..len {
            publisher.checkpoint()?;
            publisher.publish(state, SortOp::highlight(i, "Insert item")).await?;

            let key = state[i].value();
            let mut slot = i;
            while slot > 0 {
                publisher.checkpoint()?;
                publisher.publish(state, SortOp::compare(slot - 1, slot)).await?;
                if state[slot - 1].value() <= key {
                    break;
                }
                slot -= 1;
            }

            if slot != i {
                let item = state[i].clone();
                state.move_item(i, slot)?;
                publisher.publish(state, SortOp::insert(i, slot, &item)).await?;
            }
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::algorithms::test_support::run_sort;
    use crate::sorting::{SortOpKind, SortingItem};

    #[tokio::test]
    async fn test_insert_only_when_position_changes() {
        let (result, ops) = run_sort(&InsertionSort, &[1, 3, 2]).await.unwrap();
        assert_eq!(result.values(), vec![1, 2, 3]);

        let inserts: Vec<_> = ops.iter().filter(|op| op.kind() == SortOpKind::Insert).collect();
        assert_eq!(
            inserts,
            vec![&SortOp::insert(2, 1, &SortingItem::new(2, "item-0002"))]
        );
    }

    #[tokio::test]
    async fn test_sorted_input_never_inserts() {
        let (_, ops) = run_sort(&InsertionSort, &[1, 1, 2, 5]).await.unwrap();
        assert!(ops.iter().all(|op| op.kind() != SortOpKind::Insert));
    }
}
