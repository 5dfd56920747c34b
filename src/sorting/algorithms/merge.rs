use crate::engine::Algorithm;
use crate::error::Result;
use crate::sorting::{SortOp, SortPublisher, SortingItem, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Merge sort complete";

/// Top-down merge sort. Ties take the left run first, which keeps it stable.
///
/// The recursion is driven by an explicit stack of inclusive ranges, visited
/// in the same order a recursive implementation would (left half, right
/// half, then the merge of both).
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl MergeSort {
    pub const ID: &'static str = "merge-sort";
}

enum Frame {
    Split { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for MergeSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        let mut stack = vec![Frame::Split {
            left: 0,
            right: len - 1,
        }];
        while let Some(frame) = stack.pop() {
            publisher.checkpoint()?;
            match frame {
                Frame::Split { left, right } if left < right => {
                    let mid = left + (right - left) / 2;
                    stack.push(Frame::Merge { left, mid, right });
                    stack.push(Frame::Split { left: mid + 1, right });
                    stack.push(Frame::Split { left, right: mid });
                }
                Frame::Split { .. } => {}
                Frame::Merge { left, mid, right } => {
                    merge(state, publisher, left, mid, right).await?;
                }
            }
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}

/// Merge the sorted runs `[left, mid]` and `[mid + 1, right]`.
///
/// Each write is published as an `Insert` tagged with the slot the item
/// actually came from.
async fn merge(
    state: &mut SortingState,
    publisher: &mut SortPublisher<'_>,
    left: usize,
    mid: usize,
    right: usize,
) -> Result<()> {
    publisher
        .publish(state, SortOp::highlight(left, format!("Merge range [{left}, {right}]")))
        .await?;

    let mut buffer: Vec<(usize, SortingItem)> = Vec::with_capacity(right - left + 1);
    let (mut l, mut r) = (left, mid + 1);
    while l <= mid && r <= right {
        publisher.checkpoint()?;
        publisher.publish(state, SortOp::compare(l, r)).await?;

        if state[l].value() <= state[r].value() {
            buffer.push((l, state[l].clone()));
            l += 1;
        } else {
            buffer.push((r, state[r].clone()));
            r += 1;
        }
    }
    buffer.extend((l..=mid).map(|i| (i, state[i].clone())));
    buffer.extend((r..=right).map(|i| (i, state[i].clone())));

    for (offset, (source, item)) in buffer.into_iter().enumerate() {
        publisher.checkpoint()?;
        let target = left + offset;
        let op = SortOp::insert(source, target, &item);
        state.replace(target, item)?;
        publisher.publish(state, op).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::algorithms::test_support::run_sort;
    use crate::sorting::SortOpKind;

    #[tokio::test]
    async fn test_inserts_carry_true_source_index() {
        let (result, ops) = run_sort(&MergeSort, &[2, 1]).await.unwrap();
        assert_eq!(result.values(), vec![1, 2]);

        let inserts: Vec<_> = ops
            .iter()
            .filter(|op| op.kind() == SortOpKind::Insert)
            .map(|op| (op.primary_index(), op.secondary_index(), op.item().map(|i| i.value())))
            .collect();
        assert_eq!(
            inserts,
            vec![(Some(1), Some(0), Some(1)), (Some(0), Some(1), Some(2))]
        );
    }

    #[tokio::test]
    async fn test_highlights_each_merged_range() {
        let (_, ops) = run_sort(&MergeSort, &[4, 3, 2, 1]).await.unwrap();
        let ranges: Vec<_> = ops
            .iter()
            .filter(|op| op.kind() == SortOpKind::Highlight)
            .map(|op| op.message().to_string())
            .collect();
        assert_eq!(
            ranges,
            vec!["Merge range [0, 1]", "Merge range [2, 3]", "Merge range [0, 3]"]
        );
    }
}
