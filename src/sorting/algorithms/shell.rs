use crate::engine::Algorithm;
use crate::error::Result;
use crate::sorting::{SortOp, SortPublisher, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Shell sort complete";

/// Gapped insertion sort over the halving gap sequence `n/2, n/4, ..., 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSort;

impl ShellSort {
    pub const ID: &'static str = "shell-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for ShellSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        let mut gap = len / 2;
        while gap > 0 {
            for i in gap..len {
                publisher.checkpoint()?;
                publisher
                    .publish(state, SortOp::highlight(i, format!("Gap {gap} insertion")))
                    .await?;

                let current = state[i].clone();
                let mut position = i;
                while position >= gap {
                    publisher.checkpoint()?;
                    publisher.publish(state, SortOp::compare(position - gap, position)).await?;
                    if state[position - gap].value() <= current.value() {
                        break;
                    }

                    let shifted = state[position - gap].clone();
                    let op = SortOp::insert(position - gap, position, &shifted);
                    state.replace(position, shifted)?;
                    publisher.publish(state, op).await?;
                    position -= gap;
                }

                if position != i {
                    let op = SortOp::insert(i, position, &current);
                    state.replace(position, current)?;
                    publisher.publish(state, op).await?;
                }
            }
            gap /= 2;
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}
