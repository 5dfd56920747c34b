use crate::engine::Algorithm;
use crate::error::{AlgorithmError, Result};
use crate::sorting::{SortOp, SortPublisher, SortingItem, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Radix sort complete";
const BASE: i64 = 10;

/// LSD radix sort in base 10. Non-negative keys only.
///
/// Each digit pass is a stable counting sort, so the whole sort is stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadixSort;

impl RadixSort {
    pub const ID: &'static str = "radix-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for RadixSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        let mut max = 0i64;
        for item in state.items() {
            if item.value() < 0 {
                return Err(AlgorithmError::NegativeValue {
                    algorithm: Self::ID,
                    value: item.value(),
                }
                .into());
            }
            max = max.max(i64::from(item.value()));
        }

        let digit = |value: i32, exp: i64| ((i64::from(value) / exp) % BASE) as usize;
        let mut exp = 1i64;
        while max / exp > 0 {
            publisher.checkpoint()?;
            let mut counts = [0usize; BASE as usize];

            for i in 0..len {
                publisher.checkpoint()?;
                let d = digit(state[i].value(), exp);
                counts[d] += 1;
                publisher
                    .publish(state, SortOp::highlight(i, format!("Count digit {d} (exp {exp})")))
                    .await?;
            }

            for d in 1..counts.len() {
                counts[d] += counts[d - 1];
            }

            let mut output: Vec<Option<SortingItem>> = vec![None; len];
            for item in state.items().iter().rev() {
                publisher.checkpoint()?;
                let slot = &mut counts[digit(item.value(), exp)];
                *slot -= 1;
                output[*slot] = Some(item.clone());
            }

            for (i, item) in output.into_iter().enumerate() {
                publisher.checkpoint()?;
                if let Some(item) = item {
                    state.replace(i, item)?;
                }
                publisher
                    .publish(state, SortOp::highlight(i, format!("Write digit pass (exp {exp})")))
                    .await?;
            }

            exp *= BASE;
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}
