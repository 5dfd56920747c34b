use crate::engine::Algorithm;
use crate::error::{AlgorithmError, Result};
use crate::sorting::{SortOp, SortPublisher, SortingItem, SortingState};
use async_trait::async_trait;

const COMPLETE: &str = "Counting sort complete";

/// Largest `max - min + 1` bucket range counting sort will allocate.
///
/// One `usize` counter per bucket, so the bucket table never exceeds 8 MiB
/// on 64-bit targets regardless of input length.
pub const MAX_COUNTING_RANGE: i64 = 1 << 20;

/// Buckets by offset from the minimum key, then writes back right to left
/// so equal keys keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingSort;

impl CountingSort {
    pub const ID: &'static str = "counting-sort";
}

#[async_trait]
impl Algorithm<SortingState, SortOp> for CountingSort {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(&self, state: &mut SortingState, publisher: &mut SortPublisher<'_>) -> Result<()> {
        let len = state.len();
        if len <= 1 {
            return publisher.publish(state, SortOp::finalize(COMPLETE)).await;
        }

        let mut min = i64::from(state[0].value());
        let mut max = min;
        for item in state.items() {
            publisher.checkpoint()?;
            let value = i64::from(item.value());
            min = min.min(value);
            max = max.max(value);
        }

        let range = max - min + 1;
        if range <= 0 || range > MAX_COUNTING_RANGE {
            return Err(AlgorithmError::InvalidRange {
                algorithm: Self::ID,
                min,
                max,
            }
            .into());
        }
        let bucket = |value: i32| (i64::from(value) - min) as usize;

        let mut counts = vec![0usize; range as usize];
        for i in 0..len {
            publisher.checkpoint()?;
            publisher.publish(state, SortOp::highlight(i, "Count value")).await?;
            counts[bucket(state[i].value())] += 1;
        }

        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }

        let mut output: Vec<Option<SortingItem>> = vec![None; len];
        for item in state.items().iter().rev() {
            publisher.checkpoint()?;
            let slot = &mut counts[bucket(item.value())];
            *slot -= 1;
            output[*slot] = Some(item.clone());
        }

        for (i, item) in output.into_iter().enumerate() {
            publisher.checkpoint()?;
            if let Some(item) = item {
                state.replace(i, item)?;
            }
            publisher.publish(state, SortOp::highlight(i, "Write sorted value")).await?;
        }

        publisher.publish(state, SortOp::finalize(COMPLETE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::sorting::algorithms::test_support::run_sort;

    #[tokio::test]
    async fn test_handles_negative_keys() {
        let (result, _) = run_sort(&CountingSort, &[3, -2, 0, -2, 7]).await.unwrap();
        assert_eq!(result.values(), vec![-2, -2, 0, 3, 7]);
        assert_eq!(result.stable_ids()[..2], ["item-0001", "item-0003"]);
    }

    #[tokio::test]
    async fn test_range_cap_bounds_bucket_table() {
        let (result, _) = run_sort(&CountingSort, &[(MAX_COUNTING_RANGE - 1) as i32, 0])
            .await
            .unwrap();
        assert_eq!(result.values(), vec![0, (MAX_COUNTING_RANGE - 1) as i32]);

        let err = run_sort(&CountingSort, &[0, 16_000_000]).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Algorithm(AlgorithmError::InvalidRange { min: 0, max: 16_000_000, .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_oversized_range() {
        let err = run_sort(&CountingSort, &[i32::MIN, i32::MAX]).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Algorithm(AlgorithmError::InvalidRange { algorithm: "counting-sort", .. })
        ));
    }
}
