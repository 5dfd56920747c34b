use crate::engine::Algorithm;
use crate::error::{AlgorithmError, Result};
use crate::search::{SearchEvent, SearchPublisher, SearchState, Searchable};
use async_trait::async_trait;
use std::cmp::Ordering;

/// Halving search over non-decreasing items.
///
/// Reports the first matching index it lands on, which is not necessarily
/// the leftmost occurrence of a duplicated key.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl BinarySearch {
    pub const ID: &'static str = "binary-search";
}

#[async_trait]
impl<T: Searchable> Algorithm<SearchState<T>, SearchEvent<T>> for BinarySearch {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(
        &self,
        state: &mut SearchState<T>,
        publisher: &mut SearchPublisher<'_, T>,
    ) -> Result<()> {
        if state.items().windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(AlgorithmError::UnsortedInput { algorithm: Self::ID }.into());
        }

        let key = state.key().clone();
        let mut found = None;
        let (mut low, mut high) = (0, state.items().len());

        while low < high {
            publisher.checkpoint()?;
            let mid = low + (high - low) / 2;
            let Some(item) = state.inspect(mid).cloned() else {
                break;
            };
            let ordering = item.cmp(&key);
            publisher
                .publish(state, SearchEvent::examine(&item, mid, &key, ordering == Ordering::Equal))
                .await?;

            match ordering {
                Ordering::Equal => {
                    found = Some((item, mid));
                    break;
                }
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }

        super::finish(state, publisher, &key, found).await
    }
}
