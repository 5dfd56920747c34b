use crate::engine::Algorithm;
use crate::error::Result;
use crate::search::{SearchEvent, SearchPublisher, SearchState, Searchable};
use async_trait::async_trait;

/// Left-to-right scan that stops at the first match.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl LinearSearch {
    pub const ID: &'static str = "linear-search";
}

#[async_trait]
impl<T: Searchable> Algorithm<SearchState<T>, SearchEvent<T>> for LinearSearch {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn run(
        &self,
        state: &mut SearchState<T>,
        publisher: &mut SearchPublisher<'_, T>,
    ) -> Result<()> {
        let key = state.key().clone();
        let mut found = None;

        for index in 0..state.items().len() {
            publisher.checkpoint()?;
            let Some(item) = state.inspect(index).cloned() else {
                break;
            };
            let is_match = item == key;
            publisher
                .publish(state, SearchEvent::examine(&item, index, &key, is_match))
                .await?;
            if is_match {
                found = Some((item, index));
                break;
            }
        }

        super::finish(state, publisher, &key, found).await
    }
}
