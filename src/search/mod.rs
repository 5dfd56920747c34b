//! Search domain: a read-only item list scanned for a key.
//!
//! Only the cursor, the comparison count and the completion fields of a
//! [`SearchState`] change while a search runs; the items and the key are
//! shared between every snapshot.

pub mod binary;
pub mod catalog;
pub mod event;
pub mod linear;
pub mod state;

use crate::engine::StepPublisher;
use std::fmt::Debug;

pub use binary::BinarySearch;
pub use catalog::{search_catalog, SearchCatalog};
pub use event::{SearchEvent, SearchEventKind};
pub use linear::LinearSearch;
pub use state::{SearchResult, SearchState};

/// Bound shared by every searchable item type.
pub trait Searchable: Ord + Clone + Debug + Send + Sync + 'static {}

impl<T> Searchable for T where T: Ord + Clone + Debug + Send + Sync + 'static {}

pub type SearchPublisher<'a, T> = StepPublisher<'a, SearchState<T>, SearchEvent<T>>;

/// Publish the terminal `Found`/`NotFound` event, then `Complete`.
async fn finish<T: Searchable>(
    state: &mut SearchState<T>,
    publisher: &mut SearchPublisher<'_, T>,
    key: &T,
    found: Option<(T, usize)>,
) -> crate::error::Result<()> {
    let matched = found.is_some();
    match found {
        Some((item, index)) => {
            state.record_match(index);
            publisher.publish(state, SearchEvent::found(&item, index, key)).await?;
        }
        None => publisher.publish(state, SearchEvent::not_found(key)).await?,
    }

    publisher.checkpoint()?;
    state.mark_complete();
    publisher.publish(state, SearchEvent::complete(key, matched)).await
}
