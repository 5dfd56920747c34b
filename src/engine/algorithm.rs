//! Pluggable algorithm units and the publish capability handed to them.

use crate::engine::cancel::CancelSignal;
use crate::engine::runner::Runner;
use crate::engine::step::{Step, StepEvent};
use crate::error::Result;
use async_trait::async_trait;

/// A stateless, steppable strategy operating on a mutable working state.
///
/// Implementations must publish a step after every observable mutation and
/// call [`StepPublisher::checkpoint`] before each unit of work so that
/// cancellation is honored promptly.
#[async_trait]
pub trait Algorithm<S, E>: Send + Sync
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    /// Stable identifier, matching the catalog id the algorithm is registered under.
    fn id(&self) -> &str;

    async fn run(&self, state: &mut S, publisher: &mut StepPublisher<'_, S, E>) -> Result<()>;
}

pub type BoxedAlgorithm<S, E> = Box<dyn Algorithm<S, E>>;

/// Publish capability scoped to one execution.
///
/// Each call snapshots the state it is given, wraps it in a [`Step`] and
/// fans it out to every sink of the owning runner before returning.
pub struct StepPublisher<'a, S, E> {
    runner: &'a Runner<S, E>,
    cancel: &'a CancelSignal,
    published: usize,
}

impl<'a, S, E> StepPublisher<'a, S, E>
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    pub(crate) fn new(runner: &'a Runner<S, E>, cancel: &'a CancelSignal) -> Self {
        Self {
            runner,
            cancel,
            published: 0,
        }
    }

    /// Cancellation point. Call before every unit of work.
    #[inline]
    pub fn checkpoint(&self) -> Result<()> {
        self.cancel.check()
    }

    pub fn cancel_signal(&self) -> &CancelSignal {
        self.cancel
    }

    /// Number of steps broadcast so far.
    pub fn published(&self) -> usize {
        self.published
    }

    pub async fn publish(&mut self, state: &S, event: E) -> Result<()> {
        self.emit(state, event, None).await
    }

    pub async fn publish_with_message(
        &mut self,
        state: &S,
        event: E,
        message: impl Into<String> + Send,
    ) -> Result<()> {
        self.emit(state, event, Some(message.into())).await
    }

    async fn emit(&mut self, state: &S, event: E, message: Option<String>) -> Result<()> {
        self.cancel.check()?;
        let snapshot = self.runner.snapshot(state)?;
        let step = match message {
            Some(message) => Step::new(snapshot, event).with_message(message),
            None => Step::new(snapshot, event),
        };
        self.runner.broadcast_step(&step, self.cancel).await?;
        self.published += 1;
        self.runner.pacing().pause().await;
        Ok(())
    }
}
