//! Observer contract for one execution.
//!
//! A sink receives `initialize` once, `publish` once per step, and
//! `complete` once if (and only if) the algorithm finished. The runner
//! awaits each call before issuing the next one, and always walks sinks in
//! registration order.

use crate::engine::cancel::CancelSignal;
use crate::engine::step::Step;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for anything that wants to observe an algorithm execution.
///
/// Every argument handed to a sink is an independent clone; sinks may keep
/// snapshots for as long as they like. Returning an error aborts the whole
/// execution and the error reaches the caller unchanged.
#[async_trait]
pub trait StepSink<S, E>: Send + Sync
where
    S: Send + 'static,
    E: Send + 'static,
{
    /// Human-readable name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn initialize(&self, state: S, cancel: &CancelSignal) -> Result<()>;

    async fn publish(&self, step: Step<S, E>, cancel: &CancelSignal) -> Result<()>;

    async fn complete(&self, state: S, cancel: &CancelSignal) -> Result<()>;
}

/// Sinks are shared so the caller can keep a handle and inspect them later.
pub type SharedSink<S, E> = Arc<dyn StepSink<S, E>>;
