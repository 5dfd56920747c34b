//! Drives one algorithm execution and fans steps out to sinks.
//!
//! Each execution:
//! 1. Clones the caller's input into a private working state.
//! 2. Broadcasts `initialize` to every sink, in registration order.
//! 3. Runs the algorithm; every publish is cloned and broadcast.
//! 4. Broadcasts `complete` once the algorithm returns normally.
//! 5. Returns an independent clone of the working state.
//!
//! The working state never leaves the runner. Every sink invocation gets
//! its own clone, so sinks cannot observe each other or future mutations.

use crate::config::PacingConfig;
use crate::engine::algorithm::{Algorithm, StepPublisher};
use crate::engine::cancel::CancelSignal;
use crate::engine::sink::SharedSink;
use crate::engine::step::{Step, StepEvent};
use crate::error::{EngineError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Clone function used for every state hand-off. `None` is an engine bug.
pub type StateCloner<S> = Arc<dyn Fn(&S) -> Option<S> + Send + Sync>;

/// Suspension applied after every published step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    /// Sleep after each broadcast (frame pacing for renderers).
    pub step_delay: Duration,
    /// Cooperatively yield to the scheduler after each broadcast.
    pub yield_each_step: bool,
}

impl Pacing {
    /// No pacing at all; steps are broadcast back to back.
    pub const NONE: Pacing = Pacing {
        step_delay: Duration::ZERO,
        yield_each_step: false,
    };

    pub(crate) async fn pause(&self) {
        if !self.step_delay.is_zero() {
            tokio::time::sleep(self.step_delay).await;
        }
        if self.yield_each_step {
            tokio::task::yield_now().await;
        }
    }
}

impl From<&PacingConfig> for Pacing {
    fn from(config: &PacingConfig) -> Self {
        Self {
            step_delay: Duration::from_millis(config.step_delay_ms),
            yield_each_step: config.yield_each_step,
        }
    }
}

/// Orchestrates algorithm executions over a fixed, ordered set of sinks.
pub struct Runner<S, E> {
    cloner: StateCloner<S>,
    sinks: Vec<SharedSink<S, E>>,
    pacing: Pacing,
}

impl<S, E> Runner<S, E>
where
    S: Clone + Send + Sync + 'static,
    E: StepEvent,
{
    /// Runner that snapshots with `Clone::clone`.
    pub fn new(sinks: Vec<SharedSink<S, E>>) -> Self {
        Self::with_cloner(|state: &S| Some(state.clone()), sinks)
    }
}

impl<S, E> Runner<S, E>
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    pub fn with_cloner<F>(cloner: F, sinks: Vec<SharedSink<S, E>>) -> Self
    where
        F: Fn(&S) -> Option<S> + Send + Sync + 'static,
    {
        Self {
            cloner: Arc::new(cloner),
            sinks,
            pacing: Pacing::NONE,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Sinks in registration (and invocation) order.
    pub fn sinks(&self) -> &[SharedSink<S, E>] {
        &self.sinks
    }

    /// Execute `algorithm` against a private copy of `input`.
    ///
    /// `input` is only read. On success the returned state is a fresh
    /// clone of the final working state; on failure no `complete` has
    /// been broadcast for this execution.
    pub async fn execute(
        &self,
        algorithm: &dyn Algorithm<S, E>,
        input: &S,
        cancel: &CancelSignal,
    ) -> Result<S> {
        self.run_phases(algorithm, input, cancel)
            .await
            .map_err(|err| self.execution_failure(algorithm.id(), err, cancel))
    }

    async fn run_phases(
        &self,
        algorithm: &dyn Algorithm<S, E>,
        input: &S,
        cancel: &CancelSignal,
    ) -> Result<S> {
        cancel.check()?;
        let mut working = self.snapshot(input)?;
        self.broadcast_initialize(&working, cancel).await?;

        let mut publisher = StepPublisher::new(self, cancel);
        algorithm.run(&mut working, &mut publisher).await?;
        tracing::debug!(
            "Runner: algorithm '{}' finished after {} steps",
            algorithm.id(),
            publisher.published()
        );

        self.broadcast_complete(&working, cancel).await?;
        self.snapshot(&working)
    }

    /// Every error leaving `execute` passes through here exactly once.
    fn execution_failure(&self, algorithm_id: &str, err: EngineError, cancel: &CancelSignal) -> EngineError {
        let err = prefer_cancellation(err, cancel);
        if err.is_cancelled() {
            tracing::warn!("Runner: execution cancelled for algorithm '{}'", algorithm_id);
        } else {
            tracing::error!("Runner: execution failed for algorithm '{}': {}", algorithm_id, err);
        }
        err
    }

    pub(crate) fn snapshot(&self, state: &S) -> Result<S> {
        (self.cloner)(state)
            .ok_or_else(|| EngineError::Invariant("state clone returned nothing".to_string()))
    }

    async fn broadcast_initialize(&self, state: &S, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        for sink in &self.sinks {
            cancel.check()?;
            let snapshot = self.snapshot(state)?;
            if let Err(err) = sink.initialize(snapshot, cancel).await {
                return Err(self.sink_failure("initialize", sink.name(), err));
            }
        }
        Ok(())
    }

    pub(crate) async fn broadcast_step(&self, step: &Step<S, E>, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        for sink in &self.sinks {
            cancel.check()?;
            let forwarded = step.with_snapshot(self.snapshot(step.snapshot())?);
            if let Err(err) = sink.publish(forwarded, cancel).await {
                return Err(self.sink_failure("publish", sink.name(), err));
            }
        }
        Ok(())
    }

    async fn broadcast_complete(&self, state: &S, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        for sink in &self.sinks {
            cancel.check()?;
            let snapshot = self.snapshot(state)?;
            if let Err(err) = sink.complete(snapshot, cancel).await {
                return Err(self.sink_failure("complete", sink.name(), err));
            }
        }
        Ok(())
    }

    fn sink_failure(&self, phase: &str, sink_name: &str, err: EngineError) -> EngineError {
        tracing::debug!("Runner: {} failed in sink '{}': {}", phase, sink_name, err);
        err
    }
}

/// Once the signal is raised, cancellation is the only outcome reported.
pub(crate) fn prefer_cancellation(err: EngineError, cancel: &CancelSignal) -> EngineError {
    if err.is_cancelled() || !cancel.is_cancelled() {
        return err;
    }
    tracing::debug!("Masking error observed after cancellation: {}", err);
    EngineError::Cancelled
}
