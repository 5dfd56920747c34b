use crate::engine::{CancelSignal, Step, StepEvent, StepSink};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Telemetry sink: one debug event per phase, never fails.
#[derive(Debug)]
pub struct TracingSink {
    label: String,
    steps: AtomicUsize,
}

impl TracingSink {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: AtomicUsize::new(0),
        }
    }

    /// Steps seen since the last `initialize`.
    pub fn steps_seen(&self) -> usize {
        self.steps.load(Ordering::Relaxed)
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("trace")
    }
}

#[async_trait]
impl<S, E> StepSink<S, E> for TracingSink
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    fn name(&self) -> &str {
        &self.label
    }

    async fn initialize(&self, _state: S, _cancel: &CancelSignal) -> Result<()> {
        self.steps.store(0, Ordering::Relaxed);
        tracing::debug!(sink = %self.label, "execution initialized");
        Ok(())
    }

    async fn publish(&self, step: Step<S, E>, _cancel: &CancelSignal) -> Result<()> {
        let index = self.steps.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            sink = %self.label,
            index,
            kind = step.event().kind(),
            note = step.message().unwrap_or(""),
            at = %step.timestamp(),
            "step {:?}",
            step.event()
        );
        Ok(())
    }

    async fn complete(&self, _state: S, _cancel: &CancelSignal) -> Result<()> {
        tracing::debug!(sink = %self.label, steps = self.steps_seen(), "execution complete");
        Ok(())
    }
}
