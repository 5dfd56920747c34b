use crate::engine::{CancelSignal, Step, StepEvent, StepSink};
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct Recording<S, E> {
    initial: Vec<S>,
    steps: Vec<Step<S, E>>,
    completed: Vec<S>,
}

/// Retains every snapshot and step it receives.
///
/// Accessors return copies, so a recording can be inspected while the
/// sink is still attached to a runner.
pub struct RecordingSink<S, E> {
    inner: Mutex<Recording<S, E>>,
}

impl<S, E> Default for RecordingSink<S, E> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Recording {
                initial: Vec::new(),
                steps: Vec::new(),
                completed: Vec::new(),
            }),
        }
    }
}

impl<S, E> fmt::Debug for RecordingSink<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recording = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("RecordingSink")
            .field("initialized", &recording.initial.len())
            .field("steps", &recording.steps.len())
            .field("completed", &recording.completed.len())
            .finish()
    }
}

impl<S: Clone, E: StepEvent> RecordingSink<S, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_snapshots(&self) -> Vec<S> {
        self.lock().initial.clone()
    }

    pub fn steps(&self) -> Vec<Step<S, E>> {
        self.lock().steps.clone()
    }

    pub fn completed_snapshots(&self) -> Vec<S> {
        self.lock().completed.clone()
    }

    pub fn step_count(&self) -> usize {
        self.lock().steps.len()
    }

    pub fn event_kinds(&self) -> Vec<&'static str> {
        self.lock().steps.iter().map(|step| step.event().kind()).collect()
    }

    pub fn clear(&self) {
        let mut recording = self.lock();
        recording.initial.clear();
        recording.steps.clear();
        recording.completed.clear();
    }

    // A panicking reader must not hide what was recorded.
    fn lock(&self) -> MutexGuard<'_, Recording<S, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<S, E> StepSink<S, E> for RecordingSink<S, E>
where
    S: Clone + Send + Sync + 'static,
    E: StepEvent,
{
    fn name(&self) -> &str {
        "RecordingSink"
    }

    async fn initialize(&self, state: S, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        self.lock().initial.push(state);
        Ok(())
    }

    async fn publish(&self, step: Step<S, E>, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        self.lock().steps.push(step);
        Ok(())
    }

    async fn complete(&self, state: S, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        self.lock().completed.push(state);
        Ok(())
    }
}
