//! Helper sinks for driving runner edge cases

use algovis_rs::engine::{CancelSignal, Step, StepSink};
use algovis_rs::sorting::{SortOp, SortingState};
use algovis_rs::{EngineError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Raises the cancel signal once it has seen `after` steps.
pub struct CancelAfterSink {
    after: usize,
    seen: AtomicUsize,
    completed: AtomicUsize,
}

impl CancelAfterSink {
    pub fn new(after: usize) -> Self {
        Self {
            after,
            seen: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StepSink<SortingState, SortOp> for CancelAfterSink {
    async fn initialize(&self, _state: SortingState, _cancel: &CancelSignal) -> Result<()> {
        Ok(())
    }

    async fn publish(&self, _step: Step<SortingState, SortOp>, cancel: &CancelSignal) -> Result<()> {
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 >= self.after {
            cancel.cancel();
        }
        Ok(())
    }

    async fn complete(&self, _state: SortingState, _cancel: &CancelSignal) -> Result<()> {
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Appends `"<label>:<phase>"` to a shared journal.
pub struct JournalSink {
    label: &'static str,
    journal: Arc<Mutex<Vec<String>>>,
}

impl JournalSink {
    pub fn new(label: &'static str, journal: Arc<Mutex<Vec<String>>>) -> Self {
        Self { label, journal }
    }

    fn note(&self, phase: &str) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.label, phase));
    }
}

#[async_trait]
impl StepSink<SortingState, SortOp> for JournalSink {
    async fn initialize(&self, _state: SortingState, _cancel: &CancelSignal) -> Result<()> {
        self.note("initialize");
        Ok(())
    }

    async fn publish(&self, step: Step<SortingState, SortOp>, _cancel: &CancelSignal) -> Result<()> {
        self.note(step.event().kind().as_str());
        Ok(())
    }

    async fn complete(&self, _state: SortingState, _cancel: &CancelSignal) -> Result<()> {
        self.note("complete");
        Ok(())
    }
}

/// Fails the n-th published step (1-based) with a channel error.
pub struct FailingSink {
    fail_on: usize,
    seen: AtomicUsize,
}

impl FailingSink {
    pub fn new(fail_on: usize) -> Self {
        Self {
            fail_on,
            seen: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StepSink<SortingState, SortOp> for FailingSink {
    async fn initialize(&self, _state: SortingState, _cancel: &CancelSignal) -> Result<()> {
        Ok(())
    }

    async fn publish(&self, _step: Step<SortingState, SortOp>, _cancel: &CancelSignal) -> Result<()> {
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(EngineError::Channel("render thread gone".to_string()));
        }
        Ok(())
    }

    async fn complete(&self, _state: SortingState, _cancel: &CancelSignal) -> Result<()> {
        Ok(())
    }
}
