//! The step envelope published once per observable mutation.

use chrono::{DateTime, Utc};
use std::fmt;

/// Capability required of every domain event carried by a [`Step`].
///
/// `kind` is a short, stable tag used for logging and for comparing event
/// sequences across sinks without caring about payloads.
pub trait StepEvent: Clone + fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> &'static str;
}

/// An immutable bundle of {state snapshot, event, message, timestamp}.
#[derive(Debug, Clone)]
pub struct Step<S, E> {
    snapshot: S,
    event: E,
    message: Option<String>,
    timestamp: DateTime<Utc>,
}

impl<S, E> Step<S, E> {
    /// Build a step stamped with the current time.
    pub fn new(snapshot: S, event: E) -> Self {
        Self {
            snapshot,
            event,
            message: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the creation timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Rebuild the envelope around a different snapshot, keeping event,
    /// message and timestamp.
    pub(crate) fn with_snapshot(&self, snapshot: S) -> Self
    where
        E: Clone,
    {
        Self {
            snapshot,
            event: self.event.clone(),
            message: self.message.clone(),
            timestamp: self.timestamp,
        }
    }

    pub fn into_parts(self) -> (S, E, Option<String>, DateTime<Utc>) {
        (self.snapshot, self.event, self.message, self.timestamp)
    }
}
