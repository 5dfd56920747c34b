//! JSON-lines exporter.
//!
//! Each sink phase becomes one JSON object on its own line:
//!
//! ```text
//! {"phase":"initialize","state":[{"value":3,"stableId":"item-0000"}]}
//! {"phase":"step","state":[...],"event":{"kind":"Highlight","index":0,"message":"..."},"message":null,"timestamp":"..."}
//! {"phase":"complete","state":[...]}
//! ```
//!
//! [`read_records`] parses such a stream back. Events deserialise through
//! their own validation, so a sorting stream with a negative index is
//! rejected rather than silently truncated.

use crate::engine::{CancelSignal, Step, StepSink};
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One exported line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum ExportRecord<S, E> {
    Initialize {
        state: S,
    },
    Step {
        state: S,
        event: E,
        message: Option<String>,
        timestamp: DateTime<Utc>,
    },
    Complete {
        state: S,
    },
}

impl<S, E> ExportRecord<S, E> {
    pub fn state(&self) -> &S {
        match self {
            ExportRecord::Initialize { state }
            | ExportRecord::Step { state, .. }
            | ExportRecord::Complete { state } => state,
        }
    }

    pub fn event(&self) -> Option<&E> {
        match self {
            ExportRecord::Step { event, .. } => Some(event),
            _ => None,
        }
    }

    /// Rebuild the step envelope of a `step` record.
    pub fn into_step(self) -> Option<Step<S, E>> {
        match self {
            ExportRecord::Step {
                state,
                event,
                message,
                timestamp,
            } => {
                let step = Step::new(state, event).at(timestamp);
                Some(match message {
                    Some(message) => step.with_message(message),
                    None => step,
                })
            }
            _ => None,
        }
    }
}

impl<S, E> From<Step<S, E>> for ExportRecord<S, E> {
    fn from(step: Step<S, E>) -> Self {
        let (state, event, message, timestamp) = step.into_parts();
        ExportRecord::Step {
            state,
            event,
            message,
            timestamp,
        }
    }
}

/// Writes every phase as a JSON line to `W`.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
    records_written: AtomicUsize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            records_written: AtomicUsize::new(0),
        }
    }

    pub fn records_written(&self) -> usize {
        self.records_written.load(Ordering::Relaxed)
    }

    /// Inspect the underlying writer, e.g. an in-memory buffer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.lock())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record<S: Serialize, E: Serialize>(
        &self,
        record: &ExportRecord<S, E>,
        flush: bool,
    ) -> Result<()> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.lock();
        writeln!(writer, "{}", line)?;
        if flush {
            writer.flush()?;
        }
        self.records_written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) a JSON-lines file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            tracing::error!("JsonLinesSink: failed to create {:?}: {}", path, e);
            e
        })?;
        tracing::info!("JsonLinesSink: writing to {:?}", path);
        Ok(Self::new(BufWriter::new(file)))
    }
}

#[async_trait]
impl<W, S, E> StepSink<S, E> for JsonLinesSink<W>
where
    W: Write + Send,
    S: Serialize + Send + Sync + 'static,
    E: Serialize + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "JsonLinesSink"
    }

    async fn initialize(&self, state: S, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        self.write_record(&ExportRecord::<S, E>::Initialize { state }, false)
    }

    async fn publish(&self, step: Step<S, E>, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        self.write_record(&ExportRecord::from(step), false)
    }

    async fn complete(&self, state: S, cancel: &CancelSignal) -> Result<()> {
        cancel.check()?;
        self.write_record(&ExportRecord::<S, E>::Complete { state }, true)?;
        tracing::info!("JsonLinesSink: {} records written", self.records_written());
        Ok(())
    }
}

/// Parse a JSON-lines stream. Blank lines are skipped.
pub fn read_records<S, E>(reader: impl BufRead) -> Result<Vec<ExportRecord<S, E>>>
where
    S: DeserializeOwned,
    E: DeserializeOwned,
{
    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            EngineError::Serialization(format!("line {}: {}", number + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}
