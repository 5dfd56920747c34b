//! Channel sink: forwards every phase to another thread over a bounded
//! crossbeam channel.
//!
//! A full queue is retried until `send_timeout` elapses, yielding to the
//! async scheduler between attempts so the runner never blocks a worker
//! thread. A dropped receiver fails the execution immediately.

use crate::config::ChannelConfig;
use crate::engine::{CancelSignal, Step, StepSink};
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

const SEND_RETRY_INTERVAL: Duration = Duration::from_millis(1);

/// One message per sink phase
#[derive(Debug, Clone)]
pub enum SinkMessage<S, E> {
    Initialized(S),
    Step(Step<S, E>),
    Completed(S),
}

impl<S, E> SinkMessage<S, E> {
    /// The snapshot carried by the message, whatever the phase.
    pub fn snapshot(&self) -> &S {
        match self {
            SinkMessage::Initialized(state) | SinkMessage::Completed(state) => state,
            SinkMessage::Step(step) => step.snapshot(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SinkMessage::Completed(_))
    }
}

pub struct ChannelSink<S, E> {
    tx: Sender<SinkMessage<S, E>>,
    send_timeout: Duration,
    /// Messages accepted by the channel
    sent: AtomicUsize,
}

impl<S, E> ChannelSink<S, E> {
    /// Wrap an existing sender.
    pub fn new(tx: Sender<SinkMessage<S, E>>, send_timeout: Duration) -> Self {
        Self {
            tx,
            send_timeout,
            sent: AtomicUsize::new(0),
        }
    }

    /// Create a sink together with the receiving end of a fresh channel.
    ///
    /// A zero capacity is rejected: crossbeam would build a rendezvous
    /// channel, which `try_send` can only feed while a receiver is blocked.
    pub fn bounded(
        capacity: usize,
        send_timeout: Duration,
    ) -> Result<(Self, Receiver<SinkMessage<S, E>>)> {
        if capacity == 0 {
            return Err(EngineError::invalid_argument(
                "capacity",
                "must be greater than zero",
            ));
        }
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Ok((Self::new(tx, send_timeout), rx))
    }

    pub fn from_config(config: &ChannelConfig) -> Result<(Self, Receiver<SinkMessage<S, E>>)> {
        Self::bounded(config.capacity, Duration::from_millis(config.send_timeout_ms))
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

impl<S: Send, E: Send> ChannelSink<S, E> {
    async fn send(&self, message: SinkMessage<S, E>, cancel: &CancelSignal) -> Result<()> {
        let deadline = Instant::now() + self.send_timeout;
        let mut pending = message;

        loop {
            match self.tx.try_send(pending) {
                Ok(()) => {
                    self.sent.fetch_add(1, Ordering::Relaxed);
                    return Ok(());
                }
                Err(TrySendError::Disconnected(_)) => {
                    tracing::error!("ChannelSink: receiver disconnected after {} messages", self.sent());
                    return Err(EngineError::Channel("receiver disconnected".to_string()));
                }
                Err(TrySendError::Full(returned)) => {
                    cancel.check()?;
                    if Instant::now() >= deadline {
                        tracing::warn!(
                            "ChannelSink: queue stayed full for {:?}, giving up",
                            self.send_timeout
                        );
                        return Err(EngineError::Channel(format!(
                            "send timed out after {:?}",
                            self.send_timeout
                        )));
                    }
                    pending = returned;
                    tokio::time::sleep(SEND_RETRY_INTERVAL).await;
                }
            }
        }
    }
}

#[async_trait]
impl<S, E> StepSink<S, E> for ChannelSink<S, E>
where
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "ChannelSink"
    }

    async fn initialize(&self, state: S, cancel: &CancelSignal) -> Result<()> {
        self.send(SinkMessage::Initialized(state), cancel).await
    }

    async fn publish(&self, step: Step<S, E>, cancel: &CancelSignal) -> Result<()> {
        self.send(SinkMessage::Step(step), cancel).await
    }

    async fn complete(&self, state: S, cancel: &CancelSignal) -> Result<()> {
        self.send(SinkMessage::Completed(state), cancel).await
    }
}
