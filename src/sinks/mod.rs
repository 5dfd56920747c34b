//! Ready-made observers.
//!
//! - [`RecordingSink`] keeps every snapshot it is handed, for tests and replay.
//! - [`ChannelSink`] forwards everything over a bounded crossbeam channel to a
//!   render thread.
//! - [`TracingSink`] emits one debug event per phase.
//! - [`JsonLinesSink`] writes one JSON object per phase to any writer.

pub mod channel;
pub mod jsonl;
pub mod recording;
pub mod tracing_sink;

pub use channel::{ChannelSink, SinkMessage};
pub use jsonl::{read_records, ExportRecord, JsonLinesSink};
pub use recording::RecordingSink;
pub use tracing_sink::TracingSink;
