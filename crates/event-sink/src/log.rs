//! Sink that writes encoded events through `tracing`.
//!
//! Records are emitted under the [`EVENTS_TARGET`] target so a subscriber can
//! route them to their own writer, away from regular diagnostics.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use event_types::EventRecord;

use crate::encoders::EventEncoder;
use crate::EventSink;
use crate::SinkError;
pub use utils::logging::EVENTS_TARGET;

pub struct LogSink {
    encoder: Box<dyn EventEncoder>,
}

impl LogSink {
    pub fn new(encoder: Box<dyn EventEncoder>) -> Self {
        Self { encoder }
    }
}

impl EventSink for LogSink {
    fn send(&self, event: &EventRecord) -> Result<(), SinkError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as i64)
            .unwrap_or_default();
        let line = self.encoder.encode_event(event, timestamp);
        tracing::info!(target: EVENTS_TARGET, "{}", line.trim_end());
        Ok(())
    }
}
