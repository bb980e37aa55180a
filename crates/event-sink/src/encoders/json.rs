use event_types::EventRecord;

use super::EventEncoder;

/// JSON encoder for event records.
///
/// Produces the flat record object exactly as the collector expects it; the
/// timestamp is not part of the record and is dropped.
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEncoder for JsonEncoder {
    fn encode_event(&self, record: &EventRecord, _timestamp: i64) -> String {
        // A map of scalars cannot fail to serialize; non-finite floats become null.
        serde_json::to_string(record).unwrap_or_default() + "\n"
    }
}
