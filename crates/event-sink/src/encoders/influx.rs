use event_types::EventRecord;
use event_types::FieldValue;
use event_types::PAGE_LOAD_ID_FIELD;
use event_types::TYPE_FIELD;
use influxdb_line_protocol::LineProtocolBuilder;

use super::EventEncoder;

/// Measurement used when a record carries no type discriminator.
const FALLBACK_MEASUREMENT: &str = "event";

/// InfluxDB line protocol encoder.
///
/// The event type becomes the measurement and `page_load_id` the only tag;
/// every other field is written as a line-protocol field.
pub struct InfluxEncoder;

impl InfluxEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InfluxEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEncoder for InfluxEncoder {
    fn encode_event(&self, record: &EventRecord, timestamp: i64) -> String {
        let measurement = record
            .get(TYPE_FIELD)
            .and_then(FieldValue::as_str)
            .unwrap_or(FALLBACK_MEASUREMENT);

        let mut builder = LineProtocolBuilder::new().measurement(measurement);

        if let Some(id) = record.page_load_id() {
            builder = builder.tag(PAGE_LOAD_ID_FIELD, &id.to_string());
        }

        // Record keys are already sorted, so field order is stable.
        let mut fields = record
            .iter()
            .filter(|(key, _)| *key != TYPE_FIELD && *key != PAGE_LOAD_ID_FIELD);

        let built = if let Some((first_key, first_value)) = fields.next() {
            let mut after_first_field = match first_value {
                FieldValue::String(s) => builder.field(first_key, s.as_str()),
                FieldValue::Integer(i) => builder.field(first_key, *i),
                FieldValue::UnsignedInteger(u) => builder.field(first_key, *u),
                FieldValue::Float(f) => builder.field(first_key, *f),
                FieldValue::Boolean(b) => builder.field(first_key, *b),
            };

            for (key, value) in fields {
                after_first_field = match value {
                    FieldValue::String(s) => after_first_field.field(key, s.as_str()),
                    FieldValue::Integer(i) => after_first_field.field(key, *i),
                    FieldValue::UnsignedInteger(u) => after_first_field.field(key, *u),
                    FieldValue::Float(f) => after_first_field.field(key, *f),
                    FieldValue::Boolean(b) => after_first_field.field(key, *b),
                };
            }

            after_first_field.timestamp(timestamp).close_line().build()
        } else {
            // line protocol requires at least one field
            builder
                .field("_empty", true)
                .timestamp(timestamp)
                .close_line()
                .build()
        };

        String::from_utf8_lossy(&built).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use event_types::EventType;

    use super::*;

    #[test]
    fn test_encode_event_basic() {
        let encoder = InfluxEncoder::new();
        let mut record = EventRecord::new(EventType::PageLoad, 123);
        record.insert("user_agent", "Mozilla/5.0 (X11)");
        record.insert("timing_total_duration_ms", 450i64);
        record.insert("resource_count", 2u64);
        record.insert("timing_first_paint_ms", 120.5f64);

        let result = encoder.encode_event(&record, 1609459200000000000);

        assert!(result.starts_with("page-load,page_load_id=123 "));
        assert!(result.contains("user_agent=\"Mozilla/5.0 (X11)\""));
        assert!(result.contains("timing_total_duration_ms=450i"));
        assert!(result.contains("resource_count=2u"));
        assert!(result.contains("timing_first_paint_ms=120.5"));
        assert!(result.trim_end().ends_with("1609459200000000000"));
        assert!(!result.contains("type="));
    }

    #[test]
    fn test_encode_event_identity_only() {
        let encoder = InfluxEncoder::new();
        let record = EventRecord::new(EventType::PageUnload, 5);

        let result = encoder.encode_event(&record, 1234567890000000000);

        assert!(result.starts_with("page-unload,page_load_id=5"));
        assert!(result.contains("_empty=true"));
        assert!(result.contains("1234567890000000000"));
    }

    #[test]
    fn test_encode_event_without_type() {
        let encoder = InfluxEncoder::new();
        let mut record = EventRecord::default();
        record.insert("value", 42.0f64);

        let result = encoder.encode_event(&record, 1);

        assert!(result.starts_with("event value=42"));
    }
}
