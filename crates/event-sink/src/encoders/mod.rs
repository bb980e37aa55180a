use event_types::EventRecord;

pub mod influx;
pub mod json;

/// Trait for encoding event records into different wire formats
pub trait EventEncoder: Send + Sync {
    /// Encode one record as a single newline-terminated line.
    ///
    /// `timestamp` is in nanoseconds since the Unix epoch; formats without a
    /// timestamp slot ignore it.
    fn encode_event(&self, record: &EventRecord, timestamp: i64) -> String;
}

/// Factory function to create encoders based on format string
pub fn create_encoder(format: &str) -> Box<dyn EventEncoder> {
    match format.to_lowercase().as_str() {
        "influx" | "influxdb" => Box::new(influx::InfluxEncoder::new()),
        _ => Box::new(json::JsonEncoder::new()),
    }
}
