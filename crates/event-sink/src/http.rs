//! HTTP delivery of event records to a remote collector.
//!
//! Each record is POSTed once as a flat JSON object. There is no retry and no
//! batching: a failed delivery is reported to the caller and the record is gone.

use std::time::Duration;

use event_types::EventRecord;
use reqwest::blocking::Client as BlockingClient;
use reqwest::Url;

use crate::EventSink;
use crate::SinkError;

/// Configuration for the HTTP event sink
#[derive(Debug, Clone)]
pub struct HttpSinkConfig {
    pub collector_url: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for HttpSinkConfig {
    fn default() -> Self {
        Self {
            collector_url: "http://localhost:8080".to_string(),
            endpoint: "/user_event".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpSinkConfig {
    pub fn new(collector_url: impl Into<String>) -> Self {
        Self {
            collector_url: collector_url.into(),
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The full URL records are POSTed to: `{collector_url}{endpoint}`.
    pub fn event_url(&self) -> String {
        format!(
            "{}{}",
            self.collector_url.trim_end_matches('/'),
            self.endpoint
        )
    }
}

/// Blocking HTTP event sink.
///
/// The underlying blocking client is built per delivery, so the sink itself can
/// be created and dropped from async code; `send` must run on a thread that is
/// allowed to block.
#[derive(Debug)]
pub struct HttpEventSink {
    config: HttpSinkConfig,
}

impl HttpEventSink {
    /// Create a new sink, rejecting URLs that can never be delivered to.
    pub fn new(config: HttpSinkConfig) -> Result<Self, SinkError> {
        Url::parse(&config.event_url()).map_err(|e| {
            SinkError::Configuration(format!("invalid collector url `{}`: {e}", config.event_url()))
        })?;

        Ok(Self { config })
    }
}

impl EventSink for HttpEventSink {
    fn send(&self, event: &EventRecord) -> Result<(), SinkError> {
        let url = self.config.event_url();
        let http_client = BlockingClient::builder()
            .timeout(self.config.timeout)
            .build()?;

        let resp = http_client.post(&url).json(event).send()?;
        let status = resp.status();
        if status.is_success() {
            tracing::debug!(%url, %status, "event delivered");
            return Ok(());
        }

        let body = resp.text().unwrap_or_default();
        Err(SinkError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
