//! Delivery side of the page-load beacon.
//!
//! An [`EventSink`] accepts a finished [`EventRecord`] and takes care of getting it
//! somewhere. The beacon never retries or batches; whatever the sink does with a
//! record after `send` returns is the sink's own business.

pub mod encoders;
#[cfg(feature = "http")]
pub mod http;
pub mod log;
pub mod memory;

use std::sync::Arc;

use event_types::EventRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[cfg(feature = "http")]
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Collector responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid sink configuration: {0}")]
    Configuration(String),
}

pub trait EventSink {
    fn send(&self, event: &EventRecord) -> Result<(), SinkError>;
}

impl<T> EventSink for Arc<T>
where T: EventSink + ?Sized
{
    fn send(&self, event: &EventRecord) -> Result<(), SinkError> {
        (**self).send(event)
    }
}

impl<T> EventSink for Box<T>
where T: EventSink + ?Sized
{
    fn send(&self, event: &EventRecord) -> Result<(), SinkError> {
        (**self).send(event)
    }
}
