//! Error types for event construction and snapshot loading.

use core::error::Error;

use derive_more::Display;
use error_stack::Report;

/// Result type for event construction.
pub type BuildResult<T> = Result<T, Report<BuildError>>;

/// Errors that stop a page-load event from being built.
///
/// Optional browser capabilities never produce an error; they only drop fields.
#[derive(Debug, Display)]
pub enum BuildError {
    /// The page carries no route-shape marker
    #[display("Route-shape marker is missing from the page")]
    MissingPathShape,
}

impl Error for BuildError {}

/// Result type for snapshot loading.
pub type SnapshotResult<T> = Result<T, Report<SnapshotError>>;

/// Errors raised while loading a captured browser snapshot.
#[derive(Debug, Display)]
pub enum SnapshotError {
    /// Snapshot file could not be read
    #[display("Failed to read snapshot: {path}")]
    Read { path: String },

    /// Snapshot content did not match the expected shape
    #[display("Failed to parse snapshot as {format}")]
    Parse { format: &'static str },
}

impl Error for SnapshotError {}
