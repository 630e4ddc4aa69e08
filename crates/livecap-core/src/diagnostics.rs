//! Diagnostic sink for absorbed write failures.
//!
//! The logger never surfaces I/O errors to the caption producer. Failures
//! are handed to a [`DiagnosticSink`] instead, so hosts can route them into
//! their own telemetry and tests can assert that they occurred.

use std::path::Path;

use crate::error::LogError;

/// Receives the failures that the logger absorbs on its append path.
///
/// Implementations must be callable from any thread; the logger invokes the
/// sink while holding its session lock, so implementations should return
/// quickly and must not call back into the logger.
pub trait DiagnosticSink: Send + Sync {
    /// Called when writing the session file failed.
    ///
    /// # Arguments
    ///
    /// * `path` - The session file the write was addressed to
    /// * `error` - The write or serialization failure
    fn save_failed(&self, path: &Path, error: &LogError);
}

/// Default sink: reports failures as `tracing` warnings.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn save_failed(&self, path: &Path, error: &LogError) {
        tracing::warn!(path = %path.display(), %error, "failed to save caption log");
    }
}
