//! Errors surfaced by host capability calls.

use thiserror::Error;

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failure reported by a host engine surface.
///
/// The behavior has no insight into host internals, so failures carry the
/// operation name and the host's own description. The tick loop logs these
/// and keeps the timer alive for the next interval.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("host {operation} failed: {reason}")]
pub struct HostError {
    pub operation: &'static str,
    pub reason: String,
}

impl HostError {
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}
