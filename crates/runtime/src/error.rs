//! Unified error types surfaced by the behavior runtime.
//!
//! Wraps failures from host capability calls, configuration validation, and
//! behavior registration so callers can bubble them up with consistent
//! context.
use thiserror::Error;

use crate::host::HostError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] behavior_core::ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("behavior type '{0}' is already registered")]
    DuplicateBehavior(String),

    #[error("no behavior registered under key '{0}'")]
    UnknownBehavior(String),

    #[error("timer scheduler lock poisoned")]
    LockPoisoned,
}
