use std::fmt;

use thiserror::Error;

/// Validation errors for user-authored behavior configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `delay_amount` must be a positive number of ticks.
    #[error("delay amount must be positive, got {0}")]
    InvalidDelay(u32),
}

/// Target location of the delegated teleport.
///
/// Opaque to the countdown logic: it is carried through unchanged and handed
/// to the host's teleport action, exactly as the base teleport behavior would
/// receive it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination(String);

impl Destination {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-authored configuration of one delayed-teleport region behavior.
///
/// Composes the base teleport behavior's fields (represented here by
/// [`Destination`]) with the two fields this module adds, rather than
/// inheriting from a host behavior class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedTeleportConfig {
    /// Number of countdown ticks before the teleport fires. Required,
    /// must be positive.
    pub delay_amount: u32,
    /// Render per-tick floating text with the remaining value.
    pub show_countdown: bool,
    /// Target of the delegated teleport, inherited from the base behavior.
    pub destination: Destination,
}

impl DelayedTeleportConfig {
    pub fn new(delay_amount: u32, destination: Destination) -> Self {
        Self {
            delay_amount,
            show_countdown: true,
            destination,
        }
    }

    pub fn with_show_countdown(mut self, show_countdown: bool) -> Self {
        self.show_countdown = show_countdown;
        self
    }

    /// Validates the configuration before a countdown may start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_amount == 0 {
            return Err(ConfigError::InvalidDelay(self.delay_amount));
        }
        Ok(())
    }
}
