//! Flag-store vocabulary shared between the core planner and the runtime.
//!
//! The host engine exposes a per-token key-value store scoped by module
//! namespace. These names match the persisted layout end users may already
//! have on their tokens, so they must not change between releases.

/// Module namespace used for every flag written by this behavior.
pub const MODULE_ID: &str = "delayed-teleport";

/// Ticks remaining on the active countdown. Integer; only meaningful while a
/// timer is scheduled.
pub const FLAG_COUNTDOWN: &str = "teleportTimerCountDown";

/// Opaque handle of the active periodic timer, or null when no timer is
/// scheduled. Non-null iff a timer is live for the token.
pub const FLAG_INTERVAL: &str = "teleportTimerInterval";
