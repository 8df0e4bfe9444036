//! Runtime for the delayed-teleport region behavior.
//!
//! This crate wires the pure countdown logic from `behavior-core` to the
//! host engine: capability traits for the host surfaces, the countdown
//! controller and its per-token timer scheduler, the behavior-type registry,
//! and the module bootstrap.
//!
//! Modules are organized by responsibility:
//! - [`host`] declares the capability traits the host engine implements
//! - [`controller`] owns the countdown lifecycle and tick tasks
//! - [`scheduler`] tracks live timers per token
//! - [`registry`] exposes the behavior type (schema + handlers) to the host
//! - [`events`] broadcasts countdown progress to observers
pub mod controller;
pub mod events;
pub mod host;
pub mod module;
pub mod registry;
pub mod scheduler;

mod error;

pub use controller::{ControllerConfig, CountdownController};
pub use error::{Result, RuntimeError};
pub use events::CountdownEvent;
pub use host::{
    FlagStore, HostEnv, HostError, HostResult, PauseOracle, TeleportDelegate, TextRenderer,
    TokenOracle,
};
pub use module::Module;
pub use registry::{
    BEHAVIOR_ICON, BEHAVIOR_KEY, BehaviorDescriptor, BehaviorRegistry, FieldKind, FieldSpec,
    RegionEventHandlers,
};
pub use scheduler::{TimerId, TimerScheduler};
