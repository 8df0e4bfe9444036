//! Pure countdown logic for the delayed-teleport region behavior.
//!
//! `behavior-core` defines the behavior configuration, the per-token flag
//! vocabulary, and the tick planner that decides what each countdown tick
//! does. Everything here is deterministic and free of I/O; the runtime crate
//! executes the planned effects against the host engine.
pub mod config;
pub mod events;
pub mod flags;
pub mod style;
pub mod tick;
pub mod token;

pub use config::{ConfigError, DelayedTeleportConfig, Destination};
pub use events::{RegionEvent, RegionEventKind};
pub use flags::{FLAG_COUNTDOWN, FLAG_INTERVAL, MODULE_ID};
pub use style::{CountdownStyle, TextAnchor, anchor_distance};
pub use tick::{CountdownText, TickPlan, plan_tick};
pub use token::{Point, TokenId, TokenVisual};
