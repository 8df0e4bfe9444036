//! Capability traits describing the host engine surfaces this module uses.
//!
//! The behavior never subclasses host types; every host interaction flows
//! through one of these object-safe traits. [`HostEnv`] bundles them so the
//! controller can be handed a single aggregate, and tests can swap in
//! in-memory fakes.
mod error;

pub use error::{HostError, HostResult};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use behavior_core::{CountdownStyle, Point, RegionEvent, TokenId, TokenVisual};

/// Per-token persistent key-value storage scoped by module namespace.
///
/// Flags survive reloads; this is the durable store for the countdown value
/// and the timer handle.
#[async_trait]
pub trait FlagStore: Send + Sync {
    async fn get_flag(
        &self,
        namespace: &str,
        token: &TokenId,
        key: &str,
    ) -> HostResult<Option<Value>>;

    /// Writes a flag; `None` clears it.
    async fn set_flag(
        &self,
        namespace: &str,
        token: &TokenId,
        key: &str,
        value: Option<Value>,
    ) -> HostResult<()>;
}

/// Global session pause state, queryable at any time.
pub trait PauseOracle: Send + Sync {
    fn is_paused(&self) -> bool;
}

/// Access to token scene state.
pub trait TokenOracle: Send + Sync {
    /// Live visual for a token, or `None` while the token is not loaded into
    /// the active scene.
    fn visual(&self, token: &TokenId) -> Option<TokenVisual>;
}

/// The host's floating-text renderer.
#[async_trait]
pub trait TextRenderer: Send + Sync {
    /// Renders scrolling text at `anchor`, traveling `distance` canvas units.
    async fn render_text(
        &self,
        anchor: Point,
        distance: f64,
        text: &str,
        style: CountdownStyle,
    ) -> HostResult<()>;
}

/// The host's pre-existing teleport action.
///
/// Invoked with the same event shape as a normal move-in event; the host
/// performs the actual relocation.
#[async_trait]
pub trait TeleportDelegate: Send + Sync {
    async fn teleport(&self, event: RegionEvent) -> HostResult<()>;
}

/// Bundles every host capability the countdown controller needs.
#[derive(Clone)]
pub struct HostEnv {
    flags: Arc<dyn FlagStore>,
    pause: Arc<dyn PauseOracle>,
    tokens: Arc<dyn TokenOracle>,
    text: Arc<dyn TextRenderer>,
    teleport: Arc<dyn TeleportDelegate>,
}

impl HostEnv {
    pub fn new(
        flags: Arc<dyn FlagStore>,
        pause: Arc<dyn PauseOracle>,
        tokens: Arc<dyn TokenOracle>,
        text: Arc<dyn TextRenderer>,
        teleport: Arc<dyn TeleportDelegate>,
    ) -> Self {
        Self {
            flags,
            pause,
            tokens,
            text,
            teleport,
        }
    }

    pub fn flags(&self) -> &dyn FlagStore {
        self.flags.as_ref()
    }

    pub fn pause(&self) -> &dyn PauseOracle {
        self.pause.as_ref()
    }

    pub fn tokens(&self) -> &dyn TokenOracle {
        self.tokens.as_ref()
    }

    pub fn text(&self) -> &dyn TextRenderer {
        self.text.as_ref()
    }

    pub fn teleport(&self) -> &dyn TeleportDelegate {
        self.teleport.as_ref()
    }
}
