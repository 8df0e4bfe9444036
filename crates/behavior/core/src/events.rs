use crate::config::DelayedTeleportConfig;
use crate::token::TokenId;

/// Region lifecycle events delivered by the host engine.
///
/// The host guarantees per-token ordering: move-in and move-out arrive in the
/// order the underlying movement occurred. No ordering is guaranteed across
/// different tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionEvent {
    /// A token entered the region this behavior is attached to. Carries the
    /// behavior's own configuration so handlers need no back-reference to
    /// the region document.
    TokenMoveIn {
        token: TokenId,
        config: DelayedTeleportConfig,
    },
    /// A token left the region.
    TokenMoveOut { token: TokenId },
}

impl RegionEvent {
    pub fn kind(&self) -> RegionEventKind {
        match self {
            RegionEvent::TokenMoveIn { .. } => RegionEventKind::TokenMoveIn,
            RegionEvent::TokenMoveOut { .. } => RegionEventKind::TokenMoveOut,
        }
    }

    pub fn token(&self) -> &TokenId {
        match self {
            RegionEvent::TokenMoveIn { token, .. } => token,
            RegionEvent::TokenMoveOut { token } => token,
        }
    }
}

/// Event kinds a region behavior can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionEventKind {
    TokenMoveIn,
    TokenMoveOut,
}
