//! Countdown lifecycle events for front-ends to observe.
//!
//! Consumers subscribe to [`CountdownEvent`] to follow countdown progress
//! without blocking the tick tasks. Emission is best-effort: a send with no
//! live subscriber is not an error.

use tokio::sync::broadcast;

use behavior_core::TokenId;

/// Events emitted by the countdown controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A countdown timer was created for a token.
    Started { token: TokenId, delay: u32 },
    /// One un-paused tick ran; `remaining` is the value that was shown
    /// (or would have been shown) this tick.
    Ticked { token: TokenId, remaining: i64 },
    /// The countdown reached zero and the teleport was delegated.
    Completed { token: TokenId },
    /// The timer was cancelled before completion (move-out).
    Cancelled { token: TokenId },
}

pub(crate) fn channel(capacity: usize) -> broadcast::Sender<CountdownEvent> {
    broadcast::channel(capacity).0
}
