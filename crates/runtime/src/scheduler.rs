//! Explicit ownership of per-token countdown timers.
//!
//! Every live timer is an entry in [`TimerScheduler`]'s map, keyed by token.
//! The map is the single authority for "does this token have a timer", which
//! makes the duplicate-start guard atomic and lets the controller tear every
//! timer down deterministically on scene unload.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinHandle;

use behavior_core::TokenId;

use crate::error::{Result, RuntimeError};

/// Identifier of one scheduled countdown timer.
///
/// Persisted into the token's `teleportTimerInterval` flag as an opaque
/// number; never reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A live timer: its identity plus the tick task driving it.
pub(crate) struct TimerEntry {
    pub id: TimerId,
    pub task: JoinHandle<()>,
}

/// Map from token to active timer, owned by the countdown controller.
pub struct TimerScheduler {
    next_id: AtomicU64,
    timers: Mutex<HashMap<TokenId, TimerEntry>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// Allocates a fresh timer id.
    pub fn next_id(&self) -> TimerId {
        TimerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a timer for a token if none is live.
    ///
    /// On a duplicate the new entry is handed back so the caller can abort
    /// its task; this insert-if-absent under the map lock is what makes
    /// concurrent move-in deliveries for the same token race-free.
    pub(crate) fn register(&self, token: TokenId, entry: TimerEntry) -> Result<Option<TimerEntry>> {
        let mut timers = self.timers.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        if timers.contains_key(&token) {
            return Ok(Some(entry));
        }
        timers.insert(token, entry);
        Ok(None)
    }

    pub fn contains(&self, token: &TokenId) -> bool {
        self.timers
            .lock()
            .map(|timers| timers.contains_key(token))
            .unwrap_or(false)
    }

    /// Removes and returns the live entry for a token, if any.
    ///
    /// The caller aborts the returned task; the scheduler never aborts
    /// implicitly so a task can remove its own entry on completion.
    pub(crate) fn cancel(&self, token: &TokenId) -> Result<Option<TimerEntry>> {
        let mut timers = self.timers.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        Ok(timers.remove(token))
    }

    /// Removes a token's entry on natural completion.
    ///
    /// Only removes when the ids match, so a tick task that raced with a
    /// cancel-then-restart never tears down its successor's timer.
    pub(crate) fn complete(&self, token: &TokenId, id: TimerId) -> Result<bool> {
        let mut timers = self.timers.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        match timers.get(token) {
            Some(entry) if entry.id == id => {
                timers.remove(token);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Number of live timers.
    pub fn active(&self) -> usize {
        self.timers.lock().map(|timers| timers.len()).unwrap_or(0)
    }

    /// Aborts every live timer task and clears the map.
    pub fn shutdown(&self) -> Result<()> {
        let mut timers = self.timers.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        for (_, entry) in timers.drain() {
            entry.task.abort();
        }
        Ok(())
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_entry(id: TimerId) -> TimerEntry {
        TimerEntry {
            id,
            task: tokio::spawn(async {}),
        }
    }

    #[tokio::test]
    async fn register_is_insert_if_absent() {
        let scheduler = TimerScheduler::new();
        let token = TokenId::new("tok-1");

        let first = scheduler.next_id();
        assert!(
            scheduler
                .register(token.clone(), dummy_entry(first))
                .unwrap()
                .is_none()
        );
        let second = scheduler.next_id();
        let rejected = scheduler
            .register(token.clone(), dummy_entry(second))
            .unwrap()
            .unwrap();
        assert_eq!(rejected.id, second);

        let entry = scheduler.cancel(&token).unwrap().unwrap();
        assert_eq!(entry.id, first);
    }

    #[tokio::test]
    async fn complete_ignores_stale_timer_ids() {
        let scheduler = TimerScheduler::new();
        let token = TokenId::new("tok-1");

        let stale = scheduler.next_id();
        let live = scheduler.next_id();
        assert!(
            scheduler
                .register(token.clone(), dummy_entry(live))
                .unwrap()
                .is_none()
        );

        assert!(!scheduler.complete(&token, stale).unwrap());
        assert_eq!(scheduler.active(), 1);
        assert!(scheduler.complete(&token, live).unwrap());
        assert_eq!(scheduler.active(), 0);
    }

    #[tokio::test]
    async fn cancel_without_timer_is_a_noop() {
        let scheduler = TimerScheduler::new();
        assert!(scheduler.cancel(&TokenId::new("nobody")).unwrap().is_none());
    }

    #[tokio::test]
    async fn shutdown_clears_every_timer() {
        let scheduler = TimerScheduler::new();
        for n in 0..3 {
            let id = scheduler.next_id();
            let token = TokenId::new(format!("tok-{n}"));
            assert!(scheduler.register(token, dummy_entry(id)).unwrap().is_none());
        }
        assert_eq!(scheduler.active(), 3);
        scheduler.shutdown().unwrap();
        assert_eq!(scheduler.active(), 0);
    }
}
