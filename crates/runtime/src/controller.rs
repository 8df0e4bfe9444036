//! The Countdown Controller.
//!
//! Owns the lifecycle of per-token delayed-teleport timers: creation on
//! move-in, the periodic tick task, completion (which hands off to the
//! host's teleport action), and cancellation on move-out. The persisted flag
//! store is the source of truth for the countdown value; the
//! [`TimerScheduler`] is the authority for which tokens have a live timer.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, warn};

use behavior_core::{
    CountdownText, DelayedTeleportConfig, FLAG_COUNTDOWN, FLAG_INTERVAL, MODULE_ID, RegionEvent,
    TickPlan, TokenId, anchor_distance, plan_tick,
};

use crate::error::{Result, RuntimeError};
use crate::events::{self, CountdownEvent};
use crate::host::HostEnv;
use crate::scheduler::{TimerEntry, TimerId, TimerScheduler};

/// Controller tuning. The defaults mirror the reference behavior's
/// one-second tick.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Wall-clock interval between countdown ticks.
    pub tick_interval: Duration,
    /// Capacity of the countdown event broadcast channel.
    pub event_buffer_size: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            event_buffer_size: 100,
        }
    }
}

/// Manages exactly one active countdown per token and hands off to the
/// delegated teleport action at zero.
pub struct CountdownController {
    host: HostEnv,
    scheduler: Arc<TimerScheduler>,
    config: ControllerConfig,
    events: broadcast::Sender<CountdownEvent>,
}

impl CountdownController {
    pub fn new(host: HostEnv, config: ControllerConfig) -> Self {
        let events = events::channel(config.event_buffer_size);
        Self {
            host,
            scheduler: Arc::new(TimerScheduler::new()),
            config,
            events,
        }
    }

    /// Subscribe to countdown lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<CountdownEvent> {
        self.events.subscribe()
    }

    /// Whether a countdown timer is currently live for a token.
    pub fn has_timer(&self, token: &TokenId) -> bool {
        self.scheduler.contains(token)
    }

    /// Number of live countdown timers.
    pub fn active_timers(&self) -> usize {
        self.scheduler.active()
    }

    /// Handles a token entering the region.
    ///
    /// Starts a countdown unless one is already live for the token. A token
    /// with no scene visual is skipped silently; it may not be fully loaded
    /// yet.
    pub async fn on_token_move_in(
        &self,
        token: &TokenId,
        config: &DelayedTeleportConfig,
    ) -> Result<()> {
        config.validate()?;

        if self.host.tokens().visual(token).is_none() {
            debug!(%token, "token has no scene visual, skipping countdown");
            return Ok(());
        }

        if self.scheduler.contains(token) {
            debug!(%token, "countdown already scheduled");
            return Ok(());
        }
        // A persisted handle with no scheduler entry (another client's timer,
        // or one that survived a reload) also blocks a start.
        let persisted = self
            .host
            .flags()
            .get_flag(MODULE_ID, token, FLAG_INTERVAL)
            .await?;
        if persisted.as_ref().is_some_and(|value| !value.is_null()) {
            debug!(%token, "persisted timer handle present, skipping countdown");
            return Ok(());
        }

        let timer_id = self.scheduler.next_id();
        let countdown = i64::from(config.delay_amount);
        debug!(%token, %timer_id, countdown, "creating countdown timer");

        let task = TickTask {
            host: self.host.clone(),
            scheduler: Arc::clone(&self.scheduler),
            events: self.events.clone(),
            token: token.clone(),
            config: config.clone(),
            timer_id,
            period: self.config.tick_interval,
        };
        let entry = TimerEntry {
            id: timer_id,
            task: tokio::spawn(task.run()),
        };
        if let Some(rejected) = self.scheduler.register(token.clone(), entry)? {
            // Lost a start race with a concurrent move-in; that timer wins.
            rejected.task.abort();
            debug!(%token, "countdown already scheduled");
            return Ok(());
        }

        let _ = self.events.send(CountdownEvent::Started {
            token: token.clone(),
            delay: config.delay_amount,
        });

        // Persist the timer handle and run the first tick concurrently.
        let set_handle = self.host.flags().set_flag(
            MODULE_ID,
            token,
            FLAG_INTERVAL,
            Some(json!(timer_id.as_u64())),
        );
        let first_tick = async {
            debug!(%token, remaining = countdown, "counting down");
            if let TickPlan::Advance { render, next_value } = plan_tick(countdown, config, false) {
                apply_advance(&self.host, token, render, next_value).await?;
                let _ = self.events.send(CountdownEvent::Ticked {
                    token: token.clone(),
                    remaining: countdown,
                });
            }
            Ok(())
        };
        let (handle_result, tick_result) = tokio::join!(set_handle, first_tick);
        handle_result?;
        tick_result
    }

    /// Handles a token leaving the region.
    ///
    /// Unconditionally clears any live timer and nulls the persisted flags.
    /// Idempotent: a move-out with no active timer is a no-op.
    pub async fn on_token_move_out(&self, token: &TokenId) -> Result<()> {
        let Some(entry) = self.scheduler.cancel(token)? else {
            // Nothing scheduled here, but sweep a stale persisted handle.
            let persisted = self
                .host
                .flags()
                .get_flag(MODULE_ID, token, FLAG_INTERVAL)
                .await?;
            if persisted.as_ref().is_some_and(|value| !value.is_null()) {
                debug!(%token, "clearing stale persisted timer handle");
                clear_flags(&self.host, token).await?;
            }
            return Ok(());
        };

        entry.task.abort();
        debug!(%token, timer_id = %entry.id, "clearing countdown timer");
        clear_flags(&self.host, token).await?;
        let _ = self.events.send(CountdownEvent::Cancelled {
            token: token.clone(),
        });
        Ok(())
    }

    /// Aborts every live timer task, e.g. on scene unload.
    ///
    /// Persisted flags are left untouched; the next move-in guard treats the
    /// surviving handle as stale state for the host to reconcile.
    pub fn shutdown(&self) -> Result<()> {
        self.scheduler.shutdown()
    }
}

/// One token's periodic tick task.
///
/// Each fire reads the persisted countdown, plans the tick, and executes it
/// inline, so ticks for a token are serialized: slow render or flag writes
/// delay the next fire instead of overlapping it.
struct TickTask {
    host: HostEnv,
    scheduler: Arc<TimerScheduler>,
    events: broadcast::Sender<CountdownEvent>,
    token: TokenId,
    config: DelayedTeleportConfig,
    timer_id: TimerId,
    period: Duration,
}

impl TickTask {
    async fn run(self) {
        // The controller ran the initial tick inline, so the first scheduled
        // fire lands one period after start.
        let mut interval = time::interval_at(time::Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let remaining = match read_countdown(&self.host, &self.token).await {
                Ok(value) => value,
                Err(err) => {
                    warn!(token = %self.token, %err, "failed to read countdown flag, retrying next tick");
                    continue;
                }
            };

            match plan_tick(remaining, &self.config, self.host.pause().is_paused()) {
                TickPlan::Skip => {
                    debug!(token = %self.token, "session paused, skipping tick");
                }
                TickPlan::Advance { render, next_value } => {
                    debug!(token = %self.token, remaining, "counting down");
                    match apply_advance(&self.host, &self.token, render, next_value).await {
                        Ok(()) => {
                            let _ = self.events.send(CountdownEvent::Ticked {
                                token: self.token.clone(),
                                remaining,
                            });
                        }
                        Err(err) => {
                            warn!(token = %self.token, %err, "tick failed, retrying next interval");
                        }
                    }
                }
                TickPlan::Complete => {
                    self.complete().await;
                    break;
                }
            }
        }
    }

    /// Tears the timer down and delegates the teleport.
    async fn complete(&self) {
        debug!(
            token = %self.token,
            timer_id = %self.timer_id,
            destination = %self.config.destination,
            "countdown complete, teleporting"
        );

        match self.scheduler.complete(&self.token, self.timer_id) {
            Ok(true) => {}
            Ok(false) => {
                // A cancel-then-restart raced us; the successor timer owns
                // the token now, so this task must not touch the flags.
                debug!(token = %self.token, "timer superseded before completion");
                return;
            }
            Err(err) => {
                error!(token = %self.token, %err, "failed to deregister completed timer");
            }
        }

        if let Err(err) = clear_flags(&self.host, &self.token).await {
            warn!(token = %self.token, %err, "failed to clear timer flags");
        }
        let _ = self.events.send(CountdownEvent::Completed {
            token: self.token.clone(),
        });

        // Hand off to the host as if the token had freshly triggered a
        // standard teleport-on-enter event.
        let event = RegionEvent::TokenMoveIn {
            token: self.token.clone(),
            config: self.config.clone(),
        };
        if let Err(err) = self.host.teleport().teleport(event).await {
            error!(token = %self.token, %err, "delegated teleport failed");
        }
    }
}

async fn read_countdown(host: &HostEnv, token: &TokenId) -> Result<i64> {
    let value = host
        .flags()
        .get_flag(MODULE_ID, token, FLAG_COUNTDOWN)
        .await?;
    // A missing or malformed value counts as elapsed; see `plan_tick`.
    Ok(value.and_then(|v| v.as_i64()).unwrap_or(0))
}

/// Executes an `Advance` plan: the optional floating-text render and the
/// decrement write are issued concurrently and both awaited.
async fn apply_advance(
    host: &HostEnv,
    token: &TokenId,
    render: Option<CountdownText>,
    next_value: i64,
) -> Result<()> {
    let render_fut = async {
        if let Some(text) = render {
            // Re-resolve the visual so the text follows the token. A token
            // that vanished mid-countdown skips the render.
            if let Some(visual) = host.tokens().visual(token) {
                host.text()
                    .render_text(
                        visual.center,
                        anchor_distance(visual.height),
                        &text.value.to_string(),
                        text.style,
                    )
                    .await?;
            }
        }
        Ok::<(), RuntimeError>(())
    };
    let write_fut = host
        .flags()
        .set_flag(MODULE_ID, token, FLAG_COUNTDOWN, Some(json!(next_value)));

    let (render_result, write_result) = tokio::join!(render_fut, write_fut);
    render_result?;
    write_result?;
    Ok(())
}

/// Clears both timer flags.
///
/// The countdown value is reset alongside the handle so a later move-in
/// always restarts from the configured delay.
async fn clear_flags(host: &HostEnv, token: &TokenId) -> Result<()> {
    let clear_interval = host.flags().set_flag(MODULE_ID, token, FLAG_INTERVAL, None);
    let clear_countdown = host.flags().set_flag(MODULE_ID, token, FLAG_COUNTDOWN, None);
    let (interval_result, countdown_result) = tokio::join!(clear_interval, clear_countdown);
    interval_result?;
    countdown_result?;
    Ok(())
}
