//! The tick planner: the authoritative decision for what one countdown tick
//! does, given the persisted countdown value and the host pause state.
//!
//! The planner is a pure function. The runtime reads the persisted value,
//! calls [`plan_tick`], and executes the resulting plan against the host
//! (render, flag write, teleport delegation). This keeps the state machine
//! testable without any host fakes.

use crate::config::DelayedTeleportConfig;
use crate::style::CountdownStyle;

/// One floating countdown number to render, with its urgency styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountdownText {
    pub value: i64,
    pub style: CountdownStyle,
}

/// What a single tick of the countdown should do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPlan {
    /// The session is globally paused: no state change, no teleport progress.
    /// The timer stays scheduled for the next interval.
    Skip,
    /// The countdown is still running: optionally render the remaining value,
    /// and persist the decremented count. Both effects are issued
    /// concurrently by the runtime.
    Advance {
        render: Option<CountdownText>,
        next_value: i64,
    },
    /// The countdown has elapsed: clear the timer, then delegate to the
    /// host's teleport action.
    Complete,
}

/// Plans one tick from the persisted remaining count.
///
/// A missing persisted value is treated as zero, so a countdown whose state
/// write was lost completes rather than running forever.
pub fn plan_tick(remaining: i64, config: &DelayedTeleportConfig, paused: bool) -> TickPlan {
    if paused {
        return TickPlan::Skip;
    }

    if remaining > 0 {
        let render = config.show_countdown.then(|| CountdownText {
            value: remaining,
            style: CountdownStyle::for_remaining(remaining),
        });
        TickPlan::Advance {
            render,
            next_value: remaining - 1,
        }
    } else {
        TickPlan::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Destination;
    use crate::style::{FILL_CALM, FILL_URGENT};

    fn config(delay: u32) -> DelayedTeleportConfig {
        DelayedTeleportConfig::new(delay, Destination::new("elsewhere"))
    }

    #[test]
    fn paused_tick_changes_nothing() {
        assert_eq!(plan_tick(5, &config(5), true), TickPlan::Skip);
        assert_eq!(plan_tick(0, &config(5), true), TickPlan::Skip);
    }

    #[test]
    fn positive_count_renders_and_decrements() {
        let plan = plan_tick(5, &config(5), false);
        let TickPlan::Advance { render, next_value } = plan else {
            panic!("expected Advance, got {plan:?}");
        };
        assert_eq!(next_value, 4);
        let text = render.unwrap();
        assert_eq!(text.value, 5);
        assert_eq!(text.style.font_size, 48);
    }

    #[test]
    fn render_is_suppressed_when_countdown_hidden() {
        let config = config(5).with_show_countdown(false);
        for remaining in [1, 2, 7, 20] {
            let plan = plan_tick(remaining, &config, false);
            let TickPlan::Advance { render, next_value } = plan else {
                panic!("expected Advance, got {plan:?}");
            };
            assert!(render.is_none());
            assert_eq!(next_value, remaining - 1);
        }
    }

    #[test]
    fn elapsed_count_completes() {
        assert_eq!(plan_tick(0, &config(2), false), TickPlan::Complete);
        assert_eq!(plan_tick(-1, &config(2), false), TickPlan::Complete);
    }

    // Tick-by-tick walk of a delay-2 countdown: both values fall in the
    // urgent band, then the third tick completes.
    #[test]
    fn delay_two_scenario() {
        let config = config(2);

        let first = plan_tick(2, &config, false);
        let TickPlan::Advance { render, next_value } = first else {
            panic!("expected Advance, got {first:?}");
        };
        // 2 remaining is within the <= 3 urgency band
        let text = render.unwrap();
        assert_eq!(text.style.font_size, 64);
        assert_eq!(text.style.fill, FILL_URGENT);
        assert_eq!(next_value, 1);

        let second = plan_tick(1, &config, false);
        let TickPlan::Advance { render, next_value } = second else {
            panic!("expected Advance, got {second:?}");
        };
        let text = render.unwrap();
        assert_eq!(text.style.font_size, 64);
        assert_eq!(text.style.fill, FILL_URGENT);
        assert_eq!(next_value, 0);

        assert_eq!(plan_tick(0, &config, false), TickPlan::Complete);
    }

    #[test]
    fn long_countdown_starts_calm() {
        let plan = plan_tick(12, &config(12), false);
        let TickPlan::Advance { render, .. } = plan else {
            panic!("expected Advance, got {plan:?}");
        };
        let text = render.unwrap();
        assert_eq!(text.style.font_size, 28);
        assert_eq!(text.style.fill, FILL_CALM);
    }
}
