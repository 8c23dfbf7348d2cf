//! Countdown used by `focus add --timer`. The countdown is driven by a [Clock] and stops early when
//! its [CancellationToken] fires; callers branch on the returned [TimerOutcome].

pub mod shutdown;

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::utils::clock::Clock;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Completed { minutes: u32 },
    Cancelled { elapsed_minutes: u32 },
}

impl TimerOutcome {
    /// Minutes that should be recorded for the session.
    pub fn minutes(&self) -> u32 {
        match *self {
            TimerOutcome::Completed { minutes } => minutes,
            TimerOutcome::Cancelled { elapsed_minutes } => elapsed_minutes,
        }
    }
}

pub struct Countdown<'a> {
    duration: Duration,
    tick: Duration,
    clock: &'a dyn Clock,
    shutdown: CancellationToken,
}

impl<'a> Countdown<'a> {
    pub fn new(
        duration: Duration,
        tick: Duration,
        clock: &'a dyn Clock,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            duration,
            tick,
            clock,
            shutdown,
        }
    }

    pub fn from_minutes(minutes: u32, clock: &'a dyn Clock, shutdown: CancellationToken) -> Self {
        Self::new(
            Duration::from_secs(u64::from(minutes) * 60),
            DEFAULT_TICK,
            clock,
            shutdown,
        )
    }

    /// Executes the countdown. `on_tick` receives the remaining time once per tick.
    pub async fn run(self, mut on_tick: impl FnMut(Duration)) -> TimerOutcome {
        let start = self.clock.instant();
        let deadline = start + self.duration;
        let mut next_tick = start;
        info!("Starting countdown for {:?}", self.duration);
        loop {
            let now = self.clock.instant();
            if now >= deadline {
                info!("Countdown finished");
                return TimerOutcome::Completed {
                    minutes: whole_minutes(self.duration),
                };
            }
            on_tick(deadline - now);
            next_tick += self.tick;

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let elapsed = self.clock.instant() - start;
                    debug!("Countdown cancelled after {elapsed:?}");
                    return TimerOutcome::Cancelled {
                        elapsed_minutes: whole_minutes(elapsed),
                    };
                }
                _ = self.clock.sleep_until(next_tick.min(deadline)) => ()
            }
        }
    }
}

fn whole_minutes(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs() / 60).unwrap_or(u32::MAX)
}

/// `MM:SS`, rounding partial seconds up so a fresh 25 minute timer shows `25:00`.
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = remaining.as_millis().div_ceil(1000);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
