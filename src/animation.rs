//! Year animation of the map tab.
//!
//! A two-state machine owned by the dashboard. The machine does not hold a
//! timer itself; transitions return the [`Effect`] the event loop must apply
//! (start or cancel the repeating tick).

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Timer instruction for the event loop driving the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    StartTimer { interval: Duration },
    CancelTimer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimationState {
    Stopped,
    Running,
}

/// Result of one timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Move the selected year forward
    Advanced(i32),
    /// Last year reached; the animation stopped and the year is unchanged
    Finished(i32),
    /// Tick arrived while stopped
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearAnimation {
    state: AnimationState,
    first_year: i32,
    last_year: i32,
    interval: Duration,
}

impl YearAnimation {
    pub fn new(first_year: i32, last_year: i32, interval: Duration) -> Self {
        Self {
            state: AnimationState::Stopped,
            first_year,
            last_year,
            interval,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Play/Stop button label for the current state
    pub fn button_label(&self) -> &'static str {
        match self.state {
            AnimationState::Stopped => "Play",
            AnimationState::Running => "Stop",
        }
    }

    pub fn start(&mut self) -> Option<Effect> {
        match self.state {
            AnimationState::Running => None,
            AnimationState::Stopped => {
                debug!("Animation started ({:?} interval)", self.interval);
                self.state = AnimationState::Running;
                Some(Effect::StartTimer {
                    interval: self.interval,
                })
            }
        }
    }

    /// Stop the animation; no-op when already stopped
    pub fn stop(&mut self) -> Option<Effect> {
        match self.state {
            AnimationState::Stopped => None,
            AnimationState::Running => {
                debug!("Animation stopped");
                self.state = AnimationState::Stopped;
                Some(Effect::CancelTimer)
            }
        }
    }

    pub fn toggle(&mut self) -> Option<Effect> {
        match self.state {
            AnimationState::Stopped => self.start(),
            AnimationState::Running => self.stop(),
        }
    }

    /// Advance from `current` or stop at the last year
    pub fn tick(&mut self, current: i32) -> TickOutcome {
        if self.state == AnimationState::Stopped {
            return TickOutcome::Idle;
        }
        if current < self.last_year {
            TickOutcome::Advanced(current + 1)
        } else {
            self.state = AnimationState::Stopped;
            debug!("Animation finished at {}", current);
            TickOutcome::Finished(current)
        }
    }

    /// Force `Stopped`; the caller moves the year back to `first_year`
    pub fn reset(&mut self) -> Option<Effect> {
        self.stop()
    }
}
