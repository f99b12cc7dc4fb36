//! # Countdown Timer
//!
//! The one time-driven piece of the page. A timer is a two-state machine:
//!
//! ```text
//!            tick (n > 1)
//!           ┌──────────┐
//!           ▼          │
//!   ──▶ Running(n) ────┘
//!           │ tick (n == 1)
//!           ▼
//!        Finished  (terminal until the duration is reset)
//! ```
//!
//! The duration is parsed from `HH:MM:SS`. Anything that does not parse
//! (wrong arity, non-numeric or negative parts) counts as zero seconds, and a
//! zero duration starts out `Finished`.
//!
//! This module is synchronous and clock-free: the caller decides when a tick
//! happens. [`crate::timer`] drives it from a tokio interval.

use serde::Serialize;

use crate::content::CountdownSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "remaining", rename_all = "lowercase")]
pub enum CountdownState {
    Running(u64),
    Finished,
}

impl CountdownState {
    pub fn from_seconds(total: u64) -> Self {
        if total == 0 {
            CountdownState::Finished
        } else {
            CountdownState::Running(total)
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, CountdownState::Finished)
    }
}

/// Total seconds in an `HH:MM:SS` string, or 0 when it does not parse.
pub fn parse_duration(duration: &str) -> u64 {
    let parts: Vec<&str> = duration.trim().split(':').collect();
    if parts.len() != 3 {
        return 0;
    }
    let mut total: u64 = 0;
    for (part, unit) in parts.iter().zip([3600u64, 60, 1]) {
        match part.trim().parse::<u64>() {
            Ok(n) => total = total.saturating_add(n.saturating_mul(unit)),
            Err(_) => return 0,
        }
    }
    total
}

/// Zero-padded `HH:MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    duration: String,
    state: CountdownState,
}

impl CountdownTimer {
    pub fn new(duration: &str) -> Self {
        Self {
            duration: duration.to_string(),
            state: CountdownState::from_seconds(parse_duration(duration)),
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Advance one second.
    pub fn tick(&mut self) -> CountdownState {
        if let CountdownState::Running(n) = self.state {
            self.state = CountdownState::from_seconds(n - 1);
        }
        self.state
    }

    /// Start over from a new duration.
    pub fn set_duration(&mut self, duration: &str) {
        *self = Self::new(duration);
    }
}

/// What the timer shows right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownDisplay {
    pub text: String,
    /// Present only while running.
    pub clock: Option<String>,
}

pub fn display(settings: &CountdownSettings, state: CountdownState) -> CountdownDisplay {
    match state {
        CountdownState::Running(n) => CountdownDisplay {
            text: settings.active_text.clone(),
            clock: Some(format_clock(n)),
        },
        CountdownState::Finished => CountdownDisplay {
            text: settings.finished_text.clone(),
            clock: None,
        },
    }
}
