//! Countdown and mode transitions.
//!
//! The timer never looks at the wall clock. The event loop calls [`Timer::tick`]
//! once per elapsed second while the timer is active; everything else is an
//! explicit user action.

use crate::domain::{Settings, TimerMode};

/// Outcome of a finished countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Mode whose countdown just finished
    pub finished: TimerMode,
    /// Mode the timer moved into
    pub next: TimerMode,
    /// Whether the next countdown started on its own
    pub auto_started: bool,
    /// Focus sessions completed in this process, after this completion
    pub focus_sessions: u32,
}

/// Transient timer state (never persisted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    mode: TimerMode,
    remaining: u32,
    active: bool,
    completed_focus: u32,
}

impl Timer {
    /// Focus mode at full length, paused
    pub fn new(settings: &Settings) -> Self {
        Self {
            mode: TimerMode::Focus,
            remaining: settings.seconds_for(TimerMode::Focus),
            active: false,
            completed_focus: 0,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    #[cfg(test)]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn completed_focus(&self) -> u32 {
        self.completed_focus
    }

    /// Enter `mode` at its full configured length, paused
    pub fn switch_mode(&mut self, mode: TimerMode, settings: &Settings) {
        self.mode = mode;
        self.remaining = settings.seconds_for(mode);
        self.active = false;
    }

    /// Start or pause. Returns the new active flag.
    pub fn toggle(&mut self) -> bool {
        if !self.active && self.remaining == 0 {
            return false;
        }
        self.active = !self.active;
        self.active
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Re-enter the current mode at full length, paused
    pub fn reset(&mut self, settings: &Settings) {
        self.switch_mode(self.mode, settings);
    }

    /// Advance one second. Returns the completion when the countdown hits zero.
    pub fn tick(&mut self, settings: &Settings) -> Option<Completion> {
        if !self.active {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return Some(self.complete(settings));
        }
        None
    }

    /// Finish the current mode now and move to the next one
    pub fn complete(&mut self, settings: &Settings) -> Completion {
        let finished = self.mode;
        let (next, auto_start) = match finished {
            TimerMode::Focus => {
                self.completed_focus += 1;
                let interval = settings.long_break_interval.max(1);
                let next = if self.completed_focus % interval == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                };
                (next, settings.auto_start_breaks)
            }
            TimerMode::ShortBreak | TimerMode::LongBreak | TimerMode::Custom => {
                (TimerMode::Focus, settings.auto_start_pomodoros)
            }
        };

        self.switch_mode(next, settings);
        self.active = auto_start;

        Completion {
            finished,
            next,
            auto_started: auto_start,
            focus_sessions: self.completed_focus,
        }
    }

    /// Follow a settings change: a paused timer reloads the full length of its
    /// mode, a running one is clamped so it never exceeds the new length.
    pub fn sync_to_settings(&mut self, settings: &Settings) {
        let full = settings.seconds_for(self.mode);
        if self.active {
            self.remaining = self.remaining.min(full);
        } else {
            self.remaining = full;
        }
    }

    /// Fraction of the countdown still left, 0.0..=1.0
    pub fn remaining_ratio(&self, settings: &Settings) -> f64 {
        let total = settings.seconds_for(self.mode);
        if total == 0 {
            return 0.0;
        }
        (self.remaining as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// "MM:SS"
    pub fn formatted(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as zero-padded "MM:SS" (minutes may exceed 59)
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
