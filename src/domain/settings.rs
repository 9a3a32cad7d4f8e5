use super::enums::{LayoutMode, TimerMode};
use serde::{Deserialize, Serialize};

/// Upper bound for any duration entered through the settings form
pub const MAX_MINUTES: u32 = 240;

/// User preferences; one instance per process.
///
/// Field names follow the persisted blob (camelCase). Every field has a
/// default so partially written blobs still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Minutes
    pub pomodoro_time: u32,
    pub short_break_time: u32,
    pub long_break_time: u32,
    pub custom_time: u32,
    /// Focus sessions before a long break
    pub long_break_interval: u32,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
    pub sound_enabled: bool,
    pub daily_goal: u32,
    pub layout_mode: LayoutMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pomodoro_time: 25,
            short_break_time: 5,
            long_break_time: 15,
            custom_time: 30,
            long_break_interval: 4,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            sound_enabled: true,
            daily_goal: 8,
            layout_mode: LayoutMode::Stacked,
        }
    }
}

impl Settings {
    /// Configured minutes for a mode
    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.pomodoro_time,
            TimerMode::ShortBreak => self.short_break_time,
            TimerMode::LongBreak => self.long_break_time,
            TimerMode::Custom => self.custom_time,
        }
    }

    /// Full countdown length for a mode in seconds
    pub fn seconds_for(&self, mode: TimerMode) -> u32 {
        self.minutes_for(mode) * 60
    }

    /// Clamp every numeric field into its usable range.
    /// Returns true if anything had to change.
    pub fn sanitize(&mut self) -> bool {
        let before = self.clone();
        for value in [
            &mut self.pomodoro_time,
            &mut self.short_break_time,
            &mut self.long_break_time,
            &mut self.custom_time,
        ] {
            *value = (*value).clamp(1, MAX_MINUTES);
        }
        self.long_break_interval = self.long_break_interval.max(1);
        self.daily_goal = self.daily_goal.max(1);
        before != *self
    }
}

/// Rows of the settings form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Theme,
    PomodoroTime,
    ShortBreakTime,
    LongBreakTime,
    CustomTime,
    AutoStartBreaks,
    AutoStartPomodoros,
    SoundEnabled,
    DailyGoal,
    LongBreakInterval,
    LayoutMode,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::Theme,
            SettingsField::PomodoroTime,
            SettingsField::ShortBreakTime,
            SettingsField::LongBreakTime,
            SettingsField::CustomTime,
            SettingsField::AutoStartBreaks,
            SettingsField::AutoStartPomodoros,
            SettingsField::SoundEnabled,
            SettingsField::DailyGoal,
            SettingsField::LongBreakInterval,
            SettingsField::LayoutMode,
        ]
    }

    fn index(self) -> usize {
        Self::all().iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::PomodoroTime => "Pomodoro (min)",
            Self::ShortBreakTime => "Short Break (min)",
            Self::LongBreakTime => "Long Break (min)",
            Self::CustomTime => "Custom (min)",
            Self::AutoStartBreaks => "Auto-start Breaks",
            Self::AutoStartPomodoros => "Auto-start Pomodoros",
            Self::SoundEnabled => "Sound Enabled",
            Self::DailyGoal => "Daily Goal",
            Self::LongBreakInterval => "Long Break Interval",
            Self::LayoutMode => "Layout",
        }
    }

    /// Section heading the row belongs to
    pub fn section(&self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::PomodoroTime | Self::ShortBreakTime | Self::LongBreakTime | Self::CustomTime => {
                "Timer"
            }
            Self::AutoStartBreaks | Self::AutoStartPomodoros => "Automation",
            _ => "Misc",
        }
    }

    /// Fields that change a countdown length
    pub fn affects_durations(&self) -> bool {
        matches!(
            self,
            Self::PomodoroTime | Self::ShortBreakTime | Self::LongBreakTime | Self::CustomTime
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.minutes_for(TimerMode::Focus), 25);
        assert_eq!(s.minutes_for(TimerMode::ShortBreak), 5);
        assert_eq!(s.minutes_for(TimerMode::LongBreak), 15);
        assert_eq!(s.minutes_for(TimerMode::Custom), 30);
        assert_eq!(s.long_break_interval, 4);
        assert!(s.sound_enabled);
        assert_eq!(s.daily_goal, 8);
    }

    #[test]
    fn test_seconds_for() {
        let s = Settings::default();
        assert_eq!(s.seconds_for(TimerMode::Focus), 1500);
        assert_eq!(s.seconds_for(TimerMode::LongBreak), 900);
    }

    #[test]
    fn test_sanitize_clamps_zeroes() {
        let mut s = Settings {
            pomodoro_time: 0,
            long_break_interval: 0,
            daily_goal: 0,
            short_break_time: 10_000,
            ..Settings::default()
        };
        assert!(s.sanitize());
        assert_eq!(s.pomodoro_time, 1);
        assert_eq!(s.short_break_time, MAX_MINUTES);
        assert_eq!(s.long_break_interval, 1);
        assert_eq!(s.daily_goal, 1);

        assert!(!s.sanitize());
    }

    #[test]
    fn test_camel_case_blob_fields() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["pomodoroTime"], 25);
        assert_eq!(json["longBreakInterval"], 4);
        assert_eq!(json["layoutMode"], "stacked");
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let s: Settings = serde_json::from_str(r#"{"pomodoroTime": 50}"#).unwrap();
        assert_eq!(s.pomodoro_time, 50);
        assert_eq!(s.short_break_time, 5);
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(SettingsField::Theme.next(), SettingsField::PomodoroTime);
        assert_eq!(SettingsField::Theme.prev(), SettingsField::LayoutMode);
        assert_eq!(SettingsField::LayoutMode.next(), SettingsField::Theme);
    }
}
