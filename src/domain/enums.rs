use serde::{Deserialize, Serialize};

/// Which countdown the timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    #[serde(rename = "pomodoro")]
    Focus,
    ShortBreak,
    LongBreak,
    Custom,
}

impl TimerMode {
    /// Short label for the mode switcher
    pub fn name(&self) -> &'static str {
        match self {
            Self::Focus => "Pomodoro",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
            Self::Custom => "Custom",
        }
    }

    /// Longer label shown under the ring
    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Focus time",
            Self::ShortBreak => "Short break",
            Self::LongBreak => "Long break",
            Self::Custom => "Custom timer",
        }
    }

    /// Word used in the terminal title ("Focus" or "Break")
    pub fn title_word(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            _ => "Break",
        }
    }

    /// Modes offered in the switcher, in display order
    pub fn all() -> &'static [TimerMode] {
        &[
            TimerMode::Focus,
            TimerMode::ShortBreak,
            TimerMode::LongBreak,
            TimerMode::Custom,
        ]
    }
}

/// Colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Neon,
}

impl Theme {
    /// Cycle light -> dark -> neon -> light
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Neon,
            Self::Neon => Self::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Neon => "neon",
        }
    }

    #[cfg(test)]
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::Neon]
    }
}

/// How the timer card and the task list are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    #[default]
    Stacked,
    SideBySide,
}

impl LayoutMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Stacked => Self::SideBySide,
            Self::SideBySide => Self::Stacked,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stacked => "stacked",
            Self::SideBySide => "side-by-side",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    Settings,
    Stats,
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Neon);
        assert_eq!(Theme::Neon.next(), Theme::Light);
    }

    #[test]
    fn test_timer_mode_serde_names() {
        assert_eq!(serde_json::to_string(&TimerMode::Focus).unwrap(), "\"pomodoro\"");
        assert_eq!(serde_json::to_string(&TimerMode::ShortBreak).unwrap(), "\"shortBreak\"");
        assert_eq!(serde_json::to_string(&TimerMode::LongBreak).unwrap(), "\"longBreak\"");
    }

    #[test]
    fn test_layout_mode_serde_names() {
        assert_eq!(serde_json::to_string(&LayoutMode::SideBySide).unwrap(), "\"side-by-side\"");
        let parsed: LayoutMode = serde_json::from_str("\"stacked\"").unwrap();
        assert_eq!(parsed, LayoutMode::Stacked);
    }

    #[test]
    fn test_title_word() {
        assert_eq!(TimerMode::Focus.title_word(), "Focus");
        assert_eq!(TimerMode::LongBreak.title_word(), "Break");
    }
}
