use crate::domain::{Theme, TimerMode};
use ratatui::style::{Color, Modifier, Style};

/// Accent colour of a mode under a theme
pub fn mode_color(theme: Theme, mode: TimerMode) -> Color {
    match (theme, mode) {
        (Theme::Light, TimerMode::Focus) => Color::Rgb(186, 73, 73),
        (Theme::Light, TimerMode::ShortBreak) => Color::Rgb(56, 133, 138),
        (Theme::Light, TimerMode::LongBreak) => Color::Rgb(57, 112, 151),
        (Theme::Light, TimerMode::Custom) => Color::Rgb(125, 83, 162),
        (Theme::Dark, TimerMode::Focus) => Color::Rgb(120, 48, 48),
        (Theme::Dark, TimerMode::ShortBreak) => Color::Rgb(33, 84, 88),
        (Theme::Dark, TimerMode::LongBreak) => Color::Rgb(34, 68, 96),
        (Theme::Dark, TimerMode::Custom) => Color::Rgb(78, 50, 104),
        (Theme::Neon, TimerMode::Focus) => Color::Rgb(255, 0, 128),
        (Theme::Neon, TimerMode::ShortBreak) => Color::Rgb(0, 255, 200),
        (Theme::Neon, TimerMode::LongBreak) => Color::Rgb(0, 170, 255),
        (Theme::Neon, TimerMode::Custom) => Color::Rgb(190, 0, 255),
    }
}

/// Colours for one frame, derived from theme and current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub card: Color,
    pub card_text: Color,
}

impl Palette {
    pub fn new(theme: Theme, mode: TimerMode) -> Self {
        let accent = mode_color(theme, mode);
        match theme {
            Theme::Light => Self {
                background: accent,
                text: Color::White,
                muted: Color::Rgb(235, 225, 225),
                accent,
                card: Color::Rgb(250, 250, 250),
                card_text: Color::Rgb(40, 40, 40),
            },
            Theme::Dark => Self {
                background: accent,
                text: Color::Rgb(230, 230, 230),
                muted: Color::Rgb(160, 160, 160),
                accent,
                card: Color::Rgb(32, 32, 36),
                card_text: Color::Rgb(230, 230, 230),
            },
            // Neon keeps a black background; only the accents glow
            Theme::Neon => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Rgb(130, 130, 150),
                accent,
                card: Color::Black,
                card_text: Color::White,
            },
        }
    }

    /// Whole-screen fill
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Timer card and modal interior
    pub fn card_style(&self) -> Style {
        Style::default().fg(self.card_text).bg(self.card)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Highlighted row
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightCyan)
            .add_modifier(Modifier::BOLD)
    }

    /// Completed task
    pub fn done_style(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn gauge_style(&self) -> Style {
        Style::default().fg(self.text).bg(Color::DarkGray)
    }

    pub fn modal_title_style(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}

/// Over-estimate warning style
pub fn over_estimate_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
