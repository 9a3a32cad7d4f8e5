use crate::domain::UiMode;
use crate::ui::styles::Palette;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Short hints for the bottom bar, per UI mode
pub fn hints(mode: UiMode) -> &'static [&'static str] {
    match mode {
        UiMode::Normal => &[
            "Space start/pause",
            "r reset",
            "n skip",
            "1-4 mode",
            "a add",
            "Enter focus",
            "? help",
            "q quit",
        ],
        UiMode::AddingTask | UiMode::EditingTask => {
            &["Tab switch field", "↑/↓ estimate", "Enter save", "Esc cancel"]
        }
        UiMode::Settings => &["↑/↓ field", "←/→ change", "Esc close"],
        UiMode::Stats => &["Esc close"],
        UiMode::Help => &["any key close"],
    }
}

/// Every binding, for the help modal
pub const ALL_BINDINGS: &[(&str, &str)] = &[
    ("Space", "Start / pause timer"),
    ("r", "Reset current mode"),
    ("n", "Skip to next mode"),
    ("1 2 3 4", "Pomodoro / Short / Long / Custom"),
    ("↑/↓ j/k", "Move task cursor"),
    ("Enter / s", "Focus on highlighted task"),
    ("a", "Add task"),
    ("e", "Edit task"),
    ("c", "Toggle task complete"),
    ("d / Del", "Delete task"),
    ("t", "Cycle theme"),
    ("m", "Toggle sound"),
    ("l", "Toggle layout"),
    ("o / ,", "Settings"),
    ("i", "Statistics"),
    ("q", "Quit"),
];

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, palette: &Palette, area: Rect) {
    let spans: Vec<Span> = hints(mode)
        .iter()
        .map(|h| Span::raw(format!(" {}  ", h)))
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).style(palette.base_style().patch(palette.hint_style()));
    f.render_widget(paragraph, area);
}
