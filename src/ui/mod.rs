pub mod dashboard_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use dashboard_pane::{render_dashboard_pane, render_goal_bar};
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_help_modal, render_settings_modal, render_stats_modal};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use styles::Palette;
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;

/// App name on the left, theme and sound state on the right
fn render_header(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let sound = if app.settings.sound_enabled {
        "sound on"
    } else {
        "sound off"
    };
    let status = format!(
        "{} · {} · {} ",
        app.theme.name(),
        sound,
        app.settings.layout_mode.name()
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(status.chars().count() as u16),
        ])
        .split(area);

    let left = Paragraph::new(Line::from(Span::styled(" ◉ FocusFlow", palette.title_style())));
    f.render_widget(left, chunks[0]);

    let right = Paragraph::new(Line::from(Span::styled(status, palette.hint_style())))
        .alignment(Alignment::Right);
    f.render_widget(right, chunks[1]);
}

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let palette = Palette::new(app.theme, app.timer.mode());
    let layout = create_layout(size, app.settings.layout_mode);

    // Background fill for the whole screen
    f.render_widget(Block::default().style(palette.base_style()), size);

    render_header(f, app, &palette, layout.header_area);
    render_dashboard_pane(f, app, &palette, layout.dashboard_area);
    render_timer_pane(f, app, &palette, layout.timer_area);
    render_goal_bar(f, app, &palette, layout.goal_area);
    render_task_pane(f, app, &palette, layout.tasks_area);
    render_keybindings(f, app.ui_mode, &palette, layout.keybindings_area);

    match app.ui_mode {
        UiMode::AddingTask | UiMode::EditingTask => render_input_form(f, app, &palette, size),
        UiMode::Settings => render_settings_modal(f, app, &palette, size),
        UiMode::Stats => render_stats_modal(f, app, &palette, size),
        UiMode::Help => render_help_modal(f, &palette, size),
        UiMode::Normal => {}
    }
}
