use crate::app::AppState;
use crate::domain::stats::{hours_minutes, short_date_label};
use crate::domain::SettingsField;
use crate::ui::keybindings::ALL_BINDINGS;
use crate::ui::{layout::create_modal_area, styles::Palette};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn on_off(flag: bool) -> &'static str {
    if flag {
        "On"
    } else {
        "Off"
    }
}

/// Display value of a settings row
pub fn setting_value(app: &AppState, field: SettingsField) -> String {
    let s = &app.settings;
    match field {
        SettingsField::Theme => app.theme.name().to_string(),
        SettingsField::PomodoroTime => s.pomodoro_time.to_string(),
        SettingsField::ShortBreakTime => s.short_break_time.to_string(),
        SettingsField::LongBreakTime => s.long_break_time.to_string(),
        SettingsField::CustomTime => s.custom_time.to_string(),
        SettingsField::AutoStartBreaks => on_off(s.auto_start_breaks).to_string(),
        SettingsField::AutoStartPomodoros => on_off(s.auto_start_pomodoros).to_string(),
        SettingsField::SoundEnabled => on_off(s.sound_enabled).to_string(),
        SettingsField::DailyGoal => s.daily_goal.to_string(),
        SettingsField::LongBreakInterval => s.long_break_interval.to_string(),
        SettingsField::LayoutMode => s.layout_mode.name().to_string(),
    }
}

fn modal_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, palette.modal_title_style()))
        .border_style(palette.border_style())
        .style(palette.card_style())
}

/// Render the settings form, one row per field grouped by section
pub fn render_settings_modal(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let fields = SettingsField::all();
    let modal_area = create_modal_area(area, 60, fields.len() as u16 + 10);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();
    let mut section = "";
    for field in fields {
        if field.section() != section {
            section = field.section();
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                section.to_uppercase(),
                Style::default().fg(palette.muted),
            )));
        }

        let label = format!("  {:<24}", field.label());
        let value = format!("‹ {} ›", setting_value(app, *field));
        let line = Line::from(vec![Span::raw(label), Span::raw(value)]);
        if *field == app.settings_cursor {
            lines.push(line.patch_style(palette.selected_style()));
        } else {
            lines.push(line);
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Settings ", palette))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Render totals and a bar chart of the most recent days
pub fn render_stats_modal(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let modal_area = create_modal_area(area, 60, 20);
    f.render_widget(Clear, modal_area);

    let block = modal_block(" Report ", palette);
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Totals
            Constraint::Length(1), // Heading
            Constraint::Min(0),    // Chart
        ])
        .split(inner);

    let (hours, minutes) = hours_minutes(app.stats.total_minutes());
    let totals = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("  {}h {}m", hours, minutes), palette.accent_style()),
            Span::raw(" focus time    "),
            Span::styled(app.stats.total_sessions().to_string(), palette.accent_style()),
            Span::raw(" sessions"),
        ]),
    ];
    f.render_widget(Paragraph::new(totals), rows[0]);
    f.render_widget(Paragraph::new("  Activity (Minutes)"), rows[1]);

    let recent = app.stats.recent(7);
    if recent.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  No activity yet",
                Style::default().fg(palette.muted),
            ))),
            rows[2],
        );
        return;
    }

    let labels: Vec<String> = recent.iter().map(|s| short_date_label(s.date)).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(recent)
        .map(|(label, stat)| (label.as_str(), stat.minutes_focused as u64))
        .collect();

    let chart = BarChart::default()
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(palette.accent))
        .value_style(palette.selected_style());
    f.render_widget(chart, rows[2]);
}

/// Render the full keybinding list
pub fn render_help_modal(f: &mut Frame, palette: &Palette, area: Rect) {
    let modal_area = create_modal_area(area, 60, ALL_BINDINGS.len() as u16 + 4);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (key, action) in ALL_BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", key), palette.modal_title_style()),
            Span::raw(*action),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(modal_block(" Keys ", palette));
    f.render_widget(paragraph, modal_area);
}
