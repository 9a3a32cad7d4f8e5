use crate::app::AppState;
use crate::dashboard::{clock_label, date_label};
use crate::ui::styles::Palette;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};

/// Clock and date on the left, weather on the right, quote underneath
pub fn render_dashboard_pane(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let now = Local::now();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(rows[0]);

    let clock = vec![
        Line::from(Span::styled(
            format!(" {}", clock_label(&now)),
            palette.title_style(),
        )),
        Line::from(Span::styled(
            format!(" {}", date_label(&now).to_uppercase()),
            Style::default().fg(palette.muted),
        )),
    ];
    f.render_widget(Paragraph::new(clock).style(palette.base_style()), top[0]);

    let weather = Paragraph::new(Line::from(Span::styled(
        format!("{} ", app.dashboard.weather.label()),
        palette.title_style(),
    )))
    .alignment(Alignment::Right)
    .style(palette.base_style());
    f.render_widget(weather, top[1]);

    let quote = Paragraph::new(Line::from(Span::styled(
        format!("\"{}\"", app.dashboard.quote),
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(palette.base_style());
    f.render_widget(quote, rows[1]);
}

/// "#N / goal Daily Goal" with a bar capped at 100%
pub fn render_goal_bar(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let (done, goal, ratio) = app.goal_progress();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        Paragraph::new(format!("#{} / {} Daily Goal", done, goal))
            .alignment(Alignment::Center)
            .style(palette.base_style()),
        rows[0],
    );

    let bar_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(rows[1])[1];
    let gauge = Gauge::default()
        .gauge_style(palette.gauge_style())
        .ratio(ratio)
        .label("");
    f.render_widget(gauge, bar_area);
}
