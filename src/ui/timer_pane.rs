use crate::app::AppState;
use crate::domain::TimerMode;
use crate::ui::layout::centered_rect;
use crate::ui::styles::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::f64::consts::TAU;

/// One cell of the progress ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingCell {
    Empty,
    /// On the ring, inside the remaining arc
    Lit,
    /// On the ring, already elapsed
    Dim,
}

/// Rasterise an ellipse inscribed in `width` x `height` cells.
///
/// The lit arc starts at 12 o'clock and runs clockwise for `ratio` of the
/// circumference, so it shrinks as the countdown runs.
pub fn ring_grid(width: u16, height: u16, ratio: f64) -> Vec<Vec<RingCell>> {
    let (w, h) = (width as usize, height as usize);
    let mut grid = vec![vec![RingCell::Empty; w]; h];
    if w == 0 || h == 0 {
        return grid;
    }

    // Smallest angular fraction at which each cell is reached
    let mut reached: Vec<Vec<Option<f64>>> = vec![vec![None; w]; h];
    let cx = (w - 1) as f64 / 2.0;
    let cy = (h - 1) as f64 / 2.0;
    let steps = 8 * (w + h);

    for i in 0..steps {
        let fraction = i as f64 / steps as f64;
        let angle = fraction * TAU;
        let x = (cx + cx * angle.sin()).round() as usize;
        let y = (cy - cy * angle.cos()).round() as usize;
        let (x, y) = (x.min(w - 1), y.min(h - 1));
        if reached[y][x].is_none() {
            reached[y][x] = Some(fraction);
        }
    }

    let ratio = ratio.clamp(0.0, 1.0);
    for (y, row) in reached.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(fraction) = cell {
                grid[y][x] = if *fraction < ratio {
                    RingCell::Lit
                } else {
                    RingCell::Dim
                };
            }
        }
    }

    grid
}

/// Mode switcher row: current mode highlighted
fn mode_switcher(current: TimerMode, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, mode) in TimerMode::all().iter().enumerate() {
        let label = format!(" {} {} ", i + 1, mode.name());
        let style = if *mode == current {
            Style::default()
                .fg(palette.card)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.card_text)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Render the timer card: mode switcher, ring with time, controls
pub fn render_timer_pane(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.card_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode switcher
            Constraint::Length(1),
            Constraint::Min(5),    // Ring
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(mode_switcher(app.timer.mode(), palette)).alignment(Alignment::Center),
        rows[0],
    );

    // Cells are roughly twice as tall as wide
    let ring_height = rows[2].height.min(11);
    let ring_area = centered_rect(rows[2], ring_height * 2 + 1, ring_height);
    let grid = ring_grid(
        ring_area.width,
        ring_area.height,
        app.timer.remaining_ratio(&app.settings),
    );
    let lit = Style::default().fg(palette.accent);
    let dim = Style::default().fg(palette.muted);
    let ring_lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        RingCell::Empty => Span::raw(" "),
                        RingCell::Lit => Span::styled("●", lit),
                        RingCell::Dim => Span::styled("·", dim),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(ring_lines), ring_area);

    // Time and state over the middle of the ring
    let center = centered_rect(ring_area, ring_area.width.saturating_sub(4), 3);
    let action = if app.timer.is_active() { "PAUSE" } else { "START" };
    let center_lines = vec![
        Line::from(Span::styled(app.timer.formatted(), palette.accent_style())),
        Line::from(Span::raw(app.timer.mode().label())),
        Line::from(Span::styled(action, Style::default().fg(palette.muted))),
    ];
    f.render_widget(
        Paragraph::new(center_lines).alignment(Alignment::Center),
        center,
    );

    let sound = if app.settings.sound_enabled {
        "♪ on"
    } else {
        "♪ off"
    };
    let secondary = if app.timer.is_active() {
        "n skip"
    } else {
        "r reset"
    };
    let controls = Line::from(vec![
        Span::raw(format!("m {}   ", sound)),
        Span::styled("Space", palette.accent_style()),
        Span::raw(format!(" {}   ", action.to_lowercase())),
        Span::raw(secondary),
    ]);
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        rows[3],
    );
}
