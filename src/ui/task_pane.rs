use crate::app::AppState;
use crate::domain::task::completion_counts;
use crate::ui::styles::{over_estimate_style, Palette};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the task list with its header counter and current-focus banner
pub fn render_task_pane(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let (done, total) = completion_counts(&app.tasks);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Tasks ", palette.title_style()))
        .title(
            Title::from(Span::styled(format!(" {}/{} ", done, total), palette.title_style()))
                .alignment(Alignment::Right),
        )
        .border_style(palette.border_style())
        .style(palette.base_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let active = app.active_task();
    let banner_height = if active.is_some() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
        .split(inner);

    if let Some(task) = active {
        let banner = vec![
            Line::from(Span::styled("CURRENT FOCUS", palette.hint_style())),
            Line::from(Span::styled(task.title.clone(), palette.title_style())),
        ];
        f.render_widget(Paragraph::new(banner), chunks[0]);
    }

    if app.tasks.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No tasks yet. Press a to add one.",
            palette.hint_style(),
        )));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let is_active = app.active_task_id == Some(task.id);
            let marker = if is_active { "▶ " } else { "  " };
            let check = if task.completed { "[x] " } else { "[ ] " };
            let title_style = if task.completed {
                palette.done_style()
            } else {
                Style::default().fg(palette.text)
            };
            let progress_style = if task.is_over_estimate() {
                over_estimate_style()
            } else {
                palette.hint_style()
            };

            let line = Line::from(vec![
                Span::styled(marker, palette.title_style()),
                Span::raw(check),
                Span::styled(task.title.clone(), title_style),
                Span::raw("  "),
                Span::styled(task.progress_label(), progress_style),
            ]);

            if idx == app.selected_index {
                ListItem::new(line).style(palette.selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(List::new(items), chunks[1], &mut state);
}
