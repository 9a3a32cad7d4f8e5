use crate::app::{AppState, TaskFormField};
use crate::domain::task::{MAX_ESTIMATE, MIN_ESTIMATE};
use crate::ui::{layout::create_modal_area, styles::Palette};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    if let Some(form) = &app.task_form {
        let modal_area = create_modal_area(area, 60, 11);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.editing.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };
        let cursor = |field: TaskFormField| {
            if form.field == field {
                Span::styled("█", palette.modal_title_style())
            } else {
                Span::raw("")
            }
        };

        let placeholder = form.title.is_empty();
        let title_span = if placeholder {
            Span::styled("What are you working on?", palette.hint_style())
        } else {
            Span::styled(form.title.as_str(), palette.modal_title_style())
        };

        let lines = vec![
            Line::raw(""),
            Line::raw("Title:"),
            Line::from(vec![Span::raw("> "), title_span, cursor(TaskFormField::Title)]),
            Line::raw(""),
            Line::raw(format!("Est Pomodoros ({}-{}):", MIN_ESTIMATE, MAX_ESTIMATE)),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(form.estimate.to_string(), palette.modal_title_style()),
                cursor(TaskFormField::Estimate),
            ]),
            Line::raw(""),
            Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, palette.modal_title_style()))
                    .style(palette.card_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
