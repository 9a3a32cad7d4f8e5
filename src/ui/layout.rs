use crate::domain::LayoutMode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub dashboard_area: Rect,
    pub timer_area: Rect,
    pub goal_area: Rect,
    pub tasks_area: Rect,
    pub keybindings_area: Rect,
}

const HEADER_HEIGHT: u16 = 1;
const DASHBOARD_HEIGHT: u16 = 4;
const GOAL_HEIGHT: u16 = 3;
const TIMER_MIN_HEIGHT: u16 = 13;

/// Create the main layout
/// - Top bar: app header (1 row)
/// - Bottom bar: keybindings (1 row)
/// - Stacked: dashboard, timer card, goal bar and task list in one column
/// - Side-by-side: dashboard, timer and goal on the left (55%), tasks on the right
pub fn create_layout(area: Rect, mode: LayoutMode) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1), // Keybindings bar
        ])
        .split(area);

    let header_area = main_chunks[0];
    let content_area = main_chunks[1];
    let keybindings_area = main_chunks[2];

    match mode {
        LayoutMode::Stacked => {
            let column = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(DASHBOARD_HEIGHT),
                    Constraint::Min(TIMER_MIN_HEIGHT),
                    Constraint::Length(GOAL_HEIGHT),
                    Constraint::Percentage(35),
                ])
                .split(content_area);

            MainLayout {
                header_area,
                dashboard_area: column[0],
                timer_area: column[1],
                goal_area: column[2],
                tasks_area: column[3],
                keybindings_area,
            }
        }
        LayoutMode::SideBySide => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(content_area);

            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(DASHBOARD_HEIGHT),
                    Constraint::Min(TIMER_MIN_HEIGHT),
                    Constraint::Length(GOAL_HEIGHT),
                ])
                .split(halves[0]);

            MainLayout {
                header_area,
                dashboard_area: left[0],
                timer_area: left[1],
                goal_area: left[2],
                tasks_area: halves[1],
                keybindings_area,
            }
        }
    }
}

/// Centered modal area: `width_pct` of the width, `height` rows tall
pub fn create_modal_area(area: Rect, width_pct: u16, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let side = (100 - width_pct.min(100)) / 2;
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(width_pct),
            Constraint::Percentage(side),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// A `width` x `height` rect centered in `area`, clipped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
