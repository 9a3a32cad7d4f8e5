use crate::app::{AppState, TaskFormField};
use crate::domain::{TimerMode, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_task_form_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
        UiMode::Stats => handle_stats_mode(app, key),
        UiMode::Help => {
            app.close_modal();
            Ok(false)
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Timer controls
        KeyCode::Char(' ') => app.toggle_timer(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_timer(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.skip_timer(),

        // Mode switcher
        KeyCode::Char('1') => app.switch_mode(TimerMode::Focus),
        KeyCode::Char('2') => app.switch_mode(TimerMode::ShortBreak),
        KeyCode::Char('3') => app.switch_mode(TimerMode::LongBreak),
        KeyCode::Char('4') => app.switch_mode(TimerMode::Custom),

        // Task navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Make highlighted task the current focus
        KeyCode::Enter | KeyCode::Char('s') => app.select_highlighted(),

        // Task edits
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_task(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.delete_selected(),

        // Appearance and sound
        KeyCode::Char('t') | KeyCode::Char('T') => app.cycle_theme(),
        KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_sound(),
        KeyCode::Char('l') | KeyCode::Char('L') => app.toggle_layout(),

        // Modals
        KeyCode::Char('o') | KeyCode::Char('O') | KeyCode::Char(',') => app.open_settings(),
        KeyCode::Char('i') | KeyCode::Char('I') => app.open_stats(),
        KeyCode::Char('?') => app.toggle_help(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add/edit task form
fn handle_task_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let on_estimate = app
        .task_form
        .as_ref()
        .is_some_and(|f| f.field == TaskFormField::Estimate);

    match key.code {
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Tab | KeyCode::BackTab => app.form_toggle_field(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Up | KeyCode::Right if on_estimate => app.form_adjust_estimate(1),
        KeyCode::Down | KeyCode::Left if on_estimate => app.form_adjust_estimate(-1),
        KeyCode::Char(c) => app.form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the settings modal
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.settings_cursor_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.settings_cursor_next(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_setting(1)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust_setting(-1),
        KeyCode::Enter | KeyCode::Char(' ') => app.adjust_setting(1),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('o') => app.close_modal(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the stats modal
fn handle_stats_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('i')
    ) {
        app.close_modal();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::create_test_app;
    use crate::domain::{LayoutMode, SettingsField, Theme};

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::empty())).unwrap()
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap());
        assert!(!press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_space_toggles_timer() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.timer.is_active());
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.timer.is_active());
    }

    #[test]
    fn test_mode_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.timer.mode(), TimerMode::LongBreak);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.timer.mode(), TimerMode::Custom);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.timer.mode(), TimerMode::Focus);
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        // Letters that are shortcuts in normal mode are plain text here
        for c in "quit docs".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].title, "quit docs");
        assert_eq!(app.tasks[0].est_pomodoros, 3);
        assert_eq!(app.active_task_id, Some(app.tasks[0].id));
    }

    #[test]
    fn test_task_list_keys() {
        let mut app = create_test_app();
        app.add_task("First", 1);
        app.add_task("Second", 1);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_task().unwrap().title, "Second");

        press(&mut app, KeyCode::Char('c'));
        assert!(app.tasks[1].completed);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.active_task_id, None);
    }

    #[test]
    fn test_settings_modal_navigation() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.ui_mode, UiMode::Settings);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.theme, Theme::Dark);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.settings_cursor, SettingsField::PomodoroTime);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.settings.pomodoro_time, 26);
        assert_eq!(app.timer.remaining(), 26 * 60);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_stats_and_help_modals_close() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.ui_mode, UiMode::Stats);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.ui_mode, UiMode::Stats);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.ui_mode, UiMode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_sound_and_layout_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('m'));
        assert!(!app.settings.sound_enabled);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.settings.layout_mode, LayoutMode::SideBySide);
        assert!(app.needs_save);
    }
}
