use crate::dashboard::Dashboard;
use crate::domain::{
    task, Settings, SettingsField, StatsLog, Task, Theme, TimerMode, UiMode,
};
use crate::notifications;
use crate::persistence::{self, AppData};
use crate::sound::{Chime, Cue};
use crate::ticker::Ticker;
use crate::timer::{Completion, Timer};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Which field of the task form has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFormField {
    Title,
    Estimate,
}

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub title: String,
    pub estimate: u32,
    pub field: TaskFormField,
    /// Task being edited, None when adding
    pub editing: Option<Uuid>,
}

impl TaskFormState {
    fn new_task() -> Self {
        Self {
            title: String::new(),
            estimate: task::MIN_ESTIMATE,
            field: TaskFormField::Title,
            editing: None,
        }
    }
}

/// Main application state
pub struct AppState {
    pub settings: Settings,
    pub tasks: Vec<Task>,
    pub stats: StatsLog,
    pub theme: Theme,
    pub timer: Timer,
    pub ticker: Ticker,
    pub active_task_id: Option<Uuid>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub task_form: Option<TaskFormState>,
    pub settings_cursor: SettingsField,
    pub dashboard: Dashboard,
    pub needs_save: bool,
    blob_path: Option<PathBuf>,
    chime: Box<dyn Chime>,
}

impl AppState {
    pub fn new(
        data: AppData,
        blob_path: Option<PathBuf>,
        dashboard: Dashboard,
        chime: Box<dyn Chime>,
    ) -> Self {
        let timer = Timer::new(&data.settings);
        Self {
            settings: data.settings,
            tasks: data.tasks,
            stats: data.stats,
            theme: data.theme,
            timer,
            ticker: Ticker::default(),
            active_task_id: None,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            task_form: None,
            settings_cursor: SettingsField::Theme,
            dashboard,
            needs_save: false,
            blob_path,
            chime,
        }
    }

    /// Snapshot of everything that is persisted
    pub fn to_app_data(&self) -> AppData {
        AppData {
            settings: self.settings.clone(),
            tasks: self.tasks.clone(),
            stats: self.stats.clone(),
            theme: self.theme,
        }
    }

    /// Rewrite the whole blob
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.blob_path {
            persistence::save(path, &self.to_app_data())
                .with_context(|| format!("Failed to save {}", path.display()))?;
            debug!(path = %path.display(), "state saved");
        }
        self.needs_save = false;
        Ok(())
    }

    fn play(&self, cue: Cue) {
        if self.settings.sound_enabled {
            self.chime.play(cue);
        }
    }

    // --- Timer ---

    /// Jump to a mode at full length, paused
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.timer.switch_mode(mode, &self.settings);
        self.ticker.disarm();
        self.play(Cue::Click);
    }

    /// Start or pause the countdown
    pub fn toggle_timer(&mut self) {
        self.play(Cue::Click);
        self.timer.toggle();
        self.ticker.follow(self.timer.is_active(), Instant::now());
    }

    /// Back to full length of the current mode, paused
    pub fn reset_timer(&mut self) {
        self.timer.reset(&self.settings);
        self.ticker.disarm();
    }

    /// Finish the current mode right now
    pub fn skip_timer(&mut self) {
        self.timer.pause();
        let completion = self.timer.complete(&self.settings);
        self.handle_completion(completion);
    }

    /// Run the one-second step if the ticker is due. Returns true if it ran.
    pub fn tick_if_due(&mut self, now: Instant) -> bool {
        self.ticker.follow(self.timer.is_active(), now);
        if !self.ticker.fire_if_due(now) {
            return false;
        }
        self.advance_second();
        self.ticker.follow(self.timer.is_active(), now);
        true
    }

    /// One second of countdown
    pub fn advance_second(&mut self) {
        if let Some(completion) = self.timer.tick(&self.settings) {
            self.handle_completion(completion);
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        self.record_completion(completion, chrono::Local::now().date_naive());
    }

    /// Apply a finished countdown to stats and the active task
    pub fn record_completion(&mut self, completion: Completion, today: NaiveDate) {
        self.play(Cue::Notification);

        if completion.finished == TimerMode::Focus {
            self.stats.record_session(today, self.settings.pomodoro_time);
            if let Some(id) = self.active_task_id {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.record_pomodoro();
                }
            }
        }

        info!(
            finished = completion.finished.name(),
            next = completion.next.name(),
            auto_started = completion.auto_started,
            focus_sessions = completion.focus_sessions,
            "countdown finished"
        );
        notifications::notify_session_complete(completion.finished, completion.next);

        self.ticker.follow(self.timer.is_active(), Instant::now());
        self.needs_save = true;
    }

    /// "MM:SS - Focus" / "MM:SS - Break"
    pub fn terminal_title(&self) -> String {
        format!("{} - {}", self.timer.formatted(), self.timer.mode().title_word())
    }

    /// Focus sessions done this run, the goal, and the bar fill (capped at 1.0)
    pub fn goal_progress(&self) -> (u32, u32, f64) {
        let done = self.timer.completed_focus();
        let goal = self.settings.daily_goal.max(1);
        let ratio = (done as f64 / goal as f64).min(1.0);
        (done, goal, ratio)
    }

    // --- Theme, sound, layout ---

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.needs_save = true;
    }

    pub fn toggle_sound(&mut self) {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.needs_save = true;
    }

    pub fn toggle_layout(&mut self) {
        self.settings.layout_mode = self.settings.layout_mode.toggle();
        self.needs_save = true;
    }

    // --- Tasks ---

    pub fn active_task(&self) -> Option<&Task> {
        let id = self.active_task_id?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.tasks.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.tasks.len() {
            self.selected_index = self.tasks.len().saturating_sub(1);
        }
    }

    /// Append a task. It becomes the active task when none is active.
    pub fn add_task(&mut self, title: &str, est_pomodoros: u32) -> Option<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let task = Task::new(title, est_pomodoros);
        let id = task.id;
        self.tasks.push(task);
        if self.active_task_id.is_none() {
            self.active_task_id = Some(id);
        }
        self.needs_save = true;
        Some(id)
    }

    /// Remove a task; clears the active reference if it pointed there
    pub fn delete_task(&mut self, id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return;
        }
        if self.active_task_id == Some(id) {
            self.active_task_id = None;
        }
        self.clamp_selection();
        self.needs_save = true;
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.delete_task(id);
        }
    }

    pub fn toggle_task(&mut self, id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.toggle_completed();
            self.needs_save = true;
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.toggle_task(id);
        }
    }

    /// Make a task the one focus sessions are credited to
    pub fn select_task(&mut self, id: Uuid) {
        if self.tasks.iter().any(|t| t.id == id) {
            self.active_task_id = Some(id);
        }
    }

    pub fn select_highlighted(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.select_task(id);
        }
    }

    /// Replace title and estimate. A blank title keeps the old one.
    pub fn update_task(&mut self, id: Uuid, title: &str, est_pomodoros: u32) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.rename(title);
            task.est_pomodoros = task::clamp_estimate(est_pomodoros);
            self.needs_save = true;
        }
    }

    // --- Task form ---

    pub fn start_add_task(&mut self) {
        self.task_form = Some(TaskFormState::new_task());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form pre-filled with the highlighted task
    pub fn start_edit_task(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.task_form = Some(TaskFormState {
            title: task.title.clone(),
            estimate: task.est_pomodoros,
            field: TaskFormField::Title,
            editing: Some(task.id),
        });
        self.ui_mode = UiMode::EditingTask;
    }

    pub fn form_toggle_field(&mut self) {
        if let Some(form) = &mut self.task_form {
            form.field = match form.field {
                TaskFormField::Title => TaskFormField::Estimate,
                TaskFormField::Estimate => TaskFormField::Title,
            };
        }
    }

    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.task_form {
            match form.field {
                TaskFormField::Title => form.title.push(c),
                TaskFormField::Estimate => {
                    if let Some(digit) = c.to_digit(10) {
                        let typed = if form.estimate == task::MIN_ESTIMATE && digit != 0 {
                            digit
                        } else {
                            form.estimate * 10 + digit
                        };
                        form.estimate = task::clamp_estimate(typed);
                    } else if c == '+' {
                        form.estimate = task::clamp_estimate(form.estimate + 1);
                    } else if c == '-' {
                        form.estimate = task::clamp_estimate(form.estimate.saturating_sub(1));
                    }
                }
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.task_form {
            match form.field {
                TaskFormField::Title => {
                    form.title.pop();
                }
                TaskFormField::Estimate => form.estimate = task::MIN_ESTIMATE,
            }
        }
    }

    /// Step the estimate with the arrow keys
    pub fn form_adjust_estimate(&mut self, delta: i32) {
        if let Some(form) = &mut self.task_form {
            let next = (form.estimate as i64 + delta as i64).max(0) as u32;
            form.estimate = task::clamp_estimate(next);
        }
    }

    pub fn submit_task_form(&mut self) {
        if let Some(form) = self.task_form.take() {
            match form.editing {
                Some(id) => self.update_task(id, &form.title, form.estimate),
                None => {
                    if self.add_task(&form.title, form.estimate).is_some() {
                        self.selected_index = self.tasks.len() - 1;
                    }
                }
            }
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn cancel_task_form(&mut self) {
        self.task_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- Settings form ---

    pub fn open_settings(&mut self) {
        self.settings_cursor = SettingsField::Theme;
        self.ui_mode = UiMode::Settings;
    }

    pub fn settings_cursor_next(&mut self) {
        self.settings_cursor = self.settings_cursor.next();
    }

    pub fn settings_cursor_prev(&mut self) {
        self.settings_cursor = self.settings_cursor.prev();
    }

    /// Change the field under the cursor: numbers step by `delta`, flags and
    /// selectors flip regardless of sign
    pub fn adjust_setting(&mut self, delta: i32) {
        let field = self.settings_cursor;
        let step = |value: u32| (value as i64 + delta as i64).max(1) as u32;

        match field {
            SettingsField::Theme => {
                self.theme = if delta >= 0 {
                    self.theme.next()
                } else {
                    self.theme.next().next()
                };
            }
            SettingsField::PomodoroTime => self.settings.pomodoro_time = step(self.settings.pomodoro_time),
            SettingsField::ShortBreakTime => {
                self.settings.short_break_time = step(self.settings.short_break_time)
            }
            SettingsField::LongBreakTime => {
                self.settings.long_break_time = step(self.settings.long_break_time)
            }
            SettingsField::CustomTime => self.settings.custom_time = step(self.settings.custom_time),
            SettingsField::AutoStartBreaks => {
                self.settings.auto_start_breaks = !self.settings.auto_start_breaks
            }
            SettingsField::AutoStartPomodoros => {
                self.settings.auto_start_pomodoros = !self.settings.auto_start_pomodoros
            }
            SettingsField::SoundEnabled => self.settings.sound_enabled = !self.settings.sound_enabled,
            SettingsField::DailyGoal => self.settings.daily_goal = step(self.settings.daily_goal),
            SettingsField::LongBreakInterval => {
                self.settings.long_break_interval = step(self.settings.long_break_interval)
            }
            SettingsField::LayoutMode => self.settings.layout_mode = self.settings.layout_mode.toggle(),
        }

        self.settings.sanitize();
        if field.affects_durations() {
            self.timer.sync_to_settings(&self.settings);
            self.ticker.follow(self.timer.is_active(), Instant::now());
        }
        self.needs_save = true;
    }

    // --- Modals ---

    pub fn open_stats(&mut self) {
        self.ui_mode = UiMode::Stats;
    }

    pub fn toggle_help(&mut self) {
        self.ui_mode = if self.ui_mode == UiMode::Help {
            UiMode::Normal
        } else {
            UiMode::Help
        };
    }

    pub fn close_modal(&mut self) {
        self.ui_mode = UiMode::Normal;
    }
}
