use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest and largest pomodoro estimate accepted by the add form
pub const MIN_ESTIMATE: u32 = 1;
pub const MAX_ESTIMATE: u32 = 10;

/// A user task with pomodoro tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_estimate")]
    pub est_pomodoros: u32,
    #[serde(default)]
    pub act_pomodoros: u32,
}

fn default_estimate() -> u32 {
    MIN_ESTIMATE
}

impl Task {
    /// Create a new open task. The estimate is clamped into the accepted range.
    pub fn new(title: impl Into<String>, est_pomodoros: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            est_pomodoros: clamp_estimate(est_pomodoros),
            act_pomodoros: 0,
        }
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Count one finished focus session against this task
    pub fn record_pomodoro(&mut self) {
        self.act_pomodoros += 1;
    }

    /// Replace the title; blank titles are ignored
    pub fn rename(&mut self, title: &str) -> bool {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.title = trimmed.to_string();
        true
    }

    /// "act/est" counter shown beside the title
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.act_pomodoros, self.est_pomodoros)
    }

    pub fn is_over_estimate(&self) -> bool {
        self.act_pomodoros > self.est_pomodoros
    }
}

pub fn clamp_estimate(est: u32) -> u32 {
    est.clamp(MIN_ESTIMATE, MAX_ESTIMATE)
}

/// (completed, total) for the task list header
pub fn completion_counts(tasks: &[Task]) -> (usize, usize) {
    let done = tasks.iter().filter(|t| t.completed).count();
    (done, tasks.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task() {
        let task = Task::new("Write report", 3);
        assert_eq!(task.title, "Write report");
        assert!(!task.completed);
        assert_eq!(task.est_pomodoros, 3);
        assert_eq!(task.act_pomodoros, 0);
    }

    #[test]
    fn test_estimate_is_clamped() {
        assert_eq!(Task::new("a", 0).est_pomodoros, 1);
        assert_eq!(Task::new("b", 42).est_pomodoros, 10);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new("a", 1);
        let b = Task::new("a", 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_toggle_and_record() {
        let mut task = Task::new("a", 1);
        task.toggle_completed();
        assert!(task.completed);
        task.toggle_completed();
        assert!(!task.completed);

        task.record_pomodoro();
        task.record_pomodoro();
        assert_eq!(task.progress_label(), "2/1");
        assert!(task.is_over_estimate());
    }

    #[test]
    fn test_rename_rejects_blank() {
        let mut task = Task::new("old", 1);
        assert!(!task.rename("   "));
        assert_eq!(task.title, "old");
        assert!(task.rename("  new  "));
        assert_eq!(task.title, "new");
    }

    #[test]
    fn test_completion_counts() {
        let mut tasks = vec![Task::new("a", 1), Task::new("b", 1), Task::new("c", 1)];
        tasks[1].completed = true;
        assert_eq!(completion_counts(&tasks), (1, 3));
    }

    #[test]
    fn test_missing_counters_default() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{}","title":"x"}}"#, id);
        let task: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task.est_pomodoros, 1);
        assert_eq!(task.act_pomodoros, 0);
        assert!(!task.completed);
    }
}
