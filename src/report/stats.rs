use crate::domain::{SessionStat, StatsLog, Task};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Focus totals across the whole stats log
#[derive(Debug, PartialEq)]
pub struct FocusSummary {
    pub total_minutes: u64,
    pub total_sessions: u64,
    pub active_days: usize,
    pub avg_minutes_per_day: u64,
    pub best_day: Option<(NaiveDate, u32)>,
    pub current_streak: u32,
    pub today_minutes: u32,
    pub today_sessions: u32,
}

/// Task list totals
#[derive(Debug, PartialEq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub estimated_pomodoros: u32,
    pub actual_pomodoros: u32,
    pub over_estimate: usize,
}

fn has_focus(stat: &SessionStat) -> bool {
    stat.sessions_completed > 0 || stat.minutes_focused > 0
}

/// Calculate focus totals as of `today`
pub fn calculate_focus_summary(stats: &StatsLog, today: NaiveDate) -> FocusSummary {
    let total_minutes = stats.total_minutes();
    let active_days = stats.entries().iter().filter(|s| has_focus(s)).count();
    let avg_minutes_per_day = if active_days > 0 {
        total_minutes / active_days as u64
    } else {
        0
    };

    // Earliest date wins a tie
    let best_day = stats
        .entries()
        .iter()
        .filter(|s| has_focus(s))
        .fold(None::<&SessionStat>, |best, s| match best {
            Some(b) if b.minutes_focused > s.minutes_focused => Some(b),
            Some(b) if b.minutes_focused == s.minutes_focused && b.date <= s.date => Some(b),
            _ => Some(s),
        })
        .map(|s| (s.date, s.minutes_focused));

    let (today_minutes, today_sessions) = stats
        .get(today)
        .map(|s| (s.minutes_focused, s.sessions_completed))
        .unwrap_or((0, 0));

    FocusSummary {
        total_minutes,
        total_sessions: stats.total_sessions(),
        active_days,
        avg_minutes_per_day,
        best_day,
        current_streak: current_streak(stats, today),
        today_minutes,
        today_sessions,
    }
}

/// Consecutive days with focus ending today, or ending yesterday when
/// today has nothing yet
pub fn current_streak(stats: &StatsLog, today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = stats
        .entries()
        .iter()
        .filter(|s| has_focus(s))
        .map(|s| s.date)
        .collect();

    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        day = day - Duration::days(1);
    }
    streak
}

pub fn calculate_task_summary(tasks: &[Task]) -> TaskSummary {
    TaskSummary {
        total: tasks.len(),
        completed: tasks.iter().filter(|t| t.completed).count(),
        estimated_pomodoros: tasks.iter().map(|t| t.est_pomodoros).sum(),
        actual_pomodoros: tasks.iter().map(|t| t.act_pomodoros).sum(),
        over_estimate: tasks.iter().filter(|t| t.is_over_estimate()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn log(entries: &[(u32, u32, u32)]) -> StatsLog {
        StatsLog::from_entries(
            entries
                .iter()
                .map(|&(d, minutes, sessions)| SessionStat {
                    date: day(d),
                    minutes_focused: minutes,
                    sessions_completed: sessions,
                })
                .collect(),
        )
    }

    #[test]
    fn test_focus_summary() {
        let stats = log(&[(12, 50, 2), (14, 100, 4), (15, 25, 1), (16, 100, 4)]);
        let summary = calculate_focus_summary(&stats, day(16));

        assert_eq!(
            summary,
            FocusSummary {
                total_minutes: 275,
                total_sessions: 11,
                active_days: 4,
                avg_minutes_per_day: 68,
                best_day: Some((day(14), 100)),
                current_streak: 3,
                today_minutes: 100,
                today_sessions: 4,
            }
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = calculate_focus_summary(&StatsLog::new(), day(16));
        assert_eq!(summary.total_minutes, 0);
        assert_eq!(summary.avg_minutes_per_day, 0);
        assert_eq!(summary.best_day, None);
        assert_eq!(summary.current_streak, 0);
    }

    #[test]
    fn test_streak_counts_from_yesterday_when_today_is_empty() {
        let stats = log(&[(13, 25, 1), (14, 25, 1), (15, 25, 1)]);
        assert_eq!(current_streak(&stats, day(16)), 3);
        assert_eq!(current_streak(&stats, day(17)), 0);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let stats = StatsLog::from_entries(vec![
            SessionStat {
                date: NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
                minutes_focused: 25,
                sessions_completed: 1,
            },
            SessionStat {
                date: day(1),
                minutes_focused: 25,
                sessions_completed: 1,
            },
        ]);
        assert_eq!(current_streak(&stats, day(1)), 2);
    }

    #[test]
    fn test_task_summary() {
        let mut a = Task::new("Draft", 2);
        a.act_pomodoros = 3;
        a.completed = true;
        let b = Task::new("Review", 4);

        let summary = calculate_task_summary(&[a, b]);
        assert_eq!(
            summary,
            TaskSummary {
                total: 2,
                completed: 1,
                estimated_pomodoros: 6,
                actual_pomodoros: 3,
                over_estimate: 1,
            }
        );
    }
}
