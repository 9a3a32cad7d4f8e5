use crate::domain::stats::hours_minutes;
use crate::persistence::{blob_file, load_settled, AppData};
use crate::report::stats::{calculate_focus_summary, calculate_task_summary};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Format minutes as "Hh Mm"
fn format_minutes(minutes: u64) -> String {
    let (hours, mins) = hours_minutes(minutes);
    format!("{}h {}m", hours, mins)
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

/// Short plain-text summary for the `stats` subcommand
pub fn summary_text(data: &AppData, today: NaiveDate) -> String {
    let focus = calculate_focus_summary(&data.stats, today);
    let tasks = calculate_task_summary(&data.tasks);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Today:        {} ({} / {} daily goal)",
        format_minutes(focus.today_minutes as u64),
        plural(focus.today_sessions as u64, "session", "sessions"),
        data.settings.daily_goal
    );
    let _ = writeln!(
        out,
        "All time:     {} over {}",
        format_minutes(focus.total_minutes),
        plural(focus.total_sessions, "session", "sessions")
    );
    let _ = writeln!(
        out,
        "Streak:       {}",
        plural(focus.current_streak as u64, "day", "days")
    );
    let _ = writeln!(out, "Tasks:        {}/{} done", tasks.completed, tasks.total);
    out
}

/// Build the markdown report as of `today`
pub fn render_report(data: &AppData, today: NaiveDate) -> String {
    let focus = calculate_focus_summary(&data.stats, today);
    let tasks = calculate_task_summary(&data.tasks);

    let mut report = String::new();
    let _ = writeln!(report, "# FocusFlow Report - {}\n", today);

    // Summary Section
    report.push_str("## Summary\n\n");
    let _ = writeln!(report, "- **Total Focus Time:** {}", format_minutes(focus.total_minutes));
    let _ = writeln!(report, "- **Sessions Completed:** {}", focus.total_sessions);
    let _ = writeln!(report, "- **Active Days:** {}", focus.active_days);
    let _ = writeln!(
        report,
        "- **Average per Active Day:** {}",
        format_minutes(focus.avg_minutes_per_day)
    );
    if let Some((date, minutes)) = focus.best_day {
        let _ = writeln!(
            report,
            "- **Best Day:** {} ({})",
            date,
            format_minutes(minutes as u64)
        );
    }
    let _ = writeln!(
        report,
        "- **Current Streak:** {}",
        plural(focus.current_streak as u64, "day", "days")
    );
    let _ = writeln!(
        report,
        "- **Today:** {} of {} goal, {}\n",
        focus.today_sessions,
        data.settings.daily_goal,
        format_minutes(focus.today_minutes as u64)
    );

    // Daily Activity Section
    report.push_str("## Daily Activity\n\n");
    if data.stats.is_empty() {
        report.push_str("No activity yet.\n\n");
    } else {
        let mut days: Vec<_> = data.stats.entries().iter().collect();
        days.sort_by_key(|s| s.date);

        report.push_str("| Date | Focus | Sessions |\n");
        report.push_str("|------|-------|----------|\n");
        for stat in days {
            let _ = writeln!(
                report,
                "| {} | {} | {} |",
                stat.date,
                format_minutes(stat.minutes_focused as u64),
                stat.sessions_completed
            );
        }
        report.push('\n');
    }

    // Tasks Section
    report.push_str("## Tasks\n\n");
    let _ = writeln!(report, "- **Completed:** {} of {}", tasks.completed, tasks.total);
    let _ = writeln!(
        report,
        "- **Pomodoros:** {} done / {} estimated",
        tasks.actual_pomodoros, tasks.estimated_pomodoros
    );
    let _ = writeln!(report, "- **Over Estimate:** {}\n", tasks.over_estimate);

    let (done, open): (Vec<_>, Vec<_>) = data.tasks.iter().partition(|t| t.completed);

    if !open.is_empty() {
        report.push_str("### Open Tasks\n\n");
        for task in &open {
            let _ = writeln!(report, "- [ ] **{}** ({})", task.title, task.progress_label());
        }
        report.push('\n');
    }

    if !done.is_empty() {
        report.push_str("### Done Tasks\n\n");
        for task in &done {
            let _ = writeln!(report, "- [x] **{}** ({})", task.title, task.progress_label());
        }
        report.push('\n');
    }

    report
}

/// Default report location inside the data directory
pub fn default_report_path(data_dir: &Path, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("report-{}.md", date))
}

/// Load the stored data, write the report and return where it went
pub fn generate_report(
    data_dir: &Path,
    today: NaiveDate,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let data = load_settled(&blob_file(data_dir)).context("Failed to load stored data")?;
    let report = render_report(&data, today);

    let output = output_path.unwrap_or_else(|| default_report_path(data_dir, today));
    fs::write(&output, report)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    info!(path = %output.display(), "report written");
    Ok(output)
}
