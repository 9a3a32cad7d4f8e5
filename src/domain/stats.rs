use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Focus totals for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStat {
    pub date: NaiveDate,
    pub minutes_focused: u32,
    pub sessions_completed: u32,
}

/// Per-day log, at most one entry per date, in insertion order.
///
/// Serialized as a bare array so the blob stays a plain list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsLog {
    entries: Vec<SessionStat>,
}

impl StatsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from raw entries, merging any duplicate dates
    pub fn from_entries(entries: Vec<SessionStat>) -> Self {
        let mut log = Self::new();
        for entry in entries {
            log.add(entry.date, entry.minutes_focused, entry.sessions_completed);
        }
        log
    }

    /// Record one finished focus session of `minutes` on `date`
    pub fn record_session(&mut self, date: NaiveDate, minutes: u32) {
        self.add(date, minutes, 1);
    }

    fn add(&mut self, date: NaiveDate, minutes: u32, sessions: u32) {
        if let Some(existing) = self.entries.iter_mut().find(|s| s.date == date) {
            existing.minutes_focused = existing.minutes_focused.saturating_add(minutes);
            existing.sessions_completed = existing.sessions_completed.saturating_add(sessions);
        } else {
            self.entries.push(SessionStat {
                date,
                minutes_focused: minutes,
                sessions_completed: sessions,
            });
        }
    }

    pub fn entries(&self) -> &[SessionStat] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<&SessionStat> {
        self.entries.iter().find(|s| s.date == date)
    }

    /// The last `n` entries in insertion order (chart data)
    pub fn recent(&self, n: usize) -> &[SessionStat] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn total_minutes(&self) -> u64 {
        self.entries.iter().map(|s| s.minutes_focused as u64).sum()
    }

    pub fn total_sessions(&self) -> u64 {
        self.entries.iter().map(|s| s.sessions_completed as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether two dates appear more than once (only possible for hand-edited data)
    pub fn has_duplicate_dates(entries: &[SessionStat]) -> bool {
        let mut seen = std::collections::HashSet::new();
        entries.iter().any(|s| !seen.insert(s.date))
    }
}

/// Split total minutes into (hours, minutes)
pub fn hours_minutes(total_minutes: u64) -> (u64, u64) {
    (total_minutes / 60, total_minutes % 60)
}

/// Chart axis label "MM/DD"
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}
