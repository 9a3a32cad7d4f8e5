use super::error::StoreError;
use super::files::{atomic_write, backup_file, read_file};
use crate::domain::{SessionStat, Settings, StatsLog, Task, Theme};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Everything that survives a restart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppData {
    pub settings: Settings,
    pub tasks: Vec<Task>,
    pub stats: StatsLog,
    pub theme: Theme,
}

/// On-disk shape of the blob.
///
/// `darkMode` is the pre-theme field: read when `theme` is absent, never written.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBlob {
    #[serde(default)]
    settings: Option<Settings>,
    #[serde(default)]
    tasks: Option<Vec<Task>>,
    #[serde(default)]
    stats: Option<Vec<SessionStat>>,
    #[serde(default)]
    theme: Option<Theme>,
    #[serde(default)]
    dark_mode: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlobOut<'a> {
    settings: &'a Settings,
    tasks: &'a [Task],
    stats: &'a StatsLog,
    theme: Theme,
}

/// What happened while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No blob on disk yet
    Fresh,
    /// Blob parsed (possibly with repairs)
    Stored { repaired: bool },
    /// Blob was unreadable and was set aside
    Recovered,
}

impl LoadSource {
    /// Whether the blob on disk should be rewritten from what was loaded:
    /// repaired values, or defaults replacing a file that was set aside
    pub fn needs_rewrite(self) -> bool {
        matches!(self, Self::Stored { repaired: true } | Self::Recovered)
    }
}

/// Encode state as the blob document
pub fn encode(data: &AppData) -> Result<String, StoreError> {
    let out = BlobOut {
        settings: &data.settings,
        tasks: &data.tasks,
        stats: &data.stats,
        theme: data.theme,
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Decode a blob document, validating and repairing what can be repaired.
/// Returns the data and whether anything was repaired.
pub fn decode(content: &str, path: &Path) -> Result<(AppData, bool), StoreError> {
    let stored: StoredBlob = serde_json::from_str(content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let mut repaired = false;

    let mut settings = stored.settings.unwrap_or_default();
    repaired |= settings.sanitize();

    let mut tasks = stored.tasks.unwrap_or_default();
    let mut seen = HashSet::new();
    let before = tasks.len();
    tasks.retain(|t| seen.insert(t.id));
    repaired |= tasks.len() != before;
    for task in &mut tasks {
        let clamped = crate::domain::task::clamp_estimate(task.est_pomodoros);
        if clamped != task.est_pomodoros {
            task.est_pomodoros = clamped;
            repaired = true;
        }
    }

    let raw_stats = stored.stats.unwrap_or_default();
    repaired |= StatsLog::has_duplicate_dates(&raw_stats);
    let stats = StatsLog::from_entries(raw_stats);

    let theme = match (stored.theme, stored.dark_mode) {
        (Some(theme), _) => theme,
        (None, Some(true)) => Theme::Dark,
        (None, Some(false)) | (None, None) => Theme::Light,
    };

    Ok((
        AppData {
            settings,
            tasks,
            stats,
            theme,
        },
        repaired,
    ))
}

/// Load the blob at `path`.
///
/// A missing file gives defaults. A corrupt file is copied aside and
/// defaults are used. Only I/O failures are returned as errors.
pub fn load(path: &Path) -> Result<(AppData, LoadSource), StoreError> {
    let decoded = match read_file(path) {
        Ok(None) => {
            info!(path = %path.display(), "no stored data, starting fresh");
            return Ok((AppData::default(), LoadSource::Fresh));
        }
        Ok(Some(content)) if content.trim().is_empty() => {
            return Ok((AppData::default(), LoadSource::Fresh));
        }
        Ok(Some(content)) => decode(&content, path),
        Err(err) => Err(err),
    };

    match decoded {
        Ok((data, repaired)) => {
            if repaired {
                warn!(path = %path.display(), "stored data had invalid values and was repaired");
            }
            Ok((data, LoadSource::Stored { repaired }))
        }
        Err(err) if err.is_corrupt() => {
            let backup = backup_file(path)?;
            warn!(
                error = %err,
                backup = %backup.display(),
                "stored data unreadable, starting from defaults"
            );
            Ok((AppData::default(), LoadSource::Recovered))
        }
        Err(err) => Err(err),
    }
}

/// Load for commands that never save: a recovered blob is replaced with
/// the defaults right away so the next run does not back it up again
pub fn load_settled(path: &Path) -> Result<AppData, StoreError> {
    let (data, source) = load(path)?;
    if source == LoadSource::Recovered {
        save(path, &data)?;
    }
    Ok(data)
}

/// Rewrite the whole blob
pub fn save(path: &Path, data: &AppData) -> Result<(), StoreError> {
    let json = encode(data)?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LayoutMode;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample() -> AppData {
        let mut stats = StatsLog::new();
        stats.record_session(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(), 25);
        stats.record_session(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), 50);
        let mut task = Task::new("Write docs", 3);
        task.act_pomodoros = 2;
        task.completed = true;
        AppData {
            settings: Settings {
                pomodoro_time: 50,
                auto_start_breaks: true,
                layout_mode: LayoutMode::SideBySide,
                ..Settings::default()
            },
            tasks: vec![task, Task::new("Review", 1)],
            stats,
            theme: Theme::Neon,
        }
    }

    #[test]
    fn test_load_missing_gives_defaults() {
        let dir = tempdir().unwrap();
        let (data, source) = load(&dir.path().join("data.json")).unwrap();
        assert_eq!(data, AppData::default());
        assert_eq!(source, LoadSource::Fresh);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let data = sample();

        save(&path, &data).unwrap();
        let (loaded, source) = load(&path).unwrap();

        assert_eq!(loaded, data);
        assert_eq!(source, LoadSource::Stored { repaired: false });
    }

    #[test]
    fn test_blob_uses_camel_case_keys() {
        let json: serde_json::Value = serde_json::from_str(&encode(&sample()).unwrap()).unwrap();
        assert!(json["settings"]["pomodoroTime"].is_number());
        assert!(json["tasks"][0]["estPomodoros"].is_number());
        assert!(json["stats"][0]["minutesFocused"].is_number());
        assert_eq!(json["theme"], "neon");
        assert!(json.get("darkMode").is_none());
    }

    #[test]
    fn test_legacy_dark_mode_fallback() {
        let path = Path::new("legacy.json");
        let (data, _) = decode(r#"{"darkMode": true}"#, path).unwrap();
        assert_eq!(data.theme, Theme::Dark);

        let (data, _) = decode(r#"{"darkMode": false}"#, path).unwrap();
        assert_eq!(data.theme, Theme::Light);

        // Explicit theme wins over the legacy flag
        let (data, _) = decode(r#"{"darkMode": true, "theme": "neon"}"#, path).unwrap();
        assert_eq!(data.theme, Theme::Neon);
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let (data, repaired) = decode(r#"{"tasks": []}"#, Path::new("p.json")).unwrap();
        assert!(!repaired);
        assert_eq!(data.settings, Settings::default());
        assert!(data.stats.is_empty());
    }

    #[test]
    fn test_invalid_values_are_repaired() {
        let doc = r#"{
            "settings": {"pomodoroTime": 0, "longBreakInterval": 0},
            "stats": [
                {"date": "2026-10-01", "minutesFocused": 25, "sessionsCompleted": 1},
                {"date": "2026-10-01", "minutesFocused": 25, "sessionsCompleted": 1}
            ]
        }"#;
        let (data, repaired) = decode(doc, Path::new("p.json")).unwrap();
        assert!(repaired);
        assert_eq!(data.settings.pomodoro_time, 1);
        assert_eq!(data.settings.long_break_interval, 1);
        assert_eq!(data.stats.entries().len(), 1);
        assert_eq!(data.stats.total_sessions(), 2);
    }

    #[test]
    fn test_corrupt_blob_is_backed_up_and_defaults_used() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let (data, source) = load(&path).unwrap();
        assert_eq!(data, AppData::default());
        assert_eq!(source, LoadSource::Recovered);

        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("corrupt"))
            .collect();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn test_non_utf8_blob_is_backed_up_and_defaults_used() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let bytes = [0x7b, 0xff, 0xfe, 0x7d];
        std::fs::write(&path, bytes).unwrap();

        let (data, source) = load(&path).unwrap();
        assert_eq!(data, AppData::default());
        assert_eq!(source, LoadSource::Recovered);

        let backup = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .find(|e| e.file_name().to_string_lossy().contains("corrupt"))
            .unwrap();
        assert_eq!(std::fs::read(backup.path()).unwrap(), bytes);
    }

    #[test]
    fn test_recovered_blob_is_rewritten_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let (data, source) = load(&path).unwrap();
        assert!(source.needs_rewrite());
        save(&path, &data).unwrap();

        let (_, source) = load(&path).unwrap();
        assert_eq!(source, LoadSource::Stored { repaired: false });
        assert!(!source.needs_rewrite());
        assert!(!LoadSource::Fresh.needs_rewrite());
        assert!(LoadSource::Stored { repaired: true }.needs_rewrite());
    }

    #[test]
    fn test_load_settled_backs_up_only_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, [0xff, 0xfe]).unwrap();

        assert_eq!(load_settled(&path).unwrap(), AppData::default());
        assert_eq!(load_settled(&path).unwrap(), AppData::default());

        let backups = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("corrupt"))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_wrong_types_count_as_corrupt() {
        let err = decode(r#"{"settings": "nope"}"#, Path::new("p.json")).unwrap_err();
        assert!(err.is_corrupt());
    }
}
