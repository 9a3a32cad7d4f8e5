pub mod enums;
pub mod settings;
pub mod stats;
pub mod task;

pub use enums::{LayoutMode, Theme, TimerMode, UiMode};
pub use settings::{Settings, SettingsField};
pub use stats::{SessionStat, StatsLog};
pub use task::Task;
