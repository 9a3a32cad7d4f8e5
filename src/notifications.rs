/// Desktop notifications on session completion
/// Currently only implements macOS notifications
use crate::domain::TimerMode;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Notification body for a finished countdown
pub fn completion_message(finished: TimerMode, next: TimerMode) -> String {
    match finished {
        TimerMode::Focus => format!("Focus session done. Time for a {}.", next.label().to_lowercase()),
        _ => format!("{} over. Back to focus.", finished.label()),
    }
}

/// Send a notification when a countdown finishes
pub fn notify_session_complete(finished: TimerMode, next: TimerMode) {
    let message = completion_message(finished, next);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "FocusFlow""#,
            message.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::warn!(error = %e, "notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}
