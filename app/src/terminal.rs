//! Notifications printed to the terminal

use export_pipeline::{Notification, NotificationLevel, Notifier};
use std::io::Write;

/// Prints each notification on stdout and logs it
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn format(notification: &Notification) -> String {
        let tag = match notification.level() {
            NotificationLevel::Info => "..",
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "!!",
        };
        notification
            .message()
            .lines()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    format!("[{}] {}", tag, line)
                } else {
                    format!("     {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(level = ?notification.level(), duration = ?notification.duration(), "notification");
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", Self::format(&notification));
        let _ = out.flush();
    }
}
