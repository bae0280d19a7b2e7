//! Transient user notifications emitted by the pipeline

use cover_model::ValidationError;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Required fields were empty; nothing was rendered
    ValidationFailed(ValidationError),
    /// There was no cover page region to capture
    RegionMissing,
    /// Rendering has started; shown until the outcome replaces it
    InProgress,
    Succeeded { filename: String },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl Notification {
    pub fn message(&self) -> String {
        match self {
            Notification::ValidationFailed(err) => err.to_string(),
            Notification::RegionMissing => "Cover page element not found!".to_string(),
            Notification::InProgress => "Generating PDF...".to_string(),
            Notification::Succeeded { filename } => {
                format!("PDF generated successfully!\nFilename: {}", filename)
            }
            Notification::Failed => "Error generating PDF. Please try again.".to_string(),
        }
    }

    pub fn level(&self) -> NotificationLevel {
        match self {
            Notification::InProgress => NotificationLevel::Info,
            Notification::Succeeded { .. } => NotificationLevel::Success,
            _ => NotificationLevel::Error,
        }
    }

    /// How long the notification stays up; `None` until replaced
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Notification::ValidationFailed(_) | Notification::Failed => {
                Some(Duration::from_millis(4000))
            }
            Notification::RegionMissing => Some(Duration::from_millis(3000)),
            Notification::InProgress => None,
            Notification::Succeeded { .. } => Some(Duration::from_millis(5000)),
        }
    }
}

/// Receives pipeline notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Logs notifications through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message();
        match notification.level() {
            NotificationLevel::Info => tracing::info!(%message, "notification"),
            NotificationLevel::Success => tracing::info!(%message, "notification"),
            NotificationLevel::Error => tracing::warn!(%message, "notification"),
        }
    }
}

/// Collects notifications in order
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cover_model::FieldName;

    #[test]
    fn test_messages() {
        let missing = ValidationError {
            missing: vec![FieldName::StudentName, FieldName::SubmissionDate],
        };
        assert_eq!(
            Notification::ValidationFailed(missing).message(),
            "Please fill in the following required fields:\n• Student Name\n• Submission Date"
        );
        assert_eq!(
            Notification::Succeeded {
                filename: "a.pdf".to_string()
            }
            .message(),
            "PDF generated successfully!\nFilename: a.pdf"
        );
        assert_eq!(
            Notification::Failed.message(),
            "Error generating PDF. Please try again."
        );
        assert_eq!(
            Notification::RegionMissing.message(),
            "Cover page element not found!"
        );
    }

    #[test]
    fn test_levels_and_durations() {
        assert_eq!(Notification::InProgress.level(), NotificationLevel::Info);
        assert_eq!(Notification::InProgress.duration(), None);
        assert_eq!(Notification::Failed.level(), NotificationLevel::Error);
        assert_eq!(
            Notification::RegionMissing.duration(),
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::InProgress);
        notifier.notify(Notification::Failed);
        assert_eq!(
            notifier.notifications(),
            vec![Notification::InProgress, Notification::Failed]
        );
    }
}
