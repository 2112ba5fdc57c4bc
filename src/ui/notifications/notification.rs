// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! A notification carries i18n keys, never rendered text: a short title
//! ("Location Selected", "Map Error") and a body message with arguments.

use crate::diagnostics::{ErrorType, WarningType};
use crate::error::MapError;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully (green, 3s duration).
    #[default]
    Success,
    /// Informational message (blue, 3s duration).
    Info,
    /// Warning that doesn't block operation (orange, 5s duration).
    Warning,
    /// Error requiring attention (red, manual dismiss).
    Error,
}

impl Severity {
    /// Returns the primary color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns the auto-dismiss duration for this severity.
    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// Optional i18n key of a bold heading shown above the message.
    title_key: Option<String>,
    /// The i18n key for the notification message.
    message_key: String,
    /// Arguments for message interpolation.
    message_args: Vec<(String, String)>,
    created_at: Instant,
    /// Custom auto-dismiss duration (overrides severity default).
    custom_dismiss_duration: Option<Duration>,
    warning_type: Option<WarningType>,
    error_type: Option<ErrorType>,
}

impl Notification {
    /// Creates a new notification with the given severity and message key.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            title_key: None,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
            custom_dismiss_duration: None,
            warning_type: None,
            error_type: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Builds the "Map Error" toast for a failed map operation.
    ///
    /// Activation failures become warnings since the user can retry right
    /// away. Everything else is an error that stays until dismissed.
    pub fn from_map_error(error: &MapError) -> Self {
        let base = if error.is_activation_failure() {
            let warning_type = match error {
                MapError::ProviderUnavailable(_) => WarningType::NetworkError,
                _ => WarningType::CredentialIssue,
            };
            Self::warning(error.i18n_key()).with_warning_type(warning_type)
        } else {
            Self::error(error.i18n_key()).with_error_type(ErrorType::MapError)
        };
        base.with_title("notification-map-error-title")
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    /// Sets the i18n key of the heading.
    #[must_use]
    pub fn with_title(mut self, title_key: impl Into<String>) -> Self {
        self.title_key = Some(title_key.into());
        self
    }

    /// Sets a custom auto-dismiss duration, overriding the severity default.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.custom_dismiss_duration = Some(duration);
        self
    }

    /// Category recorded in diagnostics when a warning is pushed.
    #[must_use]
    pub fn with_warning_type(mut self, warning_type: WarningType) -> Self {
        self.warning_type = Some(warning_type);
        self
    }

    /// Category recorded in diagnostics when an error is pushed.
    #[must_use]
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn title_key(&self) -> Option<&str> {
        self.title_key.as_deref()
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// Looks up one interpolation argument by name.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.message_args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn warning_type(&self) -> Option<WarningType> {
        self.warning_type
    }

    #[must_use]
    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Returns whether this notification should auto-dismiss.
    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        // Custom duration takes precedence over severity default
        self.custom_dismiss_duration
            .or_else(|| self.severity.auto_dismiss_duration())
            .is_some_and(|d| self.age() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("notification-location-selected");
        let n2 = Notification::success("notification-location-selected");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            Severity::Success.color(),
            Severity::Info.color(),
            Severity::Warning.color(),
            Severity::Error.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn error_severity_has_no_auto_dismiss() {
        assert!(Severity::Error.auto_dismiss_duration().is_none());
    }

    #[test]
    fn warning_duration_is_longer_than_success() {
        let success = Severity::Success.auto_dismiss_duration().unwrap();
        let warning = Severity::Warning.auto_dismiss_duration().unwrap();
        assert!(warning > success);
    }

    #[test]
    fn zero_custom_duration_dismisses_immediately() {
        let notification = Notification::error("error-map-tile-fetch").auto_dismiss(Duration::ZERO);
        assert!(notification.should_auto_dismiss());
    }

    #[test]
    fn location_toast_carries_title_and_arguments() {
        let notification = Notification::success("notification-location-selected")
            .with_title("notification-location-selected-title")
            .with_arg("lat", "40.7500")
            .with_arg("lng", "-73.9900");

        assert_eq!(
            notification.title_key(),
            Some("notification-location-selected-title")
        );
        assert_eq!(notification.arg("lat"), Some("40.7500"));
        assert_eq!(notification.arg("lng"), Some("-73.9900"));
        assert_eq!(notification.arg("zoom"), None);
    }

    #[test]
    fn rejected_credential_becomes_titled_warning() {
        let notification = Notification::from_map_error(&MapError::CredentialRejected);
        assert_eq!(notification.severity(), Severity::Warning);
        assert_eq!(notification.message_key(), "error-map-credential-rejected");
        assert_eq!(notification.title_key(), Some("notification-map-error-title"));
        assert_eq!(notification.warning_type(), Some(WarningType::CredentialIssue));
    }

    #[test]
    fn unreachable_provider_is_a_network_warning() {
        let notification =
            Notification::from_map_error(&MapError::ProviderUnavailable("timeout".into()));
        assert_eq!(notification.warning_type(), Some(WarningType::NetworkError));
    }

    #[test]
    fn construction_failure_becomes_error() {
        let notification = Notification::from_map_error(&MapError::ContainerUnavailable);
        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.error_type(), Some(ErrorType::MapError));
    }

    #[test]
    fn notification_constructors_set_correct_severity() {
        assert_eq!(Notification::success("").severity(), Severity::Success);
        assert_eq!(Notification::info("").severity(), Severity::Info);
        assert_eq!(Notification::warning("").severity(), Severity::Warning);
        assert_eq!(Notification::error("").severity(), Severity::Error);
    }
}
