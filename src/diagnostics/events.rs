// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! This module defines the various types of events that can be captured
//! during application usage for diagnostic purposes. No event carries a
//! credential or a tile URL.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{ErrorType, WarningType};

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Listing Form
    // ==========================================================================
    /// Open the map picker modal.
    OpenPicker,

    /// Close the map picker modal.
    ClosePicker,

    /// Submit the listing form.
    SubmitListing,

    // ==========================================================================
    // Map Picker
    // ==========================================================================
    /// Press the activate button of the credential gate.
    ActivateMap,

    /// Click the map to select a location.
    SelectLocation,

    /// Drag the map.
    PanMap,

    /// Change the map zoom level.
    ZoomMap {
        /// Zoom level after the change.
        zoom: u8,
    },

    /// Return to the initial map view.
    RecenterMap,
}

/// Application state changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// Application finished booting.
    AppStarted {
        /// Active tile provider.
        provider: String,
    },

    /// A picker was mounted.
    PickerMounted {
        /// Provider backing the picker.
        provider: String,
    },

    /// The map surface was constructed and accepts clicks.
    MapReady,

    /// A picker was unmounted and its surface torn down.
    PickerUnmounted,
}

/// A non-critical issue with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// A failed operation with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// User-initiated action.
    UserAction {
        action: UserAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Application state change.
    AppState { state: AppStateEvent },

    /// Non-critical warning.
    Warning { event: WarningEvent },

    /// Operation failure.
    Error { event: ErrorEvent },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_action_serializes_with_action_tag() {
        let json = serde_json::to_string(&UserAction::ZoomMap { zoom: 13 }).expect("json");
        assert_eq!(json, r#"{"action":"zoom_map","zoom":13}"#);
    }

    #[test]
    fn event_kind_serializes_with_type_tag() {
        let kind = DiagnosticEventKind::AppState {
            state: AppStateEvent::MapReady,
        };
        let json = serde_json::to_string(&kind).expect("json");
        assert!(json.contains(r#""type":"app_state""#));
        assert!(json.contains(r#""state":"map_ready""#));
    }

    #[test]
    fn user_action_omits_empty_details() {
        let kind = DiagnosticEventKind::UserAction {
            action: UserAction::SelectLocation,
            details: None,
        };
        let json = serde_json::to_string(&kind).expect("json");
        assert!(!json.contains("details"));
    }

    #[test]
    fn warning_event_round_trips() {
        let kind = DiagnosticEventKind::Warning {
            event: WarningEvent::new(WarningType::CredentialIssue, "blank credential"),
        };
        let json = serde_json::to_string(&kind).expect("json");
        let back: DiagnosticEventKind = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, kind);
    }
}
