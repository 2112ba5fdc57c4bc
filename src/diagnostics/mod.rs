// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! This module provides infrastructure for capturing diagnostic events during
//! application usage, storing them in a memory-bounded circular buffer, and
//! exporting them as JSON reports.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event with a [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: storage and the cloneable sender
//!
//! # Privacy
//!
//! Warning and error messages are sanitized before storage: URLs, access
//! tokens and file paths are replaced with placeholders. Credentials are
//! never passed to diagnostics in the first place.

mod buffer;
mod collector;
mod events;
mod report;
mod sanitizer;

pub use buffer::{CircularBuffer, DEFAULT_BUFFER_CAPACITY};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    AppStateEvent, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction, WarningEvent,
};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
pub use sanitizer::{sanitize_message, ErrorType, WarningType};
