// SPDX-License-Identifier: MPL-2.0
//! Message sanitization and warning/error type definitions.
//!
//! This module provides:
//! - Type enums for categorizing warnings and errors
//! - Message sanitization to remove sensitive data (file paths, access tokens)

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Warning and Error Type Enums
// =============================================================================

/// Categories of warnings that can occur in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A map credential was missing or refused.
    CredentialIssue,
    /// A network-related issue occurred (tile download).
    NetworkError,
    /// A configuration issue was detected.
    ConfigurationIssue,
    /// Form input did not pass validation.
    ValidationIssue,
    /// Other warning type not covered by specific categories.
    Other,
}

/// Categories of errors that can occur in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Map activation or surface construction failed.
    MapError,
    /// Input/output error (file read/write failures).
    IoError,
    /// Internal application error.
    InternalError,
    /// Other error type not covered by specific categories.
    Other,
}

// =============================================================================
// Message Sanitization
// =============================================================================

/// Compiled regex patterns for path detection.
static PATH_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,       // Linux home
        r#"|/Users/[^\s"'()\[\]]+"#,     // macOS home
        r#"|/tmp/[^\s"'()\[\]]+"#,       // Temp directory
        r#"|/var/[^\s"'()\[\]]+"#,       // Variable data
        r#"|~/[^\s"'()\[\]]+"#,          // Home shortcut (all platforms)
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#, // Windows drive paths (C:\, D:\, etc.)
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Full URLs. Tile URLs may carry an access token in the query string.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'()\[\]]+"#).expect("url regex should compile")
});

/// Token-like query parameters appearing outside a full URL.
static TOKEN_PARAM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(access_token|token|key)=[^\s&"']+"#).expect("token regex should compile")
});

/// Sanitizes a message by removing sensitive information.
///
/// Currently removes:
/// - URLs (replaced with `<url>`)
/// - `access_token=...` style parameters (value replaced with `<redacted>`)
/// - Unix and Windows file paths (replaced with `<path>`)
///
/// # Examples
///
/// ```
/// use iced_parking::diagnostics::sanitize_message;
///
/// let msg = "GET https://tiles.test/0/0/0?access_token=pk.abc failed";
/// assert_eq!(sanitize_message(msg), "GET <url> failed");
///
/// let msg = "Cannot read /home/user/.config/settings.toml";
/// assert_eq!(sanitize_message(msg), "Cannot read <path>");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(message, "<url>");
    let without_tokens = TOKEN_PARAM_PATTERN.replace_all(&without_urls, "$1=<redacted>");
    PATH_PATTERNS
        .replace_all(&without_tokens, "<path>")
        .into_owned()
}
