// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::map::ProviderKind;
use crate::ui::listing_form;
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Form(listing_form::Message),
    Notification(notifications::NotificationMessage),
    Tick(Instant), // Periodic tick for notification auto-dismiss
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

impl From<listing_form::Message> for Message {
    fn from(message: listing_form::Message) -> Self {
        Message::Form(message)
    }
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Tile provider override; takes precedence over `[map] provider`.
    pub provider: Option<ProviderKind>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional data directory override (diagnostics reports).
    /// Takes precedence over `ICED_PARKING_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_PARKING_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Where to write the diagnostics report when the window closes.
    pub diagnostics_out: Option<PathBuf>,
    /// Write the report to the default location in the data directory.
    pub diagnostics: bool,
}

impl Flags {
    /// Resolves the report destination: an explicit path wins over
    /// `--diagnostics`, and neither means no report.
    #[must_use]
    pub fn report_path(&self) -> Option<PathBuf> {
        self.diagnostics_out.clone().or_else(|| {
            if self.diagnostics {
                crate::app::paths::default_diagnostics_report_path()
            } else {
                None
            }
        })
    }
}
