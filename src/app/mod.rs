// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the listing form, the
//! notification overlay and diagnostics.
//!
//! The `App` struct wires together the domains (form, localization, settings)
//! and translates form events into toasts and diagnostics entries. Startup
//! policy (provider choice, tile fetcher fallback, report destination) lives
//! next to the main update loop so user-facing behavior is easy to audit.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::TileFetcher;
use crate::diagnostics::{AppStateEvent, DiagnosticsCollector, WarningType};
use crate::i18n::fluent::I18n;
use crate::infrastructure::{HttpTileFetcher, OfflineTileFetcher};
use crate::map::ProviderKind;
use crate::ui::listing_form;
use crate::ui::location_picker::{MapServices, PickerConfig};
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state that bridges the listing form, localization,
/// and persisted preferences.
pub struct App {
    pub i18n: I18n,
    form: listing_form::State,
    theme_mode: ThemeMode,
    provider: ProviderKind,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    diagnostics: DiagnosticsCollector,
    /// Where the diagnostics report goes when the window closes.
    report_path: Option<PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("provider", &self.provider)
            .field("picker_open", &self.form.is_picker_open())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 800;

/// Builds the window settings.
///
/// Close requests are delivered to the app so the diagnostics report can be
/// written before the window goes away.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Tile fetcher used by the running application. A client that cannot be
/// built leaves the picker usable with empty tiles.
fn default_fetcher() -> Arc<dyn TileFetcher> {
    match HttpTileFetcher::new() {
        Ok(fetcher) => Arc::new(fetcher),
        Err(err) => {
            eprintln!("HTTP client unavailable, tiles disabled: {err}");
            Arc::new(OfflineTileFetcher)
        }
    }
}

impl App {
    /// Initializes application state from the settings file and the `Flags`
    /// received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut config, config_warning) = config::load();
        if let Some(provider) = flags.provider {
            config.map.provider = Some(provider);
        }
        let i18n = I18n::new(flags.lang.clone(), flags.i18n_dir.clone(), &config);

        let provider = config.map.provider();
        let services = MapServices::from_config(&config.map, default_fetcher());
        let form = listing_form::State::new(services, PickerConfig::from_map_config(&config.map));

        let mut diagnostics = DiagnosticsCollector::new(config::DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
        let mut notifications = notifications::Manager::new();
        notifications.set_diagnostics(diagnostics.handle());

        diagnostics.log_state(AppStateEvent::AppStarted {
            provider: provider.to_string(),
        });

        if let Some(key) = config_warning {
            notifications.push(
                notifications::Notification::warning(&key)
                    .with_warning_type(WarningType::ConfigurationIssue),
            );
        }

        let app = App {
            i18n,
            form,
            theme_mode: config.general.theme_mode,
            provider,
            notifications,
            diagnostics,
            report_path: flags.report_path(),
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        if self.form.is_picker_open() {
            format!("{} - {app_name}", self.i18n.tr("picker-title"))
        } else {
            app_name
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub =
            subscription::create_tick_subscription(self.notifications.has_notifications());

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Form(form_message) => {
                let mut ctx = update::UpdateContext {
                    form: &mut self.form,
                    notifications: &mut self.notifications,
                    diagnostics: &mut self.diagnostics,
                    provider: self.provider,
                };
                update::handle_form_message(&mut ctx, form_message)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_instant) => {
                // Tick notification manager to handle auto-dismiss
                self.notifications.tick();
                self.diagnostics.process_pending();
                Task::none()
            }
            Message::WindowCloseRequested(id) => update::handle_close_requested(
                &mut self.diagnostics,
                &mut self.form,
                self.report_path.as_ref(),
                id,
            ),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            form: &self.form,
            notifications: &self.notifications,
        })
    }
}
