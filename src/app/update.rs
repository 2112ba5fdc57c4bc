// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Form events are turned into toasts and diagnostics entries here. User
//! actions are recorded from the messages that caused them, state changes
//! from the events the form reports back.

use super::Message;
use crate::diagnostics::{
    AppStateEvent, DiagnosticsCollector, UserAction, WarningEvent, WarningType,
};
use crate::map::ProviderKind;
use crate::ui::listing_form::{self, Event as FormEvent};
use crate::ui::location_picker::{self, CanvasMessage, ControlMessage, GateMessage};
use crate::ui::notifications;
use iced::{window, Task};
use std::path::PathBuf;

/// Mutable application state needed by the handlers.
pub struct UpdateContext<'a> {
    pub form: &'a mut listing_form::State,
    pub notifications: &'a mut notifications::Manager,
    pub diagnostics: &'a mut DiagnosticsCollector,
    pub provider: ProviderKind,
}

/// What a form message means for diagnostics, decided before the message
/// is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    Submit,
    Activate,
    Pan,
    Zoom,
    Recenter,
    Other,
}

fn classify(message: &listing_form::Message) -> ActionKind {
    match message {
        listing_form::Message::Submit => ActionKind::Submit,
        listing_form::Message::Picker(picker) => match picker {
            location_picker::Message::Gate(GateMessage::Activate) => ActionKind::Activate,
            location_picker::Message::Canvas(CanvasMessage::DragEnded) => ActionKind::Pan,
            location_picker::Message::Canvas(CanvasMessage::Scrolled { .. })
            | location_picker::Message::Control(ControlMessage::ZoomIn | ControlMessage::ZoomOut) => {
                ActionKind::Zoom
            }
            location_picker::Message::Control(ControlMessage::Recenter) => ActionKind::Recenter,
            _ => ActionKind::Other,
        },
        _ => ActionKind::Other,
    }
}

/// Forwards a message to the listing form and reacts to its events.
pub fn handle_form_message(
    ctx: &mut UpdateContext<'_>,
    message: listing_form::Message,
) -> Task<Message> {
    let action = classify(&message);
    let zoom_before = current_zoom(ctx.form);

    let (events, task) = ctx.form.update(message);

    match action {
        ActionKind::Submit => ctx.diagnostics.log_action(UserAction::SubmitListing),
        ActionKind::Activate => ctx.diagnostics.log_action(UserAction::ActivateMap),
        ActionKind::Pan => ctx.diagnostics.log_action(UserAction::PanMap),
        ActionKind::Recenter => ctx.diagnostics.log_action(UserAction::RecenterMap),
        ActionKind::Zoom => {
            let zoom_after = current_zoom(ctx.form);
            if let Some(zoom) = zoom_after.filter(|_| zoom_after != zoom_before) {
                ctx.diagnostics.log_action(UserAction::ZoomMap { zoom });
            }
        }
        ActionKind::Other => {}
    }

    for event in events {
        handle_form_event(ctx, event);
    }

    task.map(Message::Form)
}

fn current_zoom(form: &listing_form::State) -> Option<u8> {
    form.picker()
        .and_then(location_picker::State::zoom)
        .map(|zoom| zoom.value())
}

fn handle_form_event(ctx: &mut UpdateContext<'_>, event: FormEvent) {
    match event {
        FormEvent::Notify(notification) => ctx.notifications.push(notification),
        FormEvent::PickerOpened => {
            ctx.diagnostics.log_action(UserAction::OpenPicker);
            ctx.diagnostics.log_state(AppStateEvent::PickerMounted {
                provider: ctx.provider.to_string(),
            });
        }
        FormEvent::PickerClosed => {
            ctx.diagnostics.log_action(UserAction::ClosePicker);
            ctx.diagnostics.log_state(AppStateEvent::PickerUnmounted);
        }
        FormEvent::PickerReady => {
            ctx.notifications.clear_map_errors();
            ctx.diagnostics.log_state(AppStateEvent::MapReady);
        }
        FormEvent::LocationChosen(_) => {
            ctx.diagnostics.log_action(UserAction::SelectLocation);
        }
        FormEvent::TileFailed(error) => {
            // Only the message key: tile errors may carry a URL with a token.
            ctx.diagnostics
                .handle()
                .log_warning(WarningEvent::new(WarningType::NetworkError, error.i18n_key()));
        }
        FormEvent::Submitted(_) => {}
    }
}

/// Writes the diagnostics report, if requested, then closes the window.
pub fn handle_close_requested(
    diagnostics: &mut DiagnosticsCollector,
    form: &mut listing_form::State,
    report_path: Option<&PathBuf>,
    id: window::Id,
) -> Task<Message> {
    // Tear the picker down before the report so the unmount is recorded.
    for event in form.update(listing_form::Message::ClosePicker).0 {
        if let FormEvent::PickerClosed = event {
            diagnostics.log_state(AppStateEvent::PickerUnmounted);
        }
    }
    diagnostics.process_pending();

    if let Some(path) = report_path {
        if let Err(err) = diagnostics.export_to_file(path) {
            eprintln!("Failed to write diagnostics report: {err}");
        }
    }

    window::close(id)
}
