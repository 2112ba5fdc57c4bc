// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Pointer input reaches the map canvas through the widget tree; the only
//! native event routed here is the window close request, used to write the
//! diagnostics report before exiting.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Interval of the notification auto-dismiss tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Forwards window close requests.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| {
        if let event::Event::Window(iced::window::Event::CloseRequested) = event {
            return Some(Message::WindowCloseRequested(window_id));
        }
        None
    })
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
