// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The listing form fills the window; toasts are stacked above it.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::listing_form;
use crate::ui::notifications::{Manager, Toast};
use iced::{
    widget::{Container, Stack},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub form: &'a listing_form::State,
    pub notifications: &'a Manager,
}

/// Renders the form with the notification overlay on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let form = ctx.form.view(ctx.i18n).map(Message::Form);

    let content = Container::new(form)
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .push(content)
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
