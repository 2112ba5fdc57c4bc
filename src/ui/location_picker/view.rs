// SPDX-License-Identifier: MPL-2.0
//! Picker rendering: credential panel, map area and confirmation line.

use super::canvas::{ContainerSensor, MapCanvas};
use super::component::{Phase, State};
use super::messages::{ControlMessage, GateMessage, Message};
use crate::i18n::fluent::I18n;
use crate::map::MapSurface;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, canvas::Canvas, text, text_input, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Contextual data needed to render the picker.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

impl State {
    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let body: Element<'a, Message> = match (self.phase(), self.surface()) {
            (phase, Some(surface)) if phase.is_ready() => self.map_area(surface, i18n),
            (Phase::Unmounted, _) => Column::new().into(),
            _ => self.gate_panel(i18n),
        };

        let confirmation = match self.selection() {
            Some(point) => i18n.tr_with_args(
                "picker-selected-location",
                &[
                    ("lat", &point.latitude_label()),
                    ("lng", &point.longitude_label()),
                ],
            ),
            None => i18n.tr("picker-no-selection"),
        };

        Column::new()
            .spacing(spacing::SM)
            .push(body)
            .push(Text::new(confirmation).size(typography::BODY))
            .into()
    }

    fn gate_panel<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let acquiring = self.phase() == Phase::Acquiring;

        let mut panel = Column::new()
            .spacing(spacing::SM)
            .max_width(sizing::FORM_WIDTH)
            .align_x(alignment::Horizontal::Center);

        if self.requires_activation() {
            let mut input = text_input(
                &i18n.tr("picker-credential-placeholder"),
                self.credential_input(),
            )
            .secure(true)
            .size(typography::BODY_LG);
            if !acquiring {
                input = input
                    .on_input(|value| GateMessage::CredentialChanged(value).into())
                    .on_submit(GateMessage::Activate.into());
            }

            let label = if acquiring {
                i18n.tr("picker-activating")
            } else {
                i18n.tr("picker-activate-button")
            };
            let activate = button(Text::new(label))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::primary)
                .on_press_maybe((!acquiring).then_some(GateMessage::Activate.into()));

            panel = panel
                .push(Text::new(i18n.tr("picker-credential-prompt")).size(typography::BODY_LG))
                .push(input)
                .push(activate)
                .push(Text::new(i18n.tr("picker-credential-hint")).size(typography::CAPTION));
        } else {
            panel = panel
                .push(Text::new(i18n.tr("picker-map-unavailable")).size(typography::BODY_LG))
                .push(
                    button(Text::new(i18n.tr("picker-retry-button")))
                        .padding([spacing::XS, spacing::MD])
                        .style(styles::button::primary)
                        .on_press(GateMessage::Activate.into()),
                );
        }

        // Measures the map area while the panel covers it; Retry builds the
        // surface at the measured size.
        let sensor = Canvas::new(ContainerSensor)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::MAP_MIN_HEIGHT));

        let panel = Container::new(panel)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::MAP_MIN_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(sizing::MAP_MIN_HEIGHT))
            .padding(spacing::MD);

        Container::new(Stack::new().push(sensor).push(panel))
            .width(Length::Fill)
            .style(styles::container::map_frame)
            .into()
    }

    fn map_area<'a>(&'a self, surface: &'a MapSurface, i18n: &'a I18n) -> Element<'a, Message> {
        let map = Canvas::new(MapCanvas::new(surface, self.marker()))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::MAP_MIN_HEIGHT));

        let zoom = surface.view().zoom();
        let control = |label: &'static str, message: ControlMessage, enabled: bool| {
            button(
                Container::new(Text::new(label).size(typography::BODY_LG))
                    .center_x(Length::Fill)
                    .center_y(Length::Fill),
            )
            .width(Length::Fixed(sizing::BUTTON_HEIGHT))
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .style(styles::button::map_control)
            .on_press_maybe(enabled.then_some(Message::Control(message)))
        };

        let controls = Column::new()
            .spacing(spacing::XXS)
            .push(control("+", ControlMessage::ZoomIn, !zoom.is_max()))
            .push(control("−", ControlMessage::ZoomOut, !zoom.is_min()))
            .push(control("⌖", ControlMessage::Recenter, true));

        let zoom_badge = Container::new(
            text(i18n.tr_with_args("picker-zoom-level", &[("zoom", &zoom.value().to_string())]))
                .size(typography::CAPTION),
        )
        .padding([spacing::XXS, spacing::XS])
        .style(styles::overlay::indicator(radius::SM));

        let overlay = Row::new()
            .padding(spacing::XS)
            .push(zoom_badge)
            .push(iced::widget::Space::new().width(Length::Fill))
            .push(controls);

        Container::new(Stack::new().push(map).push(overlay))
            .width(Length::Fill)
            .style(styles::container::map_frame)
            .into()
    }
}
