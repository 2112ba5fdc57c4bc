// SPDX-License-Identifier: MPL-2.0
//! "List a space" form.
//!
//! The form owns the location picker while its modal is open. Each opening
//! mounts a fresh picker and closing it tears the picker down. "Done" keeps
//! the last location reported by the picker; "Cancel" restores the location
//! the form had when the modal opened.

use crate::diagnostics::WarningType;
use crate::domain::geo::GeoPoint;
use crate::error::MapError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::location_picker::{self, MapServices, PickerConfig};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, Element, Length, Task};

/// A listing ready to be published.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub address: String,
    pub location: GeoPoint,
}

#[derive(Debug, Clone)]
pub enum Message {
    TitleChanged(String),
    AddressChanged(String),
    OpenPicker,
    ClosePicker,
    CancelPicker,
    Picker(location_picker::Message),
    Submit,
}

/// Events surfaced to the application shell.
#[derive(Debug, Clone)]
pub enum Event {
    Notify(Notification),
    PickerOpened,
    PickerClosed,
    /// The open picker finished constructing its map.
    PickerReady,
    LocationChosen(GeoPoint),
    TileFailed(MapError),
    Submitted(ListingDraft),
}

#[derive(Debug)]
pub struct State {
    title: String,
    address: String,
    location: Option<GeoPoint>,
    /// Location to restore if the open picker is cancelled.
    location_at_open: Option<GeoPoint>,
    picker: Option<location_picker::State>,
    services: MapServices,
    picker_config: PickerConfig,
}

impl State {
    #[must_use]
    pub fn new(services: MapServices, picker_config: PickerConfig) -> Self {
        Self {
            title: String::new(),
            address: String::new(),
            location: None,
            location_at_open: None,
            picker: None,
            services,
            picker_config,
        }
    }

    pub fn update(&mut self, message: Message) -> (Vec<Event>, Task<Message>) {
        match message {
            Message::TitleChanged(value) => {
                self.title = value;
                (Vec::new(), Task::none())
            }
            Message::AddressChanged(value) => {
                self.address = value;
                (Vec::new(), Task::none())
            }
            Message::OpenPicker => self.open_picker(),
            Message::ClosePicker => (self.close_picker(), Task::none()),
            Message::CancelPicker => {
                let events = self.close_picker();
                if !events.is_empty() {
                    self.location = self.location_at_open;
                }
                (events, Task::none())
            }
            Message::Picker(picker_message) => {
                // Completions addressed to a picker that was closed land here
                // with no picker to receive them.
                let Some(picker) = self.picker.as_mut() else {
                    return (Vec::new(), Task::none());
                };
                let (events, task) = picker.update(picker_message);
                (self.forward(events), task.map(Message::Picker))
            }
            Message::Submit => (self.submit(), Task::none()),
        }
    }

    fn open_picker(&mut self) -> (Vec<Event>, Task<Message>) {
        if self.picker.is_some() {
            return (Vec::new(), Task::none());
        }
        let (picker, events, task) =
            location_picker::State::mount(self.services.clone(), self.picker_config);
        self.picker = Some(picker);
        self.location_at_open = self.location;

        let mut out = vec![Event::PickerOpened];
        out.extend(self.forward(events));
        (out, task.map(Message::Picker))
    }

    fn close_picker(&mut self) -> Vec<Event> {
        match self.picker.take() {
            Some(mut picker) => {
                picker.unmount();
                vec![Event::PickerClosed]
            }
            None => Vec::new(),
        }
    }

    fn forward(&mut self, events: Vec<location_picker::Event>) -> Vec<Event> {
        events
            .into_iter()
            .map(|event| match event {
                location_picker::Event::LocationSelected(point) => {
                    self.location = Some(point);
                    Event::LocationChosen(point)
                }
                location_picker::Event::MapReady => Event::PickerReady,
                location_picker::Event::Notify(notification) => Event::Notify(notification),
                location_picker::Event::TileFailed(error) => Event::TileFailed(error),
            })
            .collect()
    }

    fn submit(&mut self) -> Vec<Event> {
        let title = self.title.trim();
        if title.is_empty() {
            return vec![Event::Notify(
                Notification::warning("notification-listing-title-required")
                    .with_warning_type(WarningType::ValidationIssue),
            )];
        }
        let Some(location) = self.location else {
            return vec![Event::Notify(
                Notification::warning("notification-listing-location-required")
                    .with_warning_type(WarningType::ValidationIssue),
            )];
        };

        let draft = ListingDraft {
            title: title.to_string(),
            address: self.address.trim().to_string(),
            location,
        };
        let saved = Notification::success("notification-listing-saved")
            .with_arg("title", draft.title.clone());
        vec![Event::Submitted(draft), Event::Notify(saved)]
    }

    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn picker(&self) -> Option<&location_picker::State> {
        self.picker.as_ref()
    }

    #[must_use]
    pub fn is_picker_open(&self) -> bool {
        self.picker.is_some()
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let form = self.form_view(i18n);

        match &self.picker {
            Some(picker) => Stack::new()
                .push(form)
                .push(Self::modal(picker, i18n))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => form,
        }
    }

    fn form_view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let location_text = match self.location {
            Some(point) => point.label(),
            None => i18n.tr("listing-location-empty"),
        };

        let pick_button = button(Text::new(i18n.tr("listing-pick-on-map")))
            .padding([spacing::XS, spacing::MD])
            .style(styles::button::secondary)
            .on_press(Message::OpenPicker);

        let save_button = button(Text::new(i18n.tr("listing-save-button")))
            .padding([spacing::XS, spacing::MD])
            .style(styles::button::primary)
            .on_press(Message::Submit);

        let content = Column::new()
            .spacing(spacing::MD)
            .max_width(sizing::FORM_WIDTH)
            .push(Text::new(i18n.tr("listing-heading")).size(typography::TITLE_LG))
            .push(Text::new(i18n.tr("listing-title-label")).size(typography::BODY))
            .push(
                text_input(&i18n.tr("listing-title-placeholder"), &self.title)
                    .on_input(Message::TitleChanged)
                    .size(typography::BODY_LG),
            )
            .push(Text::new(i18n.tr("listing-address-label")).size(typography::BODY))
            .push(
                text_input(&i18n.tr("listing-address-placeholder"), &self.address)
                    .on_input(Message::AddressChanged)
                    .size(typography::BODY_LG),
            )
            .push(Text::new(i18n.tr("listing-location-label")).size(typography::BODY))
            .push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(alignment::Vertical::Center)
                    .push(Text::new(location_text).size(typography::BODY_LG))
                    .push(Space::new().width(Length::Fill))
                    .push(pick_button),
            )
            .push(
                Row::new()
                    .push(Space::new().width(Length::Fill))
                    .push(save_button),
            );

        Container::new(Container::new(content).padding(spacing::LG).style(styles::container::panel))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn modal<'a>(picker: &'a location_picker::State, i18n: &'a I18n) -> Element<'a, Message> {
        let header = Row::new()
            .align_y(alignment::Vertical::Center)
            .push(Text::new(i18n.tr("picker-title")).size(typography::TITLE_MD))
            .spacing(spacing::SM)
            .push(Space::new().width(Length::Fill))
            .push(
                button(Text::new(i18n.tr("picker-cancel-button")))
                    .padding([spacing::XS, spacing::MD])
                    .style(styles::button::secondary)
                    .on_press(Message::CancelPicker),
            )
            .push(
                button(Text::new(i18n.tr("picker-done-button")))
                    .padding([spacing::XS, spacing::MD])
                    .style(styles::button::primary)
                    .on_press(Message::ClosePicker),
            );

        let dialog = Column::new()
            .spacing(spacing::MD)
            .push(header)
            .push(
                picker
                    .view(location_picker::ViewContext { i18n })
                    .map(Message::Picker),
            );

        let dialog = Container::new(dialog)
            .padding(spacing::LG)
            .width(Length::Fixed(sizing::MODAL_WIDTH))
            .style(styles::container::panel);

        Container::new(dialog)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(styles::container::backdrop)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{TileBytes, TileFetcher};
    use crate::map::{build_provider, ProviderKind};
    use crate::ui::location_picker::{CanvasMessage, Phase};
    use crate::ui::notifications::Severity;
    use futures_util::future::BoxFuture;
    use futures_util::FutureExt;
    use iced::{Point, Size};
    use std::sync::Arc;

    struct EmptyFetcher;

    impl TileFetcher for EmptyFetcher {
        fn fetch(&self, _url: String) -> BoxFuture<'static, Result<TileBytes, MapError>> {
            async { Err(MapError::TileFetch("offline".into())) }.boxed()
        }
    }

    fn open_form() -> State {
        let fetcher: Arc<dyn TileFetcher> = Arc::new(EmptyFetcher);
        let provider = build_provider(
            ProviderKind::OpenTiles,
            "https://tile.example.org/{z}/{x}/{y}.png",
            "https://tiles.example.org/{z}/{x}/{y}?token={token}",
            Arc::clone(&fetcher),
        );
        State::new(MapServices::new(provider, fetcher), PickerConfig::default())
    }

    fn click_center(form: &mut State) -> Vec<Event> {
        let bounds = PickerConfig::default().container;
        let (events, _) = form.update(Message::Picker(
            CanvasMessage::Clicked {
                position: Point::new(bounds.width / 2.0, bounds.height / 2.0),
                bounds: Size::new(bounds.width, bounds.height),
            }
            .into(),
        ));
        events
    }

    #[test]
    fn opening_mounts_a_ready_picker_for_open_tiles() {
        let mut form = open_form();
        let (events, _) = form.update(Message::OpenPicker);

        assert!(matches!(events[0], Event::PickerOpened));
        assert!(events.iter().any(|e| matches!(e, Event::PickerReady)));
        assert_eq!(form.picker().map(|p| p.phase()), Some(Phase::Ready));
    }

    #[test]
    fn opening_twice_keeps_the_same_picker() {
        let mut form = open_form();
        let _ = form.update(Message::OpenPicker);
        let mount = form.picker().map(|p| p.mount_id());

        let (events, _) = form.update(Message::OpenPicker);

        assert!(events.is_empty());
        assert_eq!(form.picker().map(|p| p.mount_id()), mount);
    }

    #[test]
    fn selection_is_stored_and_survives_closing() {
        let mut form = open_form();
        let _ = form.update(Message::OpenPicker);

        let events = click_center(&mut form);
        let chosen = events.iter().find_map(|e| match e {
            Event::LocationChosen(point) => Some(*point),
            _ => None,
        });
        assert!(chosen.is_some());
        assert_eq!(form.location(), chosen);

        let (events, _) = form.update(Message::ClosePicker);
        assert!(matches!(events.as_slice(), [Event::PickerClosed]));
        assert!(!form.is_picker_open());
        assert_eq!(form.location(), chosen);
    }

    #[test]
    fn cancel_restores_the_location_from_before_opening() {
        let mut form = open_form();
        let _ = form.update(Message::OpenPicker);
        let _ = click_center(&mut form);
        let _ = form.update(Message::ClosePicker);
        let kept = form.location();
        assert!(kept.is_some());

        let _ = form.update(Message::OpenPicker);
        let (events, _) = form.update(Message::Picker(
            CanvasMessage::Clicked {
                position: Point::new(40.0, 40.0),
                bounds: PickerConfig::default().container,
            }
            .into(),
        ));
        assert!(events.iter().any(|e| matches!(e, Event::LocationChosen(_))));
        assert_ne!(form.location(), kept);

        let (events, _) = form.update(Message::CancelPicker);
        assert!(matches!(events.as_slice(), [Event::PickerClosed]));
        assert!(!form.is_picker_open());
        assert_eq!(form.location(), kept);
    }

    #[test]
    fn cancel_without_picker_keeps_the_location() {
        let mut form = open_form();
        let _ = form.update(Message::OpenPicker);
        let _ = click_center(&mut form);
        let _ = form.update(Message::ClosePicker);
        let kept = form.location();

        let (events, _) = form.update(Message::CancelPicker);
        assert!(events.is_empty());
        assert_eq!(form.location(), kept);
    }

    #[test]
    fn reopening_mounts_a_fresh_picker() {
        let mut form = open_form();
        let _ = form.update(Message::OpenPicker);
        let first = form.picker().map(|p| p.mount_id());
        let _ = form.update(Message::ClosePicker);
        let _ = form.update(Message::OpenPicker);

        let second = form.picker().map(|p| p.mount_id());
        assert_ne!(first, second);
        assert_eq!(form.picker().and_then(|p| p.selection()), None);
    }

    #[test]
    fn picker_messages_after_close_are_dropped() {
        let mut form = open_form();
        let _ = form.update(Message::OpenPicker);
        let _ = form.update(Message::ClosePicker);

        let events = click_center(&mut form);
        assert!(events.is_empty());
        assert_eq!(form.location(), None);
    }

    #[test]
    fn closing_without_picker_is_a_no_op() {
        let mut form = open_form();
        let (events, _) = form.update(Message::ClosePicker);
        assert!(events.is_empty());
    }

    #[test]
    fn submit_requires_a_title() {
        let mut form = open_form();
        let (events, _) = form.update(Message::TitleChanged("   ".into()));
        assert!(events.is_empty());

        let (events, _) = form.update(Message::Submit);
        match events.as_slice() {
            [Event::Notify(notification)] => {
                assert_eq!(notification.severity(), Severity::Warning);
                assert_eq!(
                    notification.message_key(),
                    "notification-listing-title-required"
                );
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn submit_requires_a_location() {
        let mut form = open_form();
        let _ = form.update(Message::TitleChanged("Driveway near the park".into()));

        let (events, _) = form.update(Message::Submit);
        match events.as_slice() {
            [Event::Notify(notification)] => assert_eq!(
                notification.message_key(),
                "notification-listing-location-required"
            ),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn submit_emits_a_trimmed_draft() {
        let mut form = open_form();
        let _ = form.update(Message::TitleChanged("  Covered spot ".into()));
        let _ = form.update(Message::AddressChanged(" 5th Avenue ".into()));
        let _ = form.update(Message::OpenPicker);
        let _ = click_center(&mut form);
        let _ = form.update(Message::ClosePicker);

        let (events, _) = form.update(Message::Submit);
        match events.as_slice() {
            [Event::Submitted(draft), Event::Notify(saved)] => {
                assert_eq!(draft.title, "Covered spot");
                assert_eq!(draft.address, "5th Avenue");
                assert_eq!(Some(draft.location), form.location());
                assert_eq!(saved.arg("title"), Some("Covered spot"));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }
}
