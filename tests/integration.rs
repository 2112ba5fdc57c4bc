// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use iced_parking::application::port::{TileBytes, TileFetcher};
use iced_parking::config::{self, Config};
use iced_parking::domain::geo::{Credential, GeoPoint};
use iced_parking::error::MapError;
use iced_parking::i18n::fluent::I18n;
use iced_parking::map::{MapProvider, ProviderKind, TokenGatedProvider};
use iced_parking::ui::listing_form;
use iced_parking::ui::location_picker::{
    self, CanvasMessage, Event, GateMessage, MapServices, Phase, PickerConfig, State,
};
use std::sync::Arc;
use tempfile::tempdir;

const TOKEN_TEMPLATE: &str = "https://tiles.test/{z}/{x}/{y}.png?access_token={token}";

/// Answers every request with the same bytes, recording nothing.
struct FixedFetcher(Result<TileBytes, MapError>);

impl TileFetcher for FixedFetcher {
    fn fetch(&self, _url: String) -> BoxFuture<'static, Result<TileBytes, MapError>> {
        let result = self.0.clone();
        async move { result }.boxed()
    }
}

fn gated_services(answer: Result<TileBytes, MapError>) -> MapServices {
    let fetcher: Arc<dyn TileFetcher> = Arc::new(FixedFetcher(answer));
    let provider: Arc<dyn MapProvider> =
        Arc::new(TokenGatedProvider::new(TOKEN_TEMPLATE, Arc::clone(&fetcher)));
    MapServices::new(provider, fetcher)
}

async fn activate(state: &mut State, services: &MapServices, token: &str) -> Vec<Event> {
    let _ = state.update(GateMessage::CredentialChanged(token.to_string()).into());
    let _ = state.update(GateMessage::Activate.into());
    assert_eq!(state.phase(), Phase::Acquiring);

    let credential = Credential::parse(token).expect("non-blank token");
    let result = services.provider.acquire(credential).await;
    let (events, _task) = state.update(location_picker::Message::Acquired {
        mount: state.mount_id(),
        result,
    });
    events
}

fn click_on(state: &mut State, target: GeoPoint) -> Vec<Event> {
    let surface = state.surface().expect("map surface");
    let position = surface.view().screen_position(target);
    let bounds = surface.view().viewport();
    let (events, _task) = state.update(CanvasMessage::Clicked { position, bounds }.into());
    events
}

fn selected(events: &[Event]) -> Vec<GeoPoint> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::LocationSelected(point) => Some(*point),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn gated_picker_full_scenario() {
    let services = gated_services(Ok(vec![0x89, b'P', b'N', b'G']));
    let (mut state, events, _task) = State::mount(services.clone(), PickerConfig::default());
    assert!(events.is_empty());
    assert_eq!(state.phase(), Phase::GateOpen);

    let events = activate(&mut state, &services, "valid-token-123").await;
    assert!(matches!(events.as_slice(), [Event::MapReady]));
    assert_eq!(state.credential_input(), "");

    let first = GeoPoint::new(40.7500, -73.9900).expect("valid point");
    let points = selected(&click_on(&mut state, first));
    assert_eq!(points.len(), 1);
    assert_abs_diff_eq!(points[0].latitude(), 40.75, epsilon = 1e-6);
    assert_abs_diff_eq!(points[0].longitude(), -73.99, epsilon = 1e-6);
    assert_eq!(state.confirmation_text().as_deref(), Some("40.7500, -73.9900"));
    assert_eq!(state.live_marker_count(), 1);

    let second = GeoPoint::new(40.7600, -73.9800).expect("valid point");
    let points = selected(&click_on(&mut state, second));
    assert_eq!(points.len(), 1);
    assert_eq!(state.live_marker_count(), 1);
    assert_eq!(state.marker().map(|m| m.point()), Some(points[0]));
    assert_eq!(state.confirmation_text().as_deref(), Some("40.7600, -73.9800"));

    state.unmount();
    assert_eq!(state.live_surface_count(), 0);
    assert_eq!(state.live_marker_count(), 0);
    assert!(selected(&click_on_blind(&mut state)).is_empty());
}

fn click_on_blind(state: &mut State) -> Vec<Event> {
    let bounds = PickerConfig::default().container;
    let (events, _task) = state.update(
        CanvasMessage::Clicked {
            position: iced::Point::new(10.0, 10.0),
            bounds,
        }
        .into(),
    );
    events
}

#[tokio::test]
async fn rejected_token_keeps_the_gate_open() {
    let services = gated_services(Err(MapError::CredentialRejected));
    let (mut state, _, _) = State::mount(services.clone(), PickerConfig::default());

    let events = activate(&mut state, &services, "expired-token").await;

    let keys: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::Notify(notification) => Some(notification.message_key()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, vec!["error-map-credential-rejected"]);
    assert_eq!(state.phase(), Phase::GateOpen);
    assert_eq!(state.live_surface_count(), 0);
    assert_eq!(state.selection(), None);
}

#[test]
fn form_keeps_location_after_closing_the_picker() {
    let services = MapServices::from_config(
        &Config::default().map,
        Arc::new(FixedFetcher(Err(MapError::TileFetch("offline".into())))),
    );
    let mut form = listing_form::State::new(services, PickerConfig::default());
    let _ = form.update(listing_form::Message::OpenPicker);
    assert!(form.picker().is_some_and(|p| p.phase().is_ready()));

    let bounds = PickerConfig::default().container;
    let (events, _) = form.update(listing_form::Message::Picker(
        CanvasMessage::Clicked {
            position: iced::Point::new(bounds.width / 2.0, bounds.height / 2.0),
            bounds,
        }
        .into(),
    ));
    assert!(events
        .iter()
        .any(|e| matches!(e, listing_form::Event::LocationChosen(_))));

    let _ = form.update(listing_form::Message::ClosePicker);
    let location = form.location().expect("location kept");
    assert_abs_diff_eq!(location.latitude(), 40.7128, epsilon = 1e-4);
    assert_abs_diff_eq!(location.longitude(), -74.006, epsilon = 1e-4);
}

#[test]
fn map_settings_round_trip_through_disk() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.map.provider = Some(ProviderKind::TokenGated);
    config.map.default_latitude = Some(48.8566);
    config.map.default_longitude = Some(2.3522);
    config.map.default_zoom = Some(15);
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded.map.provider(), ProviderKind::TokenGated);
    assert_eq!(loaded.map.center().label(), "48.8566, 2.3522");
    assert_eq!(loaded.map.zoom().value(), 15);

    let picker = PickerConfig::from_map_config(&loaded.map);
    assert_eq!(picker.center, loaded.map.center());
}

#[test]
fn language_follows_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.language = Some("fr".to_string());
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let i18n = I18n::new(None, None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("picker-activate-button"), "Activer la carte");
}

#[test]
fn confirmation_line_is_localized() {
    let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
    let line = i18n.tr_with_args(
        "picker-selected-location",
        &[("lat", "40.7500"), ("lng", "-73.9900")],
    );
    assert_eq!(line, "Location selected: 40.7500, -73.9900");
}
