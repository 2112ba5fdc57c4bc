// SPDX-License-Identifier: MPL-2.0
//! Picker state machine.
//!
//! ```text
//! GateOpen ──activate──▶ Acquiring ──ok──▶ Ready ──click──▶ ReadyWithSelection ⟲ click
//!    ▲                       │
//!    └──────── failure ──────┘            any ──unmount──▶ Unmounted
//! ```
//!
//! Providers without a gate skip straight to `Ready` when mounted.

use super::messages::{CanvasMessage, ControlMessage, Event, GateMessage, Message};
use crate::application::port::TileFetcher;
use crate::config::{MapConfig, DEFAULT_TILE_CACHE_CAPACITY};
use crate::domain::geo::{Credential, GeoPoint, ZoomLevel};
use crate::error::MapError;
use crate::map::{build_provider, MapProvider, MapSurface, MarkerHandle, MarkerManager, TileSource};
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::notifications::Notification;
use iced::{Point, Size, Task};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one mount of a picker.
///
/// Async completions carry the id of the mount that started them, so a
/// result arriving after unmount or remount is recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Lifecycle of one mounted picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to activate the map.
    GateOpen,
    /// Provider acquisition in flight. Clicks and activation are ignored.
    Acquiring,
    /// Map shown, nothing picked yet.
    Ready,
    /// Map shown with a picked location.
    ReadyWithSelection,
    /// Torn down. Nothing is processed anymore.
    Unmounted,
}

impl Phase {
    /// Whether a map surface exists and accepts clicks.
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Phase::Ready | Phase::ReadyWithSelection)
    }
}

/// External capabilities the picker works with.
#[derive(Clone)]
pub struct MapServices {
    pub provider: Arc<dyn MapProvider>,
    pub fetcher: Arc<dyn TileFetcher>,
}

impl MapServices {
    #[must_use]
    pub fn new(provider: Arc<dyn MapProvider>, fetcher: Arc<dyn TileFetcher>) -> Self {
        Self { provider, fetcher }
    }

    /// Provider selected by the `[map]` settings, downloading through `fetcher`.
    #[must_use]
    pub fn from_config(map: &MapConfig, fetcher: Arc<dyn TileFetcher>) -> Self {
        let provider = build_provider(
            map.provider(),
            map.open_tile_url(),
            map.token_tile_url(),
            Arc::clone(&fetcher),
        );
        Self::new(provider, fetcher)
    }
}

impl std::fmt::Debug for MapServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapServices")
            .field("provider", &self.provider.kind())
            .finish_non_exhaustive()
    }
}

/// Initial view and sizing of the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerConfig {
    pub center: GeoPoint,
    pub zoom: ZoomLevel,
    pub cache_capacity: usize,
    /// Size reserved for the map area before the canvas reports its bounds.
    pub container: Size,
}

impl PickerConfig {
    #[must_use]
    pub fn from_map_config(map: &MapConfig) -> Self {
        Self {
            center: map.center(),
            zoom: map.zoom(),
            cache_capacity: map.tile_cache_capacity(),
            ..Self::default()
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::default(),
            zoom: ZoomLevel::default(),
            cache_capacity: DEFAULT_TILE_CACHE_CAPACITY,
            container: Size::new(
                sizing::MODAL_WIDTH - 2.0 * spacing::LG,
                sizing::MAP_MIN_HEIGHT,
            ),
        }
    }
}

/// One mounted location picker.
pub struct State {
    mount: MountId,
    services: MapServices,
    config: PickerConfig,
    phase: Phase,
    /// Raw text of the credential field. Cleared once the map is unlocked.
    credential_input: String,
    container: Size,
    surface: Option<MapSurface>,
    markers: MarkerManager,
    selection: Option<GeoPoint>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("mount", &self.mount)
            .field("phase", &self.phase)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl State {
    /// Mounts a picker.
    ///
    /// Providers without a gate construct the map right away; the returned
    /// events then contain [`Event::MapReady`] (or a failure toast) and the
    /// task downloads the first tiles.
    pub fn mount(services: MapServices, config: PickerConfig) -> (Self, Vec<Event>, Task<Message>) {
        let mut state = Self {
            mount: MountId::next(),
            services,
            config,
            phase: Phase::GateOpen,
            credential_input: String::new(),
            container: config.container,
            surface: None,
            markers: MarkerManager::new(),
            selection: None,
        };

        let (events, task) = if state.requires_credential() {
            (Vec::new(), Task::none())
        } else {
            state.activate()
        };
        (state, events, task)
    }

    pub fn update(&mut self, message: Message) -> (Vec<Event>, Task<Message>) {
        if self.phase == Phase::Unmounted {
            return (Vec::new(), Task::none());
        }

        match message {
            Message::Gate(GateMessage::CredentialChanged(value)) => {
                if self.phase == Phase::GateOpen {
                    self.credential_input = value;
                }
                (Vec::new(), Task::none())
            }
            Message::Gate(GateMessage::Activate) => self.activate(),
            Message::Canvas(canvas) => self.handle_canvas(canvas),
            Message::Control(control) => self.handle_control(control),
            Message::Acquired { mount, result } => {
                if mount != self.mount || self.phase != Phase::Acquiring {
                    return (Vec::new(), Task::none());
                }
                match result {
                    Ok(source) => self.construct(source),
                    Err(error) => {
                        self.phase = Phase::GateOpen;
                        (vec![Event::Notify(Notification::from_map_error(&error))], Task::none())
                    }
                }
            }
            Message::TileLoaded { mount, tile, result } => {
                if mount != self.mount {
                    return (Vec::new(), Task::none());
                }
                let Some(surface) = self.surface.as_mut() else {
                    return (Vec::new(), Task::none());
                };
                let events = surface
                    .tile_loaded(tile, result)
                    .map(Event::TileFailed)
                    .into_iter()
                    .collect();
                (events, Task::none())
            }
        }
    }

    /// Tears the picker down: the surface is destroyed, the marker disposed
    /// and the credential forgotten. Later messages are ignored.
    ///
    /// Calling it again is a no-op.
    pub fn unmount(&mut self) {
        if self.phase == Phase::Unmounted {
            return;
        }
        self.phase = Phase::Unmounted;
        self.markers.clear();
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
        self.credential_input.clear();
    }

    fn requires_credential(&self) -> bool {
        self.services.provider.requires_credential()
    }

    fn activate(&mut self) -> (Vec<Event>, Task<Message>) {
        if self.phase != Phase::GateOpen {
            return (Vec::new(), Task::none());
        }

        if !self.requires_credential() {
            return match self.services.provider.immediate_source() {
                Some(source) => self.construct(source),
                None => self.fail(&MapError::ProviderUnavailable(
                    "no tile source".to_string(),
                )),
            };
        }

        let Some(credential) = Credential::parse(&self.credential_input) else {
            return self.fail(&MapError::CredentialMissing);
        };

        self.phase = Phase::Acquiring;
        let mount = self.mount;
        let task = Task::perform(self.services.provider.acquire(credential), move |result| {
            Message::Acquired { mount, result }
        });
        (Vec::new(), task)
    }

    fn fail(&mut self, error: &MapError) -> (Vec<Event>, Task<Message>) {
        self.phase = Phase::GateOpen;
        (vec![Event::Notify(Notification::from_map_error(error))], Task::none())
    }

    fn construct(&mut self, source: TileSource) -> (Vec<Event>, Task<Message>) {
        if self.surface.is_some() {
            return (Vec::new(), Task::none());
        }

        match MapSurface::construct(
            self.container,
            source,
            self.config.center,
            self.config.zoom,
            self.config.cache_capacity,
        ) {
            Ok(surface) => {
                self.surface = Some(surface);
                self.phase = Phase::Ready;
                self.credential_input.clear();
                (vec![Event::MapReady], self.request_tiles())
            }
            Err(error) => self.fail(&error),
        }
    }

    fn handle_canvas(&mut self, message: CanvasMessage) -> (Vec<Event>, Task<Message>) {
        match message {
            CanvasMessage::Resized(size) => {
                self.container = size;
                self.follow_container(size);
                (Vec::new(), self.request_tiles())
            }
            CanvasMessage::Clicked { position, bounds } => {
                (self.select_at(position, bounds), Task::none())
            }
            CanvasMessage::Dragged { delta, bounds } => {
                let Some(surface) = self.surface.as_mut() else {
                    return (Vec::new(), Task::none());
                };
                surface.resize(bounds);
                surface.pan_by(delta);
                (Vec::new(), self.request_tiles())
            }
            CanvasMessage::DragEnded => (Vec::new(), Task::none()),
            CanvasMessage::Scrolled {
                anchor,
                zoom_in,
                bounds,
            } => {
                let Some(surface) = self.surface.as_mut() else {
                    return (Vec::new(), Task::none());
                };
                surface.resize(bounds);
                let current = surface.view().zoom();
                let zoom = if zoom_in {
                    current.zoom_in()
                } else {
                    current.zoom_out()
                };
                surface.zoom_around(anchor, zoom);
                (Vec::new(), self.request_tiles())
            }
        }
    }

    fn handle_control(&mut self, message: ControlMessage) -> (Vec<Event>, Task<Message>) {
        let Some(surface) = self.surface.as_mut() else {
            return (Vec::new(), Task::none());
        };
        match message {
            ControlMessage::ZoomIn => surface.zoom_step(true),
            ControlMessage::ZoomOut => surface.zoom_step(false),
            ControlMessage::Recenter => surface.recenter(),
        }
        (Vec::new(), self.request_tiles())
    }

    /// Records a click: selection first, then the marker, then the events.
    fn select_at(&mut self, position: Point, bounds: Size) -> Vec<Event> {
        if !self.phase.is_ready() {
            return Vec::new();
        }
        let Some(surface) = self.surface.as_mut() else {
            return Vec::new();
        };

        surface.resize(bounds);
        let point = surface.click_to_geo(position);

        self.selection = Some(point);
        self.markers.place(point);
        self.phase = Phase::ReadyWithSelection;

        let notification = Notification::success("notification-location-selected")
            .with_title("notification-location-selected-title")
            .with_arg("lat", point.latitude_label())
            .with_arg("lng", point.longitude_label());

        vec![Event::LocationSelected(point), Event::Notify(notification)]
    }

    fn follow_container(&mut self, size: Size) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
        }
    }

    fn request_tiles(&mut self) -> Task<Message> {
        let Some(surface) = self.surface.as_mut() else {
            return Task::none();
        };
        let mount = self.mount;
        let fetcher = Arc::clone(&self.services.fetcher);
        let tasks: Vec<Task<Message>> = surface
            .request_missing_tiles()
            .into_iter()
            .map(|(tile, url)| {
                Task::perform(fetcher.fetch(url), move |result| {
                    Message::TileLoaded { mount, tile, result }
                })
            })
            .collect();
        Task::batch(tasks)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The last picked location.
    #[must_use]
    pub fn selection(&self) -> Option<GeoPoint> {
        self.selection
    }

    /// Selected coordinates as shown on the confirmation line.
    #[must_use]
    pub fn confirmation_text(&self) -> Option<String> {
        self.selection.map(GeoPoint::label)
    }

    #[must_use]
    pub fn requires_activation(&self) -> bool {
        self.requires_credential()
    }

    #[must_use]
    pub fn credential_input(&self) -> &str {
        &self.credential_input
    }

    #[must_use]
    pub fn surface(&self) -> Option<&MapSurface> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn marker(&self) -> Option<&MarkerHandle> {
        self.markers.current()
    }

    /// Current zoom level, when a map is shown.
    #[must_use]
    pub fn zoom(&self) -> Option<ZoomLevel> {
        self.surface.as_ref().map(|surface| surface.view().zoom())
    }

    /// Live map surfaces owned by this picker: 0 or 1.
    #[must_use]
    pub fn live_surface_count(&self) -> usize {
        usize::from(self.surface.is_some())
    }

    /// Live markers owned by this picker: 0 or 1.
    #[must_use]
    pub fn live_marker_count(&self) -> usize {
        self.markers.live_count()
    }

    #[must_use]
    pub fn disposed_marker_count(&self) -> u64 {
        self.markers.disposed_count()
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.unmount();
    }
}
