// SPDX-License-Identifier: MPL-2.0
//! Picker message/event types re-exported by the facade.

use super::component::MountId;
use crate::application::port::TileBytes;
use crate::domain::geo::GeoPoint;
use crate::error::MapError;
use crate::map::{TileId, TileSource};
use crate::ui::notifications::Notification;
use iced::{Point, Size, Vector};

/// Credential panel messages.
#[derive(Debug, Clone)]
pub enum GateMessage {
    CredentialChanged(String),
    Activate,
}

/// Pointer interaction on the map canvas.
///
/// Every variant carries the canvas size measured when the event happened.
#[derive(Debug, Clone)]
pub enum CanvasMessage {
    /// Press and release without dragging.
    Clicked { position: Point, bounds: Size },
    /// Cursor moved while dragging.
    Dragged { delta: Vector, bounds: Size },
    /// Button released after a drag.
    DragEnded,
    /// Wheel scrolled over the map.
    Scrolled {
        anchor: Point,
        zoom_in: bool,
        bounds: Size,
    },
    /// The canvas was laid out with a new size.
    Resized(Size),
}

/// Buttons floating over the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    ZoomIn,
    ZoomOut,
    Recenter,
}

/// Messages handled by the picker.
#[derive(Debug, Clone)]
pub enum Message {
    Gate(GateMessage),
    Canvas(CanvasMessage),
    Control(ControlMessage),
    /// Provider acquisition finished for the given mount.
    Acquired {
        mount: MountId,
        result: Result<TileSource, MapError>,
    },
    /// A tile download finished for the given mount.
    TileLoaded {
        mount: MountId,
        tile: TileId,
        result: Result<TileBytes, MapError>,
    },
}

impl From<GateMessage> for Message {
    fn from(message: GateMessage) -> Self {
        Message::Gate(message)
    }
}

impl From<CanvasMessage> for Message {
    fn from(message: CanvasMessage) -> Self {
        Message::Canvas(message)
    }
}

impl From<ControlMessage> for Message {
    fn from(message: ControlMessage) -> Self {
        Message::Control(message)
    }
}

/// Events propagated to the embedding form, in the order they happened.
#[derive(Debug, Clone)]
pub enum Event {
    /// A click was accepted. Emitted after the selection and the marker
    /// were updated.
    LocationSelected(GeoPoint),
    /// The map surface was constructed and accepts clicks.
    MapReady,
    /// A toast to show.
    Notify(Notification),
    /// A tile failed for the first time on this surface.
    TileFailed(MapError),
}
