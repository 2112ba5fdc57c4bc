// SPDX-License-Identifier: MPL-2.0
//! Map location picker.
//!
//! Renders a slippy map, lets the user click a single point and reports it
//! to the embedding form as [`Event::LocationSelected`]. Token-gated
//! providers first show a credential panel; free tile providers open the
//! map straight away.
//!
//! The picker follows the "state down, messages up" pattern: the form owns
//! a [`State`], forwards [`Message`]s to [`State::update`] and reacts to
//! the returned [`Event`]s. Dropping the state (or calling
//! [`State::unmount`]) tears the map down.

mod canvas;
mod component;
mod messages;
mod view;


pub use canvas::{ContainerSensor, MapCanvas, PointerState};
pub use component::{MapServices, MountId, Phase, PickerConfig, State};
pub use messages::{CanvasMessage, ControlMessage, Event, GateMessage, Message};
pub use view::ViewContext;
