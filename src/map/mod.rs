// SPDX-License-Identifier: MPL-2.0
//! Slippy-map engine behind the location picker.
//!
//! - [`projection`]: Web Mercator math
//! - [`tiles`]: tile addresses, URL templates, tile cache
//! - [`provider`]: tile providers and credential acquisition
//! - [`surface`]: the camera and the live map surface
//! - [`marker`]: the single selection marker

pub mod marker;
pub mod projection;
pub mod provider;
pub mod surface;
pub mod tiles;

pub use marker::{MarkerHandle, MarkerId, MarkerManager};
pub use provider::{build_provider, MapProvider, OpenTileProvider, ProviderKind, TokenGatedProvider};
pub use surface::{MapSurface, MapView};
pub use tiles::{PlacedTile, TileCache, TileId, TileSource};
