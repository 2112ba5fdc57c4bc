// SPDX-License-Identifier: MPL-2.0
//! Geographic domain types.
//!
//! This module provides pure domain types for map interaction:
//! - [`GeoPoint`]: A validated latitude/longitude pair
//! - [`ZoomLevel`]: Slippy-map zoom level, clamped to the supported range
//! - [`Credential`]: A user-supplied map access token that is never displayed

mod newtypes;

pub use newtypes::{geo_bounds, zoom_bounds, CoordinateError, Credential, GeoPoint, ZoomLevel};
