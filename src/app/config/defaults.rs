// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Map view**: initial center and zoom of the location picker
//! - **Tiles**: provider URL templates and cache sizing
//! - **Diagnostics**: event buffer sizing

use crate::domain::geo::{geo_bounds, zoom_bounds};
use crate::map::provider::{DEFAULT_OPEN_TILE_URL, DEFAULT_TOKEN_TILE_URL};

// ==========================================================================
// Map View Defaults
// ==========================================================================

/// Initial map center latitude (New York City).
pub const DEFAULT_MAP_LATITUDE: f64 = geo_bounds::DEFAULT_LATITUDE;

/// Initial map center longitude (New York City).
pub const DEFAULT_MAP_LONGITUDE: f64 = geo_bounds::DEFAULT_LONGITUDE;

/// Initial map zoom level (city).
pub const DEFAULT_MAP_ZOOM: u8 = zoom_bounds::DEFAULT;

// ==========================================================================
// Tile Defaults
// ==========================================================================

/// Free tile server URL template.
pub const DEFAULT_OPEN_TILE_URL_TEMPLATE: &str = DEFAULT_OPEN_TILE_URL;

/// Token-gated tile server URL template (`{token}` is the user's credential).
pub const DEFAULT_TOKEN_TILE_URL_TEMPLATE: &str = DEFAULT_TOKEN_TILE_URL;

/// Default number of decoded tiles cached per map surface.
pub const DEFAULT_TILE_CACHE_CAPACITY: usize = 256;

/// Minimum tile cache capacity (a full 1080p viewport needs about 60 tiles).
pub const MIN_TILE_CACHE_CAPACITY: usize = 64;

/// Maximum tile cache capacity.
pub const MAX_TILE_CACHE_CAPACITY: usize = 4096;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;
