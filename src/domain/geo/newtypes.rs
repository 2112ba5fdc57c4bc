// SPDX-License-Identifier: MPL-2.0
//! Geographic newtypes.
//!
//! This module provides type-safe wrappers for geographic values,
//! ensuring they are always within valid ranges.

use std::fmt;

// =============================================================================
// Coordinate Bounds
// =============================================================================

/// Coordinate bounds and the default map center.
pub mod geo_bounds {
    /// Southern-most latitude.
    pub const MIN_LATITUDE: f64 = -90.0;
    /// Northern-most latitude.
    pub const MAX_LATITUDE: f64 = 90.0;
    /// Western-most longitude.
    pub const MIN_LONGITUDE: f64 = -180.0;
    /// Eastern-most longitude.
    pub const MAX_LONGITUDE: f64 = 180.0;
    /// Default center latitude (New York City).
    pub const DEFAULT_LATITUDE: f64 = 40.7128;
    /// Default center longitude (New York City).
    pub const DEFAULT_LONGITUDE: f64 = -74.006;
}

/// Decimal places used when a coordinate is shown to the user.
const LABEL_PRECISION: usize = 4;

// =============================================================================
// CoordinateError
// =============================================================================

/// Reasons a latitude/longitude pair is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    /// One of the components is NaN or infinite.
    NotFinite,
    /// Latitude is outside [-90, 90].
    LatitudeOutOfRange,
    /// Longitude is outside [-180, 180].
    LongitudeOutOfRange,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::NotFinite => write!(f, "coordinate is not a finite number"),
            CoordinateError::LatitudeOutOfRange => write!(f, "latitude must be within [-90, 90]"),
            CoordinateError::LongitudeOutOfRange => {
                write!(f, "longitude must be within [-180, 180]")
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

// =============================================================================
// GeoPoint
// =============================================================================

/// A location on Earth, guaranteed to hold a valid latitude and longitude.
///
/// Values are immutable: a new selection always produces a new `GeoPoint`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting non-finite or out-of-range components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(geo_bounds::MIN_LATITUDE..=geo_bounds::MAX_LATITUDE).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange);
        }
        if !(geo_bounds::MIN_LONGITUDE..=geo_bounds::MAX_LONGITUDE).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a point from values that are already known to be in range
    /// (projection output, compile-time constants).
    ///
    /// Components are clamped so the invariant still holds.
    #[must_use]
    pub fn clamped(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(geo_bounds::MIN_LATITUDE, geo_bounds::MAX_LATITUDE),
            longitude: longitude.clamp(geo_bounds::MIN_LONGITUDE, geo_bounds::MAX_LONGITUDE),
        }
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }

    /// Human-readable `"lat, lng"` label rounded to four decimals.
    #[must_use]
    pub fn label(self) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.latitude,
            self.longitude,
            prec = LABEL_PRECISION
        )
    }

    /// Latitude rounded for display.
    #[must_use]
    pub fn latitude_label(self) -> String {
        format!("{:.prec$}", self.latitude, prec = LABEL_PRECISION)
    }

    /// Longitude rounded for display.
    #[must_use]
    pub fn longitude_label(self) -> String {
        format!("{:.prec$}", self.longitude, prec = LABEL_PRECISION)
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self {
            latitude: geo_bounds::DEFAULT_LATITUDE,
            longitude: geo_bounds::DEFAULT_LONGITUDE,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Zoom level bounds (2 to 19).
pub mod zoom_bounds {
    /// Minimum zoom level (whole continents).
    pub const MIN: u8 = 2;
    /// Maximum zoom level (street detail, highest level served by most tile providers).
    pub const MAX: u8 = 19;
    /// Default zoom level (city).
    pub const DEFAULT: u8 = 12;
}

// =============================================================================
// ZoomLevel
// =============================================================================

/// Slippy-map zoom level, guaranteed to be within the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// Creates a new zoom level, clamping to the valid range.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
    }

    /// Returns the raw level.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns whether the zoom is at the minimum level.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    /// Returns whether the zoom is at the maximum level.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }

    /// One level closer.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One level further away.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT)
    }
}

// =============================================================================
// Credential
// =============================================================================

/// A map access token typed in by the user.
///
/// Never empty or blank. It lives in memory only: there is no `Display`
/// impl, no serialization, and `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Parses raw user input, trimming surrounding whitespace.
    ///
    /// Returns `None` for empty or blank input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the secret value, for building provider requests only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the length of the secret in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_accepts_valid_coordinates() {
        let point = GeoPoint::new(40.75, -73.99).expect("valid point");
        assert_eq!(point.latitude(), 40.75);
        assert_eq!(point.longitude(), -73.99);
    }

    #[test]
    fn geo_point_accepts_exact_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn geo_point_rejects_out_of_range_values() {
        assert_eq!(
            GeoPoint::new(90.1, 0.0),
            Err(CoordinateError::LatitudeOutOfRange)
        );
        assert_eq!(
            GeoPoint::new(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange)
        );
    }

    #[test]
    fn geo_point_rejects_non_finite_values() {
        assert_eq!(GeoPoint::new(f64::NAN, 0.0), Err(CoordinateError::NotFinite));
        assert_eq!(
            GeoPoint::new(0.0, f64::INFINITY),
            Err(CoordinateError::NotFinite)
        );
    }

    #[test]
    fn geo_point_label_rounds_to_four_decimals() {
        let point = GeoPoint::new(40.75, -73.99).expect("valid point");
        assert_eq!(point.label(), "40.7500, -73.9900");

        let precise = GeoPoint::new(40.712_849_9, -74.005_950_1).expect("valid point");
        assert_eq!(precise.label(), "40.7128, -74.0060");
    }

    #[test]
    fn geo_point_clamped_keeps_invariant() {
        let point = GeoPoint::clamped(120.0, -500.0);
        assert_eq!(point.latitude(), 90.0);
        assert_eq!(point.longitude(), -180.0);
    }

    #[test]
    fn default_center_is_new_york() {
        let center = GeoPoint::default();
        assert_eq!(center.label(), "40.7128, -74.0060");
    }

    #[test]
    fn zoom_level_clamps_to_valid_range() {
        assert_eq!(ZoomLevel::new(0).value(), zoom_bounds::MIN);
        assert_eq!(ZoomLevel::new(200).value(), zoom_bounds::MAX);
        assert_eq!(ZoomLevel::new(12).value(), 12);
    }

    #[test]
    fn zoom_level_steps_stop_at_bounds() {
        let max = ZoomLevel::new(zoom_bounds::MAX);
        assert!(max.is_max());
        assert_eq!(max.zoom_in(), max);

        let min = ZoomLevel::new(zoom_bounds::MIN);
        assert!(min.is_min());
        assert_eq!(min.zoom_out(), min);

        assert_eq!(ZoomLevel::default().zoom_in().value(), zoom_bounds::DEFAULT + 1);
    }

    #[test]
    fn credential_rejects_blank_input() {
        assert!(Credential::parse("").is_none());
        assert!(Credential::parse("   \t\n").is_none());
    }

    #[test]
    fn credential_trims_surrounding_whitespace() {
        let credential = Credential::parse("  valid-token-123 ").expect("credential");
        assert_eq!(credential.expose(), "valid-token-123");
        assert_eq!(credential.len(), 15);
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::parse("pk.secret").expect("credential");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("redacted"));
    }
}
