// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Map(MapError),
}

/// Specific error types for the map location picker.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Activation attempted with an empty or blank credential
    CredentialMissing,

    /// Credential has characters or a length no provider accepts
    CredentialMalformed,

    /// Provider refused the credential (HTTP 401/403)
    CredentialRejected,

    /// Provider could not be reached or answered with an error
    ProviderUnavailable(String),

    /// Map container has no usable size
    ContainerUnavailable,

    /// A single tile could not be downloaded or decoded
    TileFetch(String),
}

impl MapError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MapError::CredentialMissing => "error-map-credential-missing",
            MapError::CredentialMalformed => "error-map-credential-malformed",
            MapError::CredentialRejected => "error-map-credential-rejected",
            MapError::ProviderUnavailable(_) => "error-map-provider-unavailable",
            MapError::ContainerUnavailable => "error-map-container-unavailable",
            MapError::TileFetch(_) => "error-map-tile-fetch",
        }
    }

    /// Whether this error happened while unlocking the map.
    pub fn is_activation_failure(&self) -> bool {
        matches!(
            self,
            MapError::CredentialMissing
                | MapError::CredentialMalformed
                | MapError::CredentialRejected
                | MapError::ProviderUnavailable(_)
        )
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::CredentialMissing => write!(f, "No map credential provided"),
            MapError::CredentialMalformed => write!(f, "Map credential is malformed"),
            MapError::CredentialRejected => write!(f, "Map credential was rejected"),
            MapError::ProviderUnavailable(msg) => write!(f, "Map provider unavailable: {}", msg),
            MapError::ContainerUnavailable => write!(f, "Map container has no usable size"),
            MapError::TileFetch(msg) => write!(f, "Tile download failed: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Map(e) => write!(f, "Map Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MapError> for Error {
    fn from(err: MapError) -> Self {
        Error::Map(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
