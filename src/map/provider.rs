// SPDX-License-Identifier: MPL-2.0
//! Map tile providers and credential acquisition.
//!
//! Two providers exist:
//! - [`OpenTileProvider`]: free tiles, no credential, the map is usable immediately
//! - [`TokenGatedProvider`]: commercial tiles unlocked by a user-supplied access token

use super::tiles::{TileId, TileSource};
use crate::application::port::TileFetcher;
use crate::domain::geo::Credential;
use crate::error::MapError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Default URL template of the free tile server.
pub const DEFAULT_OPEN_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Default URL template of the token-gated tile server.
pub const DEFAULT_TOKEN_TILE_URL: &str =
    "https://api.mapbox.com/styles/v1/mapbox/streets-v12/tiles/256/{z}/{x}/{y}?access_token={token}";

/// Longest credential accepted before any network round-trip.
pub const MAX_CREDENTIAL_LEN: usize = 512;

/// Which tile provider backs the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// OpenStreetMap-style tiles, no credential.
    #[default]
    OpenTiles,
    /// Tiles served only with an access token.
    TokenGated,
}

impl ProviderKind {
    #[must_use]
    pub fn requires_credential(self) -> bool {
        matches!(self, ProviderKind::TokenGated)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::OpenTiles => "open-tiles",
            ProviderKind::TokenGated => "token-gated",
        }
    }

    /// Attribution the provider's terms of use require on the map.
    #[must_use]
    pub fn attribution(self) -> &'static str {
        match self {
            ProviderKind::OpenTiles => "© OpenStreetMap contributors",
            ProviderKind::TokenGated => "© Mapbox © OpenStreetMap",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open-tiles" | "open" | "osm" => Ok(ProviderKind::OpenTiles),
            "token-gated" | "token" | "mapbox" => Ok(ProviderKind::TokenGated),
            other => Err(format!("unknown map provider: {other}")),
        }
    }
}

/// A source of map tiles the picker can bind a surface to.
pub trait MapProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Whether the activation gate must collect a credential first.
    fn requires_credential(&self) -> bool {
        self.kind().requires_credential()
    }

    /// Tile source usable without any activation step.
    fn immediate_source(&self) -> Option<TileSource>;

    /// Validates `credential` with the provider and yields a tile source.
    fn acquire(&self, credential: Credential) -> BoxFuture<'static, Result<TileSource, MapError>>;
}

/// Free tiles: the activation gate is a pass-through.
#[derive(Debug, Clone)]
pub struct OpenTileProvider {
    template: String,
}

impl OpenTileProvider {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    fn source(&self) -> TileSource {
        TileSource::new(ProviderKind::OpenTiles, self.template.clone(), None)
    }
}

impl Default for OpenTileProvider {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_TILE_URL)
    }
}

impl MapProvider for OpenTileProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenTiles
    }

    fn immediate_source(&self) -> Option<TileSource> {
        Some(self.source())
    }

    fn acquire(&self, _credential: Credential) -> BoxFuture<'static, Result<TileSource, MapError>> {
        let source = self.source();
        async move { Ok(source) }.boxed()
    }
}

/// Commercial tiles unlocked by an access token.
///
/// Acquisition checks the token's shape locally, then probes the root tile
/// so a rejected token is reported before the map is shown.
pub struct TokenGatedProvider {
    template: String,
    fetcher: Arc<dyn TileFetcher>,
}

impl TokenGatedProvider {
    #[must_use]
    pub fn new(template: impl Into<String>, fetcher: Arc<dyn TileFetcher>) -> Self {
        Self {
            template: template.into(),
            fetcher,
        }
    }
}

impl MapProvider for TokenGatedProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::TokenGated
    }

    fn immediate_source(&self) -> Option<TileSource> {
        None
    }

    fn acquire(&self, credential: Credential) -> BoxFuture<'static, Result<TileSource, MapError>> {
        let fetcher = Arc::clone(&self.fetcher);
        let template = self.template.clone();
        async move {
            validate_shape(&credential)?;
            let source = TileSource::new(ProviderKind::TokenGated, template, Some(credential));
            fetcher.fetch(source.url(TileId::ROOT)).await?;
            Ok(source)
        }
        .boxed()
    }
}

/// Rejects tokens no provider would accept: whitespace, control or
/// non-ASCII characters, or excessive length.
pub fn validate_shape(credential: &Credential) -> Result<(), MapError> {
    let raw = credential.expose();
    if raw.len() > MAX_CREDENTIAL_LEN || !raw.chars().all(|c| c.is_ascii_graphic()) {
        return Err(MapError::CredentialMalformed);
    }
    Ok(())
}

/// Builds the provider selected in configuration.
#[must_use]
pub fn build_provider(
    kind: ProviderKind,
    open_template: &str,
    token_template: &str,
    fetcher: Arc<dyn TileFetcher>,
) -> Arc<dyn MapProvider> {
    match kind {
        ProviderKind::OpenTiles => Arc::new(OpenTileProvider::new(open_template)),
        ProviderKind::TokenGated => Arc::new(TokenGatedProvider::new(token_template, fetcher)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::TileBytes;
    use std::sync::Mutex;

    /// Records requested URLs and answers with a fixed result.
    struct RecordingFetcher {
        result: Result<TileBytes, MapError>,
        urls: Mutex<Vec<String>>,
    }

    impl RecordingFetcher {
        fn new(result: Result<TileBytes, MapError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                urls: Mutex::new(Vec::new()),
            })
        }
    }

    impl TileFetcher for RecordingFetcher {
        fn fetch(&self, url: String) -> BoxFuture<'static, Result<TileBytes, MapError>> {
            self.urls.lock().expect("lock").push(url);
            let result = self.result.clone();
            async move { result }.boxed()
        }
    }

    const TEMPLATE: &str = "https://tiles.test/{z}/{x}/{y}?access_token={token}";

    #[test]
    fn provider_kind_parses_aliases() {
        assert_eq!("open-tiles".parse::<ProviderKind>(), Ok(ProviderKind::OpenTiles));
        assert_eq!("OSM".parse::<ProviderKind>(), Ok(ProviderKind::OpenTiles));
        assert_eq!(" token-gated ".parse::<ProviderKind>(), Ok(ProviderKind::TokenGated));
        assert!("carrier-pigeon".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn only_token_gated_requires_credential() {
        assert!(!ProviderKind::OpenTiles.requires_credential());
        assert!(ProviderKind::TokenGated.requires_credential());
    }

    #[test]
    fn provider_kind_serializes_kebab_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            provider: ProviderKind,
        }
        let toml = toml::to_string(&Wrapper {
            provider: ProviderKind::TokenGated,
        })
        .expect("serialize");
        assert!(toml.contains("\"token-gated\""));
        let back: Wrapper = toml::from_str("provider = \"open-tiles\"").expect("deserialize");
        assert_eq!(back.provider, ProviderKind::OpenTiles);
    }

    #[test]
    fn open_provider_is_immediately_usable() {
        let provider = OpenTileProvider::default();
        assert!(!provider.requires_credential());
        let source = provider.immediate_source().expect("immediate source");
        assert_eq!(source.kind(), ProviderKind::OpenTiles);
    }

    #[test]
    fn gated_provider_has_no_immediate_source() {
        let provider = TokenGatedProvider::new(TEMPLATE, RecordingFetcher::new(Ok(vec![])));
        assert!(provider.requires_credential());
        assert!(provider.immediate_source().is_none());
    }

    #[tokio::test]
    async fn gated_acquire_probes_root_tile() {
        let fetcher = RecordingFetcher::new(Ok(vec![0x89, 0x50]));
        let provider = TokenGatedProvider::new(TEMPLATE, fetcher.clone());
        let credential = Credential::parse("valid-token-123").expect("credential");

        let source = provider.acquire(credential).await.expect("acquired");
        assert_eq!(source.kind(), ProviderKind::TokenGated);

        let urls = fetcher.urls.lock().expect("lock");
        assert_eq!(
            urls.as_slice(),
            ["https://tiles.test/0/0/0?access_token=valid-token-123"]
        );
    }

    #[tokio::test]
    async fn gated_acquire_reports_rejection() {
        let fetcher = RecordingFetcher::new(Err(MapError::CredentialRejected));
        let provider = TokenGatedProvider::new(TEMPLATE, fetcher);
        let credential = Credential::parse("revoked").expect("credential");
        assert_eq!(
            provider.acquire(credential).await,
            Err(MapError::CredentialRejected)
        );
    }

    #[tokio::test]
    async fn malformed_credential_skips_network() {
        let fetcher = RecordingFetcher::new(Ok(vec![]));
        let provider = TokenGatedProvider::new(TEMPLATE, fetcher.clone());
        let credential = Credential::parse("two words").expect("credential");

        assert_eq!(
            provider.acquire(credential).await,
            Err(MapError::CredentialMalformed)
        );
        assert!(fetcher.urls.lock().expect("lock").is_empty());
    }

    #[test]
    fn shape_check_limits_length() {
        let long = "a".repeat(MAX_CREDENTIAL_LEN + 1);
        let credential = Credential::parse(&long).expect("credential");
        assert_eq!(validate_shape(&credential), Err(MapError::CredentialMalformed));

        let ok = Credential::parse("pk.eyJ1Ijoi.abc-123_x").expect("credential");
        assert!(validate_shape(&ok).is_ok());
    }

    #[test]
    fn build_provider_honors_kind() {
        let fetcher: Arc<dyn TileFetcher> = RecordingFetcher::new(Ok(vec![]));
        let open = build_provider(
            ProviderKind::OpenTiles,
            DEFAULT_OPEN_TILE_URL,
            DEFAULT_TOKEN_TILE_URL,
            fetcher.clone(),
        );
        assert_eq!(open.kind(), ProviderKind::OpenTiles);

        let gated = build_provider(
            ProviderKind::TokenGated,
            DEFAULT_OPEN_TILE_URL,
            DEFAULT_TOKEN_TILE_URL,
            fetcher,
        );
        assert_eq!(gated.kind(), ProviderKind::TokenGated);
    }
}
