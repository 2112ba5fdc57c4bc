// SPDX-License-Identifier: MPL-2.0
//! Raster tile addressing, URL templates and the per-surface tile cache.

use super::provider::ProviderKind;
use crate::domain::geo::{Credential, ZoomLevel};
use crate::error::MapError;
use iced::widget::image;
use iced::Point;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Default number of decoded tiles kept per map surface.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Address of one slippy-map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// The single tile covering the whole world at zoom 0.
    pub const ROOT: TileId = TileId { z: 0, x: 0, y: 0 };

    /// Builds a tile address from unbounded grid indices.
    ///
    /// Columns wrap around the antimeridian. Rows outside the world square
    /// have no tile and return `None`.
    #[must_use]
    pub fn wrapped(zoom: ZoomLevel, x: i64, y: i64) -> Option<Self> {
        let count = 1i64 << zoom.value();
        if !(0..count).contains(&y) {
            return None;
        }
        let x = x.rem_euclid(count);
        Some(Self {
            z: zoom.value(),
            x: u32::try_from(x).ok()?,
            y: u32::try_from(y).ok()?,
        })
    }
}

/// A visible tile and where its top-left corner lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub id: TileId,
    pub origin: Point,
}

/// Where tiles come from: a URL template plus the credential it needs.
///
/// Templates use `{z}`, `{x}`, `{y}` and, for gated providers, `{token}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    kind: ProviderKind,
    template: String,
    credential: Option<Credential>,
}

impl TileSource {
    #[must_use]
    pub fn new(kind: ProviderKind, template: impl Into<String>, credential: Option<Credential>) -> Self {
        Self {
            kind,
            template: template.into(),
            credential,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Attribution line the tile provider's terms require.
    #[must_use]
    pub fn attribution(&self) -> &'static str {
        self.kind.attribution()
    }

    /// Expands the template for `tile`.
    ///
    /// The result may contain the credential and must not be logged.
    #[must_use]
    pub fn url(&self, tile: TileId) -> String {
        let token = self.credential.as_ref().map_or("", Credential::expose);
        self.template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
            .replace("{token}", token)
    }
}

/// Decoded tiles for one map surface.
///
/// A tile is requested at most once while pending. Failed tiles are
/// remembered and never requested again for the life of the cache.
pub struct TileCache {
    loaded: LruCache<TileId, image::Handle>,
    pending: HashSet<TileId>,
    failed: HashSet<TileId>,
}

impl TileCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            loaded: LruCache::new(capacity),
            pending: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Marks `tile` as pending and returns whether the caller should fetch it.
    ///
    /// A tile that is already loaded is marked as recently used instead.
    pub fn begin_request(&mut self, tile: TileId) -> bool {
        if self.loaded.contains(&tile) {
            self.loaded.promote(&tile);
            return false;
        }
        if self.failed.contains(&tile) {
            return false;
        }
        self.pending.insert(tile)
    }

    /// Records the outcome of a fetch.
    ///
    /// Returns the error when this completion marked the tile as failed, so
    /// the caller can report it once.
    pub fn complete(
        &mut self,
        tile: TileId,
        result: Result<image::Handle, MapError>,
    ) -> Option<MapError> {
        if !self.pending.remove(&tile) {
            return None;
        }
        match result {
            Ok(handle) => {
                self.loaded.put(tile, handle);
                None
            }
            Err(err) => {
                self.failed.insert(tile);
                Some(err)
            }
        }
    }

    /// Returns a decoded tile without touching the LRU order.
    #[must_use]
    pub fn peek(&self, tile: &TileId) -> Option<&image::Handle> {
        self.loaded.peek(tile)
    }

    /// Marks a loaded tile as recently used.
    pub fn touch(&mut self, tile: &TileId) {
        self.loaded.promote(tile);
    }

    #[must_use]
    pub fn is_pending(&self, tile: &TileId) -> bool {
        self.pending.contains(tile)
    }

    #[must_use]
    pub fn is_failed(&self, tile: &TileId) -> bool {
        self.failed.contains(tile)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    pub fn clear(&mut self) {
        self.loaded.clear();
        self.pending.clear();
        self.failed.clear();
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: u32, y: u32) -> TileId {
        TileId { z: 3, x, y }
    }

    fn handle() -> image::Handle {
        image::Handle::from_bytes(vec![0u8; 4])
    }

    #[test]
    fn wrapped_tile_columns_wrap_around() {
        let zoom = ZoomLevel::new(2);
        assert_eq!(
            TileId::wrapped(zoom, -1, 1),
            Some(TileId { z: 2, x: 3, y: 1 })
        );
        assert_eq!(
            TileId::wrapped(zoom, 4, 0),
            Some(TileId { z: 2, x: 0, y: 0 })
        );
    }

    #[test]
    fn wrapped_tile_rows_outside_world_are_none() {
        let zoom = ZoomLevel::new(2);
        assert_eq!(TileId::wrapped(zoom, 0, -1), None);
        assert_eq!(TileId::wrapped(zoom, 0, 4), None);
    }

    #[test]
    fn open_source_url_expands_template() {
        let source = TileSource::new(
            ProviderKind::OpenTiles,
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            None,
        );
        assert_eq!(
            source.url(TileId { z: 12, x: 1205, y: 1539 }),
            "https://tile.openstreetmap.org/12/1205/1539.png"
        );
    }

    #[test]
    fn gated_source_url_embeds_credential() {
        let credential = Credential::parse("valid-token-123");
        let source = TileSource::new(
            ProviderKind::TokenGated,
            "https://tiles.test/{z}/{x}/{y}?access_token={token}",
            credential,
        );
        assert_eq!(
            source.url(TileId::ROOT),
            "https://tiles.test/0/0/0?access_token=valid-token-123"
        );
    }

    #[test]
    fn source_debug_does_not_leak_credential() {
        let source = TileSource::new(
            ProviderKind::TokenGated,
            "https://tiles.test/{z}/{x}/{y}?access_token={token}",
            Credential::parse("pk.secret"),
        );
        assert!(!format!("{source:?}").contains("pk.secret"));
    }

    #[test]
    fn tile_is_requested_once_while_pending() {
        let mut cache = TileCache::new(8);
        assert!(cache.begin_request(tile(1, 1)));
        assert!(!cache.begin_request(tile(1, 1)));
        assert!(cache.is_pending(&tile(1, 1)));
    }

    #[test]
    fn loaded_tile_is_not_requested_again() {
        let mut cache = TileCache::new(8);
        cache.begin_request(tile(1, 1));
        assert!(cache.complete(tile(1, 1), Ok(handle())).is_none());
        assert!(cache.peek(&tile(1, 1)).is_some());
        assert!(!cache.begin_request(tile(1, 1)));
    }

    #[test]
    fn failed_tile_is_reported_once_and_never_retried() {
        let mut cache = TileCache::new(8);
        cache.begin_request(tile(2, 2));
        let err = cache.complete(tile(2, 2), Err(MapError::TileFetch("404".into())));
        assert_eq!(err, Some(MapError::TileFetch("404".into())));
        assert!(cache.is_failed(&tile(2, 2)));
        assert!(!cache.begin_request(tile(2, 2)));

        // A duplicate completion is ignored
        assert!(cache
            .complete(tile(2, 2), Err(MapError::TileFetch("404".into())))
            .is_none());
    }

    #[test]
    fn unexpected_completion_is_ignored() {
        let mut cache = TileCache::new(8);
        assert!(cache.complete(tile(0, 0), Ok(handle())).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_evicts_least_recently_used() {
        let mut cache = TileCache::new(2);
        for x in 0..3 {
            cache.begin_request(tile(x, 0));
            cache.complete(tile(x, 0), Ok(handle()));
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.peek(&tile(0, 0)).is_none());
        assert!(cache.peek(&tile(2, 0)).is_some());
    }

    #[test]
    fn requesting_a_loaded_tile_keeps_it_alive() {
        let mut cache = TileCache::new(2);
        for x in 0..2 {
            cache.begin_request(tile(x, 0));
            cache.complete(tile(x, 0), Ok(handle()));
        }
        assert!(!cache.begin_request(tile(0, 0)));

        cache.begin_request(tile(2, 0));
        cache.complete(tile(2, 0), Ok(handle()));
        assert!(cache.peek(&tile(0, 0)).is_some());
        assert!(cache.peek(&tile(1, 0)).is_none());
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut cache = TileCache::new(0);
        cache.begin_request(tile(0, 0));
        cache.complete(tile(0, 0), Ok(handle()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = TileCache::new(4);
        cache.begin_request(tile(0, 0));
        cache.begin_request(tile(1, 0));
        cache.complete(tile(0, 0), Err(MapError::TileFetch("x".into())));
        cache.clear();
        assert!(!cache.is_failed(&tile(0, 0)));
        assert!(!cache.is_pending(&tile(1, 0)));
        assert!(cache.begin_request(tile(0, 0)));
    }
}
