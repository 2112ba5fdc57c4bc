// SPDX-License-Identifier: MPL-2.0
//! Tile download port definition.
//!
//! This module defines the [`TileFetcher`] trait used by map providers to
//! probe credentials and by the map surface to download raster tiles.

use crate::error::MapError;
use futures_util::future::BoxFuture;

/// Encoded image bytes of one raster tile (PNG or JPEG).
pub type TileBytes = Vec<u8>;

/// Trait for downloading map tiles.
///
/// Implementations must classify failures:
/// - HTTP 401/403 becomes [`MapError::CredentialRejected`]
/// - Other transport or status failures become [`MapError::ProviderUnavailable`]
///
/// The URL may embed a credential. Implementations must not log it.
pub trait TileFetcher: Send + Sync {
    /// Downloads the resource at `url`.
    fn fetch(&self, url: String) -> BoxFuture<'static, Result<TileBytes, MapError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    struct FixedFetcher(Result<TileBytes, MapError>);

    impl TileFetcher for FixedFetcher {
        fn fetch(&self, _url: String) -> BoxFuture<'static, Result<TileBytes, MapError>> {
            let result = self.0.clone();
            async move { result }.boxed()
        }
    }

    #[tokio::test]
    async fn trait_object_is_usable_across_tasks() {
        let fetcher: std::sync::Arc<dyn TileFetcher> =
            std::sync::Arc::new(FixedFetcher(Ok(vec![1, 2, 3])));
        let handle = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.fetch("https://tiles.test/0/0/0.png".into()).await }
        });
        let bytes = handle.await.expect("task joined").expect("bytes");
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
