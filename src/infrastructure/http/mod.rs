// SPDX-License-Identifier: MPL-2.0
//! HTTP tile download adapter.
//!
//! Implements [`TileFetcher`] with a shared `reqwest` client. Error messages
//! are built without the request URL, which may carry an access token.

use crate::application::port::{TileBytes, TileFetcher};
use crate::error::MapError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::StatusCode;
use std::time::Duration;

/// User agent sent with every tile request. Public tile servers refuse
/// anonymous clients.
pub const USER_AGENT: &str = concat!("IcedParking/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads tiles over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpTileFetcher {
    client: reqwest::Client,
}

impl HttpTileFetcher {
    /// Builds the client with an explicit redirect policy, user agent and timeout.
    pub fn new() -> Result<Self, MapError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MapError::ProviderUnavailable(e.without_url().to_string()))?;
        Ok(Self { client })
    }
}

impl TileFetcher for HttpTileFetcher {
    fn fetch(&self, url: String) -> BoxFuture<'static, Result<TileBytes, MapError>> {
        let client = self.client.clone();
        async move {
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| MapError::ProviderUnavailable(e.without_url().to_string()))?;

            classify_status(response.status())?;

            let bytes = response
                .bytes()
                .await
                .map_err(|e| MapError::ProviderUnavailable(e.without_url().to_string()))?;
            Ok(bytes.to_vec())
        }
        .boxed()
    }
}

/// Maps an HTTP status to the picker's error taxonomy.
pub fn classify_status(status: StatusCode) -> Result<(), MapError> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(MapError::CredentialRejected),
        other => Err(MapError::ProviderUnavailable(format!("HTTP status: {other}"))),
    }
}

/// Fetcher used when no HTTP client could be built. Every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTileFetcher;

impl TileFetcher for OfflineTileFetcher {
    fn fetch(&self, _url: String) -> BoxFuture<'static, Result<TileBytes, MapError>> {
        async { Err(MapError::ProviderUnavailable("offline".to_string())) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_pass() {
        assert!(classify_status(StatusCode::OK).is_ok());
        assert!(classify_status(StatusCode::NO_CONTENT).is_ok());
    }

    #[test]
    fn auth_statuses_reject_credential() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED),
            Err(MapError::CredentialRejected)
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN),
            Err(MapError::CredentialRejected)
        );
    }

    #[test]
    fn other_failures_mean_provider_unavailable() {
        match classify_status(StatusCode::SERVICE_UNAVAILABLE) {
            Err(MapError::ProviderUnavailable(msg)) => assert!(msg.contains("503")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND),
            Err(MapError::ProviderUnavailable(_))
        ));
    }

    #[test]
    fn user_agent_names_the_application() {
        assert!(USER_AGENT.starts_with("IcedParking/"));
    }

    #[test]
    fn http_fetcher_builds() {
        assert!(HttpTileFetcher::new().is_ok());
    }

    #[tokio::test]
    async fn offline_fetcher_always_fails() {
        let result = OfflineTileFetcher.fetch("https://tiles.test/1/0/0.png".into()).await;
        assert!(matches!(result, Err(MapError::ProviderUnavailable(_))));
    }
}
