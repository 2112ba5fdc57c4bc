// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like the
//! HTTP client.
//!
//! # Available Adapters
//!
//! - [`http`]: Tile downloads via `reqwest` (implements [`TileFetcher`])
//!
//! [`TileFetcher`]: crate::application::port::TileFetcher

pub mod http;

// Re-export main types for convenience
pub use http::{HttpTileFetcher, OfflineTileFetcher};
