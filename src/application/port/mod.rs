// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//!
//! # Available Ports
//!
//! - [`tiles`]: Raw map tile downloads
//!
//! # Design Notes
//!
//! - No Iced types cross the port: tiles come back as encoded bytes
//! - Traits are `Send + Sync` so they can be shared with background tasks
//! - Futures are boxed and `'static`; callers wrap them in an Iced `Task`

pub mod tiles;

// Re-export main types for convenience
pub use tiles::{TileBytes, TileFetcher};
