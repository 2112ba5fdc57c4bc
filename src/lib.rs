// SPDX-License-Identifier: MPL-2.0
//! `iced_parking` is a parking-space listing prototype built with the Iced GUI
//! framework.
//!
//! Its centerpiece is an interactive map location picker: an optional
//! credential gate in front of a slippy map, click-to-select with a single
//! marker, and a selection event reported to the embedding listing form.
//! Localization uses Fluent and preferences live in `settings.toml`.

#![doc(html_root_url = "https://docs.rs/iced_parking/0.1.0")]

pub mod app;
pub mod application;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod map;
pub mod ui;

pub use app::config;

#[cfg(test)]
pub(crate) mod test_utils;
