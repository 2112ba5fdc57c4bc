// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`listing_form`] - "List a space" form hosting the picker modal
//! - [`location_picker`] - Credential gate, map canvas, marker and selection
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Reusable interaction state (press/drag tracking)
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`notifications`] - Toast notification system for user feedback

pub mod design_tokens;
pub mod listing_form;
pub mod location_picker;
pub mod notifications;
pub mod state;
pub mod styles;
pub mod theming;
