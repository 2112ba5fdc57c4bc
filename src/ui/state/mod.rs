// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! This module contains pointer state logic separated from the widgets that
//! draw, following the principle of separation of concerns.

pub mod drag;

pub use drag::DragState;
