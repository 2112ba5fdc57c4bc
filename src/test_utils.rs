// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for unit tests.
//!
//! Geographic values go through floating-point projection math, so tests
//! compare them with `approx` instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;

/// Tolerance for coordinates that should survive a projection round trip
/// unchanged, in degrees.
pub const COORD_EPSILON: f64 = 1e-9;
