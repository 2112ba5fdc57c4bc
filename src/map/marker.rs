// SPDX-License-Identifier: MPL-2.0
//! Single-marker bookkeeping for the location picker.

use crate::domain::geo::GeoPoint;

/// Identifier of a marker, unique within one [`MarkerManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(u64);

/// The visual pin drawn at the selected point.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    id: MarkerId,
    point: GeoPoint,
    label: String,
}

impl MarkerHandle {
    #[must_use]
    pub fn id(&self) -> MarkerId {
        self.id
    }

    #[must_use]
    pub fn point(&self) -> GeoPoint {
        self.point
    }

    /// Coordinates rounded to four decimals.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Owns at most one live marker.
#[derive(Debug, Default)]
pub struct MarkerManager {
    current: Option<MarkerHandle>,
    next_id: u64,
    disposed: u64,
}

impl MarkerManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current marker with one at `point`.
    ///
    /// The previous marker is disposed before the new one is created, so
    /// no caller ever observes two live markers.
    pub fn place(&mut self, point: GeoPoint) -> &MarkerHandle {
        self.clear();
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.current.insert(MarkerHandle {
            id,
            point,
            label: point.label(),
        })
    }

    /// Disposes the current marker, if any. Returns whether one was removed.
    pub fn clear(&mut self) -> bool {
        if self.current.take().is_some() {
            self.disposed += 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&MarkerHandle> {
        self.current.as_ref()
    }

    /// Number of live markers: 0 or 1.
    #[must_use]
    pub fn live_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    /// Markers disposed so far.
    #[must_use]
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}
