// SPDX-License-Identifier: MPL-2.0
//! The map surface bound to the picker's container.
//!
//! [`MapView`] holds the camera (center, zoom, viewport size) and converts
//! between screen positions and geographic points. [`MapSurface`] owns one
//! view, the tile source it was unlocked with and the decoded tile cache.

use super::projection::{self, WorldPoint, TILE_SIZE};
use super::tiles::{PlacedTile, TileCache, TileId, TileSource};
use crate::application::port::TileBytes;
use crate::domain::geo::{GeoPoint, ZoomLevel};
use crate::error::MapError;
use iced::widget::image;
use iced::{Point, Size, Vector};

/// Camera over the Mercator world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    center: GeoPoint,
    zoom: ZoomLevel,
    viewport: Size,
}

impl MapView {
    #[must_use]
    pub fn new(center: GeoPoint, zoom: ZoomLevel, viewport: Size) -> Self {
        Self {
            center,
            zoom,
            viewport,
        }
    }

    #[must_use]
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn with_viewport(self, viewport: Size) -> Self {
        Self { viewport, ..self }
    }

    fn center_world(&self) -> WorldPoint {
        projection::project(self.center, self.zoom)
    }

    fn offset_from_center(&self, position: Point) -> (f64, f64) {
        (
            f64::from(position.x) - f64::from(self.viewport.width) / 2.0,
            f64::from(position.y) - f64::from(self.viewport.height) / 2.0,
        )
    }

    /// Geographic point under a viewport-relative position.
    #[must_use]
    pub fn geo_at(&self, position: Point) -> GeoPoint {
        let center = self.center_world();
        let (dx, dy) = self.offset_from_center(position);
        projection::unproject(
            WorldPoint {
                x: center.x + dx,
                y: center.y + dy,
            },
            self.zoom,
        )
    }

    /// Viewport-relative position of a geographic point.
    ///
    /// The horizontal offset takes the shortest way around the antimeridian.
    #[must_use]
    pub fn screen_position(&self, point: GeoPoint) -> Point {
        let size = projection::world_size(self.zoom);
        let center = self.center_world();
        let world = projection::project(point, self.zoom);

        let mut dx = world.x - center.x;
        if dx > size / 2.0 {
            dx -= size;
        } else if dx < -size / 2.0 {
            dx += size;
        }
        let dy = world.y - center.y;

        Point::new(
            (f64::from(self.viewport.width) / 2.0 + dx) as f32,
            (f64::from(self.viewport.height) / 2.0 + dy) as f32,
        )
    }

    /// Moves the camera so the content follows a drag of `delta` pixels.
    #[must_use]
    pub fn panned(self, delta: Vector) -> Self {
        let center = self.center_world();
        let world = WorldPoint {
            x: center.x - f64::from(delta.x),
            y: center.y - f64::from(delta.y),
        };
        Self {
            center: projection::unproject(world, self.zoom),
            ..self
        }
    }

    /// Changes zoom while keeping the point under `anchor` fixed on screen.
    #[must_use]
    pub fn zoomed_around(self, anchor: Point, zoom: ZoomLevel) -> Self {
        if zoom == self.zoom {
            return self;
        }
        let pinned = self.geo_at(anchor);
        let pinned_world = projection::project(pinned, zoom);
        let (dx, dy) = self.offset_from_center(anchor);
        let center = projection::unproject(
            WorldPoint {
                x: pinned_world.x - dx,
                y: pinned_world.y - dy,
            },
            zoom,
        );
        Self {
            center,
            zoom,
            ..self
        }
    }

    /// Tiles covering the viewport, with their on-screen origins.
    #[must_use]
    pub fn visible_tiles(&self) -> Vec<PlacedTile> {
        let center = self.center_world();
        let left = center.x - f64::from(self.viewport.width) / 2.0;
        let top = center.y - f64::from(self.viewport.height) / 2.0;
        let right = left + f64::from(self.viewport.width);
        let bottom = top + f64::from(self.viewport.height);

        let first_col = (left / TILE_SIZE).floor() as i64;
        let last_col = (right / TILE_SIZE).ceil() as i64;
        let first_row = (top / TILE_SIZE).floor() as i64;
        let last_row = (bottom / TILE_SIZE).ceil() as i64;

        let mut tiles = Vec::new();
        for row in first_row..last_row {
            for col in first_col..last_col {
                if let Some(id) = TileId::wrapped(self.zoom, col, row) {
                    tiles.push(PlacedTile {
                        id,
                        origin: Point::new(
                            (col as f64 * TILE_SIZE - left) as f32,
                            (row as f64 * TILE_SIZE - top) as f32,
                        ),
                    });
                }
            }
        }
        tiles
    }
}

/// One live map bound to a container.
///
/// Created once per mount by [`MapSurface::construct`] and consumed by
/// [`MapSurface::destroy`], so a destroyed surface cannot be used again.
pub struct MapSurface {
    view: MapView,
    home: (GeoPoint, ZoomLevel),
    source: TileSource,
    tiles: TileCache,
}

impl MapSurface {
    /// Binds a new surface to a container of the given size.
    ///
    /// Fails with [`MapError::ContainerUnavailable`] when the container has
    /// no positive width and height.
    pub fn construct(
        container: Size,
        source: TileSource,
        center: GeoPoint,
        zoom: ZoomLevel,
        cache_capacity: usize,
    ) -> Result<Self, MapError> {
        if !is_usable(container) {
            return Err(MapError::ContainerUnavailable);
        }
        Ok(Self {
            view: MapView::new(center, zoom, container),
            home: (center, zoom),
            source,
            tiles: TileCache::new(cache_capacity),
        })
    }

    #[must_use]
    pub fn view(&self) -> &MapView {
        &self.view
    }

    #[must_use]
    pub fn source(&self) -> &TileSource {
        &self.source
    }

    #[must_use]
    pub fn tiles(&self) -> &TileCache {
        &self.tiles
    }

    /// Translates a click position into a geographic point.
    #[must_use]
    pub fn click_to_geo(&self, position: Point) -> GeoPoint {
        self.view.geo_at(position)
    }

    /// Follows the container size. Degenerate sizes are ignored.
    pub fn resize(&mut self, container: Size) {
        if is_usable(container) {
            self.view = self.view.with_viewport(container);
        }
    }

    pub fn pan_by(&mut self, delta: Vector) {
        self.view = self.view.panned(delta);
    }

    pub fn zoom_around(&mut self, anchor: Point, zoom: ZoomLevel) {
        self.view = self.view.zoomed_around(anchor, zoom);
    }

    /// Zooms by one level around the viewport center.
    pub fn zoom_step(&mut self, zoom_in: bool) {
        let zoom = if zoom_in {
            self.view.zoom().zoom_in()
        } else {
            self.view.zoom().zoom_out()
        };
        let viewport = self.view.viewport();
        let anchor = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.zoom_around(anchor, zoom);
    }

    /// Returns to the center and zoom the surface was constructed with.
    pub fn recenter(&mut self) {
        let (center, zoom) = self.home;
        self.view = MapView::new(center, zoom, self.view.viewport());
    }

    /// Visible tiles that are neither loaded, pending nor failed, with
    /// their download URLs. They are marked pending.
    pub fn request_missing_tiles(&mut self) -> Vec<(TileId, String)> {
        let mut requests = Vec::new();
        for placed in self.view.visible_tiles() {
            if self.tiles.begin_request(placed.id) {
                requests.push((placed.id, self.source.url(placed.id)));
            }
        }
        requests
    }

    /// Stores a downloaded tile. Returns the error the first time a tile fails.
    ///
    /// Tiles on screen are marked as used first, so a late completion from
    /// an earlier view evicts off-screen tiles instead.
    pub fn tile_loaded(
        &mut self,
        tile: TileId,
        result: Result<TileBytes, MapError>,
    ) -> Option<MapError> {
        for placed in self.view.visible_tiles() {
            self.tiles.touch(&placed.id);
        }

        let decoded = result.and_then(|bytes| {
            if bytes.is_empty() {
                Err(MapError::TileFetch("empty response".to_string()))
            } else {
                Ok(image::Handle::from_bytes(bytes))
            }
        });
        let decoded = decoded.map_err(|err| match err {
            MapError::TileFetch(msg) => MapError::TileFetch(msg),
            other => MapError::TileFetch(other.to_string()),
        });
        self.tiles.complete(tile, decoded)
    }

    /// Tears the surface down, releasing every cached tile.
    pub fn destroy(mut self) {
        self.tiles.clear();
    }
}

fn is_usable(container: Size) -> bool {
    container.width.is_finite()
        && container.height.is_finite()
        && container.width > 0.0
        && container.height > 0.0
}
