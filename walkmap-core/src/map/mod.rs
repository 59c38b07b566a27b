//! Map surfaces and the overlays drawn on them.

use crate::entities::geo::{MapBbox, MapPoint};

mod handle;
pub mod memory;

pub use self::handle::*;

pub const DEFAULT_CENTER: MapPoint = MapPoint::from_lat_lng_deg(43.604_652, 1.444_209);
pub const DEFAULT_ZOOM: f64 = 12.0;
pub const DEFAULT_RECENTER_ZOOM: f64 = 15.0;
pub const DEFAULT_MAX_ZOOM: u8 = 18;
pub const TILE_LAYER_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const MAP_ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Search,
    RouteStart,
    RouteEnd,
    LivePosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayerOptions {
    /// Templated by `{s}`, `{z}`, `{x}` and `{y}`.
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: TILE_LAYER_URL.to_string(),
            attribution: MAP_ATTRIBUTION.to_string(),
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: MapPoint,
    pub zoom: f64,
    pub tile_layer: TileLayerOptions,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_layer: TileLayerOptions::default(),
        }
    }
}

/// An interactive map rendered into a view container.
///
/// Markers and polylines are identified by the handles
/// returned when adding them.
pub trait MapSurface {
    type Marker;
    type Polyline;

    fn add_tile_layer(&mut self, options: &TileLayerOptions);

    /// The current zoom level, if the view has been set up already.
    fn zoom(&self) -> Option<f64>;
    fn set_view(&mut self, center: MapPoint, zoom: f64);
    /// Recalculate the rendered dimensions of the surface.
    fn invalidate_size(&mut self);
    fn fit_bounds(&mut self, bbox: &MapBbox);

    fn add_marker(&mut self, pos: MapPoint, kind: MarkerKind) -> Self::Marker;
    fn move_marker(&mut self, marker: &Self::Marker, pos: MapPoint);
    fn remove_marker(&mut self, marker: Self::Marker);

    fn add_polyline(&mut self, path: &[MapPoint]) -> Self::Polyline;
    fn remove_polyline(&mut self, polyline: Self::Polyline);

    /// Tear down the map and everything on it.
    fn remove(&mut self);
}

/// Creates map surfaces inside of view containers.
pub trait MapBackend {
    type Surface: MapSurface;

    fn container_exists(&self, container_id: &str) -> bool;
    fn create(&self, container_id: &str, options: &MapOptions) -> Self::Surface;
}
