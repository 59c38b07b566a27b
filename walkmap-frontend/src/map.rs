//! Leaflet based map surface.

use js_sys::{Array, Object, Reflect};
use leaflet::{LatLng, LatLngBounds, Map, Marker, MarkerOptions, Polyline, TileLayer};
use wasm_bindgen::{JsCast, JsValue};
use walkmap_core::{
    entities::geo::{MapBbox, MapPoint},
    map::{MapBackend, MapOptions, MapSurface, MarkerKind, TileLayerOptions},
};

fn lat_lng(pos: MapPoint) -> LatLng {
    LatLng::new(pos.lat().to_deg(), pos.lng().to_deg())
}

/// Build a plain JS options object.
fn js_options<T: JsCast>(properties: &[(&str, JsValue)]) -> T {
    let obj = Object::new();
    for (key, value) in properties {
        if let Err(err) = Reflect::set(&obj, &JsValue::from_str(key), value) {
            log::warn!("Unable to set option '{key}': {err:?}");
        }
    }
    obj.unchecked_into()
}

const fn marker_title(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::Search => "Search result",
        MarkerKind::RouteStart => "Start",
        MarkerKind::RouteEnd => "Destination",
        MarkerKind::LivePosition => "Your position",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeafletBackend;

impl MapBackend for LeafletBackend {
    type Surface = LeafletSurface;

    fn container_exists(&self, container_id: &str) -> bool {
        leptos::document().get_element_by_id(container_id).is_some()
    }

    fn create(&self, container_id: &str, options: &MapOptions) -> LeafletSurface {
        let map = Map::new(container_id, &leaflet::MapOptions::default());
        map.set_view(&lat_lng(options.center), options.zoom);
        LeafletSurface { map }
    }
}

#[derive(Debug)]
pub struct LeafletSurface {
    map: Map,
}

impl MapSurface for LeafletSurface {
    type Marker = Marker;
    type Polyline = Polyline;

    fn add_tile_layer(&mut self, options: &TileLayerOptions) {
        let TileLayerOptions {
            url_template,
            attribution,
            max_zoom,
        } = options;
        let layer_options: leaflet::TileLayerOptions = js_options(&[
            ("attribution", JsValue::from_str(attribution)),
            ("maxZoom", JsValue::from_f64(f64::from(*max_zoom))),
        ]);
        TileLayer::new_options(url_template, &layer_options).add_to(&self.map);
    }

    fn zoom(&self) -> Option<f64> {
        Some(self.map.get_zoom())
    }

    fn set_view(&mut self, center: MapPoint, zoom: f64) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn invalidate_size(&mut self) {
        self.map.invalidate_size(false);
    }

    fn fit_bounds(&mut self, bbox: &MapBbox) {
        let sw = bbox.southwest();
        let ne = bbox.northeast();
        let mut east = ne.lng().to_deg();
        if bbox.crosses_antimeridian() {
            // Leaflet expects the eastern edge beyond 180°
            east += 360.0;
        }
        let bounds = LatLngBounds::new(&lat_lng(sw), &LatLng::new(ne.lat().to_deg(), east));
        self.map.fit_bounds(&bounds);
    }

    fn add_marker(&mut self, pos: MapPoint, kind: MarkerKind) -> Marker {
        let title = marker_title(kind);
        let options: MarkerOptions = js_options(&[
            ("title", JsValue::from_str(title)),
            ("alt", JsValue::from_str(title)),
        ]);
        let marker = Marker::new_with_options(&lat_lng(pos), &options);
        marker.add_to(&self.map);
        marker
    }

    fn move_marker(&mut self, marker: &Marker, pos: MapPoint) {
        marker.set_lat_lng(&lat_lng(pos));
    }

    fn remove_marker(&mut self, marker: Marker) {
        marker.remove();
    }

    fn add_polyline(&mut self, path: &[MapPoint]) -> Polyline {
        let lat_lngs: Array = path
            .iter()
            .map(|pos| JsValue::from(lat_lng(*pos)))
            .collect();
        let polyline = Polyline::new(&lat_lngs);
        polyline.add_to(&self.map);
        polyline
    }

    fn remove_polyline(&mut self, polyline: Polyline) {
        polyline.remove();
    }

    fn remove(&mut self) {
        self.map.remove();
    }
}
