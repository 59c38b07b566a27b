//! A map surface that only keeps track of what would be displayed.
//!
//! Used for headless rendering and in tests.

use std::{
    cell::Cell,
    collections::{BTreeMap, HashSet},
    rc::Rc,
};

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(u64);

#[derive(Debug, Default)]
pub struct MemoryMap {
    container_id: String,
    center: MapPoint,
    zoom: Option<f64>,
    tile_layers: Vec<TileLayerOptions>,
    markers: BTreeMap<OverlayId, (MapPoint, MarkerKind)>,
    polylines: BTreeMap<OverlayId, Vec<MapPoint>>,
    fitted_bounds: Option<MapBbox>,
    invalidations: usize,
    removed: bool,
    removed_counter: Option<Rc<Cell<usize>>>,
    next_id: u64,
}

impl MemoryMap {
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub const fn center(&self) -> MapPoint {
        self.center
    }

    pub fn tile_layers(&self) -> &[TileLayerOptions] {
        &self.tile_layers
    }

    pub fn markers(&self) -> impl Iterator<Item = (MapPoint, MarkerKind)> + '_ {
        self.markers.values().copied()
    }

    /// Positions of all markers of the given kind in the order they were added.
    pub fn markers_of_kind(&self, kind: MarkerKind) -> Vec<MapPoint> {
        self.markers()
            .filter(|(_, k)| *k == kind)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn polylines(&self) -> Vec<&[MapPoint]> {
        self.polylines.values().map(Vec::as_slice).collect()
    }

    pub const fn fitted_bounds(&self) -> Option<MapBbox> {
        self.fitted_bounds
    }

    pub const fn invalidations(&self) -> usize {
        self.invalidations
    }

    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    fn next_id(&mut self) -> OverlayId {
        self.next_id += 1;
        OverlayId(self.next_id)
    }
}

impl MapSurface for MemoryMap {
    type Marker = OverlayId;
    type Polyline = OverlayId;

    fn add_tile_layer(&mut self, options: &TileLayerOptions) {
        self.tile_layers.push(options.clone());
    }

    fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    fn set_view(&mut self, center: MapPoint, zoom: f64) {
        self.center = center;
        self.zoom = Some(zoom);
    }

    fn invalidate_size(&mut self) {
        self.invalidations += 1;
    }

    fn fit_bounds(&mut self, bbox: &MapBbox) {
        self.fitted_bounds = Some(*bbox);
        self.center = bbox.center();
    }

    fn add_marker(&mut self, pos: MapPoint, kind: MarkerKind) -> OverlayId {
        let id = self.next_id();
        self.markers.insert(id, (pos, kind));
        id
    }

    fn move_marker(&mut self, marker: &OverlayId, pos: MapPoint) {
        if let Some((p, _)) = self.markers.get_mut(marker) {
            *p = pos;
        } else {
            log::warn!("Cannot move unknown marker {marker:?}");
        }
    }

    fn remove_marker(&mut self, marker: OverlayId) {
        self.markers.remove(&marker);
    }

    fn add_polyline(&mut self, path: &[MapPoint]) -> OverlayId {
        let id = self.next_id();
        self.polylines.insert(id, path.to_vec());
        id
    }

    fn remove_polyline(&mut self, polyline: OverlayId) {
        self.polylines.remove(&polyline);
    }

    fn remove(&mut self) {
        self.markers.clear();
        self.polylines.clear();
        self.tile_layers.clear();
        self.removed = true;
        if let Some(counter) = &self.removed_counter {
            counter.set(counter.get() + 1);
        }
    }
}

/// Hands out [`MemoryMap`]s for a fixed set of containers.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    containers: HashSet<String>,
    removed: Rc<Cell<usize>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.containers.insert(container_id.into());
        self
    }

    /// Counts how many maps of this backend have been removed.
    pub fn removed_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.removed)
    }
}

impl MapBackend for MemoryBackend {
    type Surface = MemoryMap;

    fn container_exists(&self, container_id: &str) -> bool {
        self.containers.contains(container_id)
    }

    fn create(&self, container_id: &str, options: &MapOptions) -> MemoryMap {
        MemoryMap {
            container_id: container_id.to_string(),
            center: options.center,
            zoom: Some(options.zoom),
            removed_counter: Some(Rc::clone(&self.removed)),
            ..Default::default()
        }
    }
}
