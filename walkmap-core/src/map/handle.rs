use super::*;
use crate::entities::route::Route;

/// The overlays currently drawn on a map.
///
/// There is at most one route polyline, one start and one end marker
/// and one live position marker. Search markers accumulate.
struct OverlaySet<S: MapSurface> {
    route: Option<S::Polyline>,
    route_start: Option<S::Marker>,
    route_end: Option<S::Marker>,
    live_position: Option<S::Marker>,
    search: Vec<S::Marker>,
}

impl<S: MapSurface> Default for OverlaySet<S> {
    fn default() -> Self {
        Self {
            route: None,
            route_start: None,
            route_end: None,
            live_position: None,
            search: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayCounts {
    pub route_lines: usize,
    pub route_markers: usize,
    pub search_markers: usize,
    pub live_position_markers: usize,
}

/// An owned map surface together with its overlays.
///
/// After [`MapHandle::destroy`] all operations are ignored.
pub struct MapHandle<S: MapSurface> {
    surface: Option<S>,
    overlays: OverlaySet<S>,
}

impl<S: MapSurface> MapHandle<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface: Some(surface),
            overlays: OverlaySet::default(),
        }
    }

    /// Create the map inside of the given container.
    ///
    /// Returns `None` if the container is not present (yet).
    pub fn initialize<B>(backend: &B, container_id: &str, options: &MapOptions) -> Option<Self>
    where
        B: MapBackend<Surface = S>,
    {
        if !backend.container_exists(container_id) {
            log::debug!("Map container '{container_id}' not found: skip map initialization");
            return None;
        }
        log::debug!(
            "Initialize map in '{container_id}' at {} (zoom {})",
            options.center,
            options.zoom
        );
        let mut surface = backend.create(container_id, options);
        surface.add_tile_layer(&options.tile_layer);
        Some(Self::new(surface))
    }

    pub const fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    pub const fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Center the view on `pos`.
    ///
    /// Without an explicit zoom level the current one is kept,
    /// falling back to [`DEFAULT_RECENTER_ZOOM`].
    pub fn recenter(&mut self, pos: MapPoint, zoom: Option<f64>) {
        let Some(surface) = &mut self.surface else {
            log::debug!("Map has been destroyed: skip recentering");
            return;
        };
        // The container might have been resized since the last rendering.
        surface.invalidate_size();
        let zoom = zoom
            .or_else(|| surface.zoom())
            .unwrap_or(DEFAULT_RECENTER_ZOOM);
        surface.set_view(pos, zoom);
    }

    pub fn add_search_marker(&mut self, pos: MapPoint) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        let marker = surface.add_marker(pos, MarkerKind::Search);
        self.overlays.search.push(marker);
    }

    /// Replace the currently displayed route.
    ///
    /// Returns `false` if there was nothing to draw.
    pub fn show_route(&mut self, route: &Route) -> bool {
        let (Some(start), Some(end), Some(bbox)) = (route.start(), route.end(), route.bbox()) else {
            log::debug!("Empty route: nothing to draw");
            return false;
        };
        self.clear_route();
        let Some(surface) = &mut self.surface else {
            return false;
        };
        self.overlays.route = Some(surface.add_polyline(&route.path));
        self.overlays.route_start = Some(surface.add_marker(start, MarkerKind::RouteStart));
        self.overlays.route_end = Some(surface.add_marker(end, MarkerKind::RouteEnd));
        surface.fit_bounds(&bbox);
        true
    }

    pub fn clear_route(&mut self) {
        let route = self.overlays.route.take();
        let start = self.overlays.route_start.take();
        let end = self.overlays.route_end.take();
        let Some(surface) = &mut self.surface else {
            return;
        };
        if let Some(polyline) = route {
            surface.remove_polyline(polyline);
        }
        for marker in [start, end].into_iter().flatten() {
            surface.remove_marker(marker);
        }
    }

    /// Move the live position marker, creating it on the first fix.
    pub fn update_live_position(&mut self, pos: MapPoint) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        if let Some(marker) = &self.overlays.live_position {
            surface.move_marker(marker, pos);
            return;
        }
        let marker = surface.add_marker(pos, MarkerKind::LivePosition);
        self.overlays.live_position = Some(marker);
    }

    pub fn overlay_counts(&self) -> OverlayCounts {
        let OverlaySet {
            route,
            route_start,
            route_end,
            live_position,
            search,
        } = &self.overlays;
        OverlayCounts {
            route_lines: usize::from(route.is_some()),
            route_markers: usize::from(route_start.is_some()) + usize::from(route_end.is_some()),
            search_markers: search.len(),
            live_position_markers: usize::from(live_position.is_some()),
        }
    }

    /// Tear down the map including all overlays.
    ///
    /// Calling this more than once has no effect.
    pub fn destroy(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        log::debug!("Destroy map");
        // Overlay handles must not outlive the map.
        self.overlays = OverlaySet::default();
        surface.remove();
    }
}

impl<S: MapSurface> Drop for MapHandle<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<S: MapSurface> std::fmt::Debug for MapHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapHandle")
            .field("active", &self.is_active())
            .field("overlays", &self.overlay_counts())
            .finish()
    }
}
