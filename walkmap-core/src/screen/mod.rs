//! The interactive map screen.
//!
//! [`MapScreen`] ties the map surface, the gateways and the
//! device position together. It is driven by user input and
//! notifies a listener about every change of its [`ScreenState`].

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    entities::{geo::MapPoint, place::PlaceCandidate, route::RouteQuery},
    gateways::{
        geocode::GeoCodingGateway,
        position::{PositionError, PositionSource, PositionUpdate, WatchId, WatchOptions},
        routing::RoutingGateway,
    },
    map::{MapBackend, MapHandle, MapOptions, MapSurface},
    usecases::{self, Resolution, RoutePlan},
    util::{sequence::RequestSequencer, timeout::Deadline},
};

mod state;

pub use self::state::*;

#[cfg(test)]
mod tests;

/// Everything the screen talks to over the network.
#[derive(Clone)]
pub struct Services {
    pub geocoding: Rc<dyn GeoCodingGateway>,
    pub routing: Rc<dyn RoutingGateway>,
    pub deadline: Deadline,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

type Listener = Box<dyn Fn(&ScreenState)>;

struct Tracking {
    source: Rc<dyn PositionSource>,
    watch_id: WatchId,
}

pub struct MapScreen<S: MapSurface + 'static> {
    services: Services,
    map_options: MapOptions,
    map: RefCell<Option<MapHandle<S>>>,
    state: RefCell<ScreenState>,
    requests: RequestSequencer<RequestKind>,
    tracking: RefCell<Option<Tracking>>,
    listener: RefCell<Option<Listener>>,
}

impl<S: MapSurface + 'static> MapScreen<S> {
    pub fn new(services: Services, map_options: MapOptions) -> Self {
        Self {
            services,
            map_options,
            map: RefCell::new(None),
            state: RefCell::new(ScreenState::default()),
            requests: RequestSequencer::new(),
            tracking: RefCell::new(None),
            listener: RefCell::new(None),
        }
    }

    /// Get notified after every state change.
    pub fn set_listener(&self, listener: impl Fn(&ScreenState) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Create the map and start tracking the device position.
    ///
    /// Nothing happens if the container does not exist (yet).
    /// A previously created map is destroyed first, together with
    /// the route and all pending requests that belong to it.
    pub fn activate<B>(
        self: &Rc<Self>,
        backend: &B,
        container_id: &str,
        position_source: Option<Rc<dyn PositionSource>>,
    ) -> bool
    where
        B: MapBackend<Surface = S>,
    {
        if self.map.borrow().is_some() {
            log::debug!("Replace previously activated map");
            self.reset();
        }
        let Some(handle) = MapHandle::initialize(backend, container_id, &self.map_options) else {
            return false;
        };
        *self.map.borrow_mut() = Some(handle);
        if let Some(source) = position_source {
            self.start_tracking(source);
        }
        true
    }

    pub fn is_active(&self) -> bool {
        self.map
            .borrow()
            .as_ref()
            .is_some_and(MapHandle::is_active)
    }

    /// Subscribe to continuous position updates.
    ///
    /// Tracking is optional: if the subscription fails
    /// the screen keeps working without it.
    pub fn start_tracking(self: &Rc<Self>, source: Rc<dyn PositionSource>) {
        self.stop_tracking();
        let screen: Weak<Self> = Rc::downgrade(self);
        let on_update = move |update: PositionUpdate| {
            let Some(screen) = screen.upgrade() else {
                return;
            };
            match update {
                PositionUpdate::Fix(pos) => screen.update_position(pos),
                PositionUpdate::Failed(err) => screen.position_failed(&err),
            }
        };
        let options = WatchOptions {
            high_accuracy: true,
        };
        match source.watch(options, Box::new(on_update)) {
            Ok(watch_id) => {
                log::debug!("Started position tracking ({watch_id})");
                *self.tracking.borrow_mut() = Some(Tracking { source, watch_id });
            }
            Err(err) => {
                log::warn!("Unable to track the device position: {err}");
            }
        }
    }

    pub fn stop_tracking(&self) {
        let tracking = self.tracking.borrow_mut().take();
        if let Some(Tracking { source, watch_id }) = tracking {
            log::debug!("Stop position tracking ({watch_id})");
            source.clear_watch(watch_id);
        }
    }

    /// Stop tracking and tear down the map.
    ///
    /// Responses of requests that are still pending
    /// will be discarded. Safe to call repeatedly.
    pub fn deactivate(&self) {
        self.stop_tracking();
        self.reset();
    }

    fn reset(&self) {
        for kind in [
            RequestKind::Search,
            RequestKind::Suggest(SuggestionField::Search),
            RequestKind::Suggest(SuggestionField::Start),
            RequestKind::Suggest(SuggestionField::End),
            RequestKind::Route,
        ] {
            self.requests.invalidate(kind);
        }
        let map = self.map.borrow_mut().take();
        if let Some(mut map) = map {
            map.destroy();
        }
        self.update_state(|state| {
            state.loading = false;
            state.route = None;
        });
    }

    /// Look up an address and mark the first result on the map.
    pub async fn search(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let ticket = self.requests.issue(RequestKind::Search);
        let Services {
            geocoding,
            deadline,
            ..
        } = &self.services;
        let res = usecases::resolve_address(&**geocoding, deadline, text).await;
        if !self.requests.is_latest(&ticket) {
            log::debug!("Discard outdated search result for '{text}'");
            return;
        }
        match res {
            Ok(Resolution::Found(place)) => {
                self.show_search_result(&place);
                self.update_state(|state| state.notice = None);
            }
            Ok(Resolution::NotFound) => {
                self.update_state(|state| state.notice = Some(Notice::AddressNotFound));
            }
            Ok(Resolution::Skipped) => {}
            Err(err) => {
                log::warn!("Unable to search for '{text}': {err}");
                self.update_state(|state| state.notice = Some(Notice::SearchFailed));
            }
        }
    }

    /// Refresh the suggestions of an input field.
    pub async fn suggest(&self, field: SuggestionField, text: &str) {
        let kind = RequestKind::Suggest(field);
        if text.trim().is_empty() {
            self.requests.invalidate(kind);
            self.update_state(|state| state.suggestions_mut(field).clear());
            return;
        }
        let ticket = self.requests.issue(kind);
        let Services {
            geocoding,
            deadline,
            ..
        } = &self.services;
        let res = usecases::suggest_places(&**geocoding, deadline, text).await;
        if !self.requests.is_latest(&ticket) {
            log::debug!("Discard outdated {field:?} suggestions for '{text}'");
            return;
        }
        let suggestions = res.unwrap_or_else(|err| {
            log::warn!("Unable to fetch suggestions for '{text}': {err}");
            vec![]
        });
        self.update_state(|state| *state.suggestions_mut(field) = suggestions);
    }

    /// Pick one of the current suggestions of an input field.
    ///
    /// The suggestions are cleared afterwards. A selected search
    /// suggestion is marked on the map right away.
    pub fn select_suggestion(&self, field: SuggestionField, index: usize) -> Option<PlaceCandidate> {
        self.requests.invalidate(RequestKind::Suggest(field));
        let mut selected = None;
        self.update_state(|state| {
            let suggestions = std::mem::take(state.suggestions_mut(field));
            selected = suggestions.into_iter().nth(index);
        });
        let place = selected?;
        if field == SuggestionField::Search {
            self.show_search_result(&place);
        }
        Some(place)
    }

    /// Calculate a walking route and display it.
    pub async fn plan_route(&self, query: &RouteQuery) {
        if !query.is_complete() {
            return;
        }
        let ticket = self.requests.issue(RequestKind::Route);
        self.update_state(|state| {
            state.loading = true;
            state.notice = None;
        });
        let Services {
            geocoding,
            routing,
            deadline,
        } = &self.services;
        let res = usecases::plan_walking_route(&**geocoding, &**routing, deadline, query).await;
        if !self.requests.is_latest(&ticket) {
            // The latest request is in charge of the loading indicator.
            log::debug!("Discard outdated route from '{}' to '{}'", query.start, query.end);
            return;
        }
        let notice = match res {
            Ok(RoutePlan::Found(route)) => {
                self.with_map_mut(|map| {
                    map.show_route(&route);
                });
                self.update_state(|state| {
                    state.loading = false;
                    state.route = Some(route);
                });
                return;
            }
            Ok(RoutePlan::Skipped) => None,
            Ok(RoutePlan::AddressesNotFound) => Some(Notice::AddressesNotFound),
            Ok(RoutePlan::NoRoute) => Some(Notice::NoRouteFound),
            Err(err) => {
                log::warn!("Unable to plan route from '{}' to '{}': {err}", query.start, query.end);
                Some(Notice::RouteFailed)
            }
        };
        self.update_state(|state| {
            state.loading = false;
            state.notice = notice;
        });
    }

    /// Remove the displayed route from the map.
    ///
    /// A route that is still being planned will not be displayed.
    pub fn clear_route(&self) {
        self.requests.invalidate(RequestKind::Route);
        self.with_map_mut(MapHandle::clear_route);
        self.update_state(|state| {
            state.loading = false;
            state.route = None;
        });
    }

    pub fn update_position(&self, pos: MapPoint) {
        self.with_map_mut(|map| map.update_live_position(pos));
        self.update_state(|state| state.position = Some(pos));
    }

    pub fn position_failed(&self, err: &PositionError) {
        log::warn!("Position update failed: {err}");
    }

    pub fn state(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    pub fn dismiss_notice(&self) {
        self.update_state(|state| state.notice = None);
    }

    /// Inspect the map, if any.
    pub fn with_map<R>(&self, f: impl FnOnce(&MapHandle<S>) -> R) -> Option<R> {
        self.map.borrow().as_ref().map(f)
    }

    fn with_map_mut(&self, f: impl FnOnce(&mut MapHandle<S>)) {
        match self.map.borrow_mut().as_mut() {
            Some(map) => f(map),
            None => log::debug!("No active map"),
        }
    }

    fn show_search_result(&self, place: &PlaceCandidate) {
        log::debug!("Show '{}' at {}", place.display_name, place.pos);
        self.with_map_mut(|map| {
            map.add_search_marker(place.pos);
            map.recenter(place.pos, None);
        });
    }

    fn update_state(&self, f: impl FnOnce(&mut ScreenState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        if let Some(listener) = &*self.listener.borrow() {
            listener(&snapshot);
        }
    }
}

impl<S: MapSurface + 'static> Drop for MapScreen<S> {
    fn drop(&mut self) {
        self.stop_tracking();
    }
}

impl<S: MapSurface + 'static> std::fmt::Debug for MapScreen<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapScreen")
            .field("map", &*self.map.borrow())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
