use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    entities::route::Route,
    gateways::position::PositionError,
    map::{memory::*, MarkerKind, OverlayCounts},
    usecases::tests::*,
};

#[derive(Default)]
struct FakePositionSource {
    fail: bool,
    options: RefCell<Vec<WatchOptions>>,
    on_update: RefCell<Option<Box<dyn Fn(PositionUpdate)>>>,
    cleared: RefCell<Vec<WatchId>>,
}

impl FakePositionSource {
    fn emit(&self, update: PositionUpdate) {
        if let Some(on_update) = &*self.on_update.borrow() {
            on_update(update);
        }
    }
}

impl PositionSource for FakePositionSource {
    fn watch(
        &self,
        options: WatchOptions,
        on_update: Box<dyn Fn(PositionUpdate)>,
    ) -> Result<WatchId, PositionError> {
        if self.fail {
            return Err(PositionError::PermissionDenied);
        }
        self.options.borrow_mut().push(options);
        *self.on_update.borrow_mut() = Some(on_update);
        Ok(7)
    }

    fn clear_watch(&self, id: WatchId) {
        self.cleared.borrow_mut().push(id);
        self.on_update.borrow_mut().take();
    }
}

struct Fixture {
    screen: Rc<MapScreen<MemoryMap>>,
    geo: Rc<FakeGeocoder>,
    router: Rc<FakeRouter>,
    backend: MemoryBackend,
}

impl Fixture {
    fn new(geo: FakeGeocoder, router: FakeRouter) -> Self {
        Self::with_deadline(geo, router, deadline())
    }

    fn with_deadline(geo: FakeGeocoder, router: FakeRouter, deadline: Deadline) -> Self {
        let geo = Rc::new(geo);
        let router = Rc::new(router);
        let geocoding: Rc<dyn GeoCodingGateway> = geo.clone();
        let routing: Rc<dyn RoutingGateway> = router.clone();
        let services = Services {
            geocoding,
            routing,
            deadline,
        };
        let screen = Rc::new(MapScreen::new(services, MapOptions::default()));
        let backend = MemoryBackend::default().with_container("map");
        assert!(screen.activate(&backend, "map", None));
        Self {
            screen,
            geo,
            router,
            backend,
        }
    }

    fn overlay_counts(&self) -> OverlayCounts {
        self.screen.with_map(MapHandle::overlay_counts).unwrap()
    }

    fn markers(&self, kind: MarkerKind) -> Vec<MapPoint> {
        self.screen
            .with_map(|map| map.surface().unwrap().markers_of_kind(kind))
            .unwrap()
    }

    fn polylines(&self) -> Vec<Vec<MapPoint>> {
        self.screen
            .with_map(|map| {
                map.surface()
                    .unwrap()
                    .polylines()
                    .into_iter()
                    .map(<[MapPoint]>::to_vec)
                    .collect()
            })
            .unwrap()
    }

    fn center(&self) -> MapPoint {
        self.screen
            .with_map(|map| map.surface().unwrap().center())
            .unwrap()
    }

    fn record_loading(&self) -> Rc<RefCell<Vec<bool>>> {
        let history = Rc::new(RefCell::new(vec![]));
        let recorder = Rc::clone(&history);
        self.screen
            .set_listener(move |state| recorder.borrow_mut().push(state.loading));
        history
    }
}

fn toulouse() -> PlaceCandidate {
    place("Toulouse, Occitanie, France", 43.604652, 1.444209)
}

fn paris() -> PlaceCandidate {
    place("Paris, Île-de-France, France", 48.856613, 2.352222)
}

fn geocoder() -> FakeGeocoder {
    FakeGeocoder::default()
        .with_places("Toulouse", vec![toulouse()])
        .with_places("Paris", vec![paris()])
}

fn three_point_route() -> Route {
    Route::new(vec![
        MapPoint::from_lat_lng_deg(43.604652, 1.444209),
        MapPoint::from_lat_lng_deg(46.0, 2.0),
        MapPoint::from_lat_lng_deg(48.856613, 2.352222),
    ])
}

#[test]
fn activation_requires_a_container() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let screen = Rc::new(MapScreen::<MemoryMap>::new(
        Services {
            geocoding: fx.geo.clone(),
            routing: fx.router.clone(),
            deadline: deadline(),
        },
        MapOptions::default(),
    ));
    let source = Rc::new(FakePositionSource::default());
    let position_source: Rc<dyn PositionSource> = source.clone();
    assert!(!screen.activate(&MemoryBackend::default(), "map", Some(position_source)));
    assert!(!screen.is_active());
    assert!(source.options.borrow().is_empty());
}

#[test]
fn activation_starts_high_accuracy_tracking() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let source = Rc::new(FakePositionSource::default());
    let position_source: Rc<dyn PositionSource> = source.clone();
    assert!(fx.screen.activate(&fx.backend, "map", Some(position_source)));
    assert!(fx.screen.is_active());
    assert_eq!(
        vec![WatchOptions {
            high_accuracy: true
        }],
        *source.options.borrow()
    );
    // the map of the first activation has been replaced
    assert_eq!(1, fx.backend.removed_counter().get());
}

#[test]
fn failing_position_subscription_is_not_fatal() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let source: Rc<dyn PositionSource> = Rc::new(FakePositionSource {
        fail: true,
        ..Default::default()
    });
    assert!(fx.screen.activate(&fx.backend, "map", Some(source)));
    assert!(fx.screen.is_active());
}

#[test]
fn position_updates_move_a_single_marker() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let source = Rc::new(FakePositionSource::default());
    fx.screen.start_tracking(source.clone());

    let first = MapPoint::from_lat_lng_deg(43.60, 1.44);
    let second = MapPoint::from_lat_lng_deg(43.61, 1.45);
    source.emit(PositionUpdate::Fix(first));
    source.emit(PositionUpdate::Failed(PositionError::Timeout));
    source.emit(PositionUpdate::Fix(second));

    assert_eq!(1, fx.overlay_counts().live_position_markers);
    assert_eq!(vec![second], fx.markers(MarkerKind::LivePosition));
    assert_eq!(Some(second), fx.screen.state().position);
}

#[test]
fn deactivation_stops_tracking_and_destroys_the_map() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let source = Rc::new(FakePositionSource::default());
    fx.screen.start_tracking(source.clone());
    let removed = fx.backend.removed_counter();

    fx.screen.deactivate();
    fx.screen.deactivate();

    assert!(!fx.screen.is_active());
    assert_eq!(1, removed.get());
    assert_eq!(vec![7], *source.cleared.borrow());
    // updates after teardown are ignored
    fx.screen.update_position(MapPoint::from_lat_lng_deg(43.60, 1.44));
    assert!(fx.screen.with_map(MapHandle::overlay_counts).is_none());
}

#[tokio::test]
async fn blank_search_does_nothing() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    fx.screen.search("   ").await;
    assert!(fx.geo.calls().is_empty());
    assert_eq!(OverlayCounts::default(), fx.overlay_counts());
    assert_eq!(ScreenState::default(), fx.screen.state());
}

#[tokio::test]
async fn search_results_stack_up() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());

    fx.screen.search("Toulouse").await;
    assert_eq!(toulouse().pos, fx.center());

    fx.screen.search("Paris").await;
    assert_eq!(paris().pos, fx.center());

    assert_eq!(
        vec![toulouse().pos, paris().pos],
        fx.markers(MarkerKind::Search)
    );
    assert_eq!(None, fx.screen.state().notice);
}

#[tokio::test]
async fn unknown_address() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    fx.screen.search("Atlantis").await;
    assert_eq!(Some(Notice::AddressNotFound), fx.screen.state().notice);
    assert_eq!(0, fx.overlay_counts().search_markers);

    fx.screen.dismiss_notice();
    assert_eq!(None, fx.screen.state().notice);
}

#[tokio::test]
async fn failed_search() {
    let fx = Fixture::new(geocoder().failing("Toulouse"), FakeRouter::default());
    fx.screen.search("Toulouse").await;
    assert_eq!(Some(Notice::SearchFailed), fx.screen.state().notice);
    assert_eq!(0, fx.overlay_counts().search_markers);
}

#[tokio::test]
async fn outdated_search_is_discarded() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let gate = fx.geo.gate("Toulouse");
    futures::join!(fx.screen.search("Toulouse"), async {
        fx.screen.search("Paris").await;
        gate.send(()).unwrap();
    });
    assert_eq!(vec![paris().pos], fx.markers(MarkerKind::Search));
    assert_eq!(paris().pos, fx.center());
}

#[tokio::test]
async fn suggestions_per_field() {
    let fx = Fixture::new(
        geocoder().with_places("Tou", vec![toulouse(), place("Toulon", 43.12, 5.93)]),
        FakeRouter::default(),
    );
    fx.screen.suggest(SuggestionField::Start, "Tou").await;
    fx.screen.suggest(SuggestionField::End, "Paris").await;

    let state = fx.screen.state();
    assert_eq!(2, state.start_suggestions.len());
    assert_eq!(vec![paris()], state.end_suggestions);
    assert!(state.search_suggestions.is_empty());

    fx.screen.suggest(SuggestionField::Start, " ").await;
    let state = fx.screen.state();
    assert!(state.suggestions(SuggestionField::Start).is_empty());
    assert_eq!(1, state.suggestions(SuggestionField::End).len());
    assert_eq!(vec![("Tou".to_string(), 5), ("Paris".to_string(), 5)], fx.geo.calls());
}

#[tokio::test]
async fn failed_suggestions_are_empty() {
    let fx = Fixture::new(geocoder().failing("Paris"), FakeRouter::default());
    fx.screen.suggest(SuggestionField::Search, "Toulouse").await;
    assert_eq!(1, fx.screen.state().search_suggestions.len());
    fx.screen.suggest(SuggestionField::Search, "Paris").await;
    assert!(fx.screen.state().search_suggestions.is_empty());
    assert_eq!(None, fx.screen.state().notice);
}

#[tokio::test]
async fn slow_outdated_suggestions_do_not_overwrite_newer_ones() {
    let fx = Fixture::new(
        geocoder().with_places("Tou", vec![place("Toulon", 43.12, 5.93)]),
        FakeRouter::default(),
    );
    let gate = fx.geo.gate("Tou");
    futures::join!(fx.screen.suggest(SuggestionField::Search, "Tou"), async {
        fx.screen.suggest(SuggestionField::Search, "Toulouse").await;
        gate.send(()).unwrap();
    });
    assert_eq!(vec![toulouse()], fx.screen.state().search_suggestions);
}

#[tokio::test]
async fn clearing_the_input_discards_pending_suggestions() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let gate = fx.geo.gate("Toulouse");
    futures::join!(fx.screen.suggest(SuggestionField::End, "Toulouse"), async {
        fx.screen.suggest(SuggestionField::End, "").await;
        gate.send(()).unwrap();
    });
    assert!(fx.screen.state().end_suggestions.is_empty());
}

#[tokio::test]
async fn select_suggestions() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());

    fx.screen.suggest(SuggestionField::Search, "Paris").await;
    assert_eq!(
        Some(paris()),
        fx.screen.select_suggestion(SuggestionField::Search, 0)
    );
    assert!(fx.screen.state().search_suggestions.is_empty());
    assert_eq!(vec![paris().pos], fx.markers(MarkerKind::Search));
    assert_eq!(paris().pos, fx.center());

    fx.screen.suggest(SuggestionField::Start, "Toulouse").await;
    assert_eq!(
        Some(toulouse()),
        fx.screen.select_suggestion(SuggestionField::Start, 0)
    );
    assert_eq!(1, fx.overlay_counts().search_markers);

    fx.screen.suggest(SuggestionField::End, "Paris").await;
    assert_eq!(None, fx.screen.select_suggestion(SuggestionField::End, 3));
    assert!(fx.screen.state().end_suggestions.is_empty());
}

#[tokio::test]
async fn incomplete_route_query_does_nothing() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    let loading = fx.record_loading();
    fx.screen.plan_route(&RouteQuery::new("Toulouse", "")).await;
    assert!(fx.geo.calls().is_empty());
    assert!(loading.borrow().is_empty());
}

#[tokio::test]
async fn draw_walking_route() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    let loading = fx.record_loading();

    fx.screen.plan_route(&RouteQuery::new("Toulouse", "Paris")).await;

    let path = three_point_route().path;
    assert_eq!(vec![path.clone()], fx.polylines());
    assert_eq!(vec![path[0]], fx.markers(MarkerKind::RouteStart));
    assert_eq!(vec![path[2]], fx.markers(MarkerKind::RouteEnd));
    let fitted = fx
        .screen
        .with_map(|map| map.surface().unwrap().fitted_bounds())
        .unwrap();
    assert_eq!(three_point_route().bbox(), fitted);

    let state = fx.screen.state();
    assert!(!state.loading);
    assert_eq!(None, state.notice);
    assert_eq!(Some(three_point_route()), state.route);
    assert_eq!(vec![true, false], *loading.borrow());
}

#[tokio::test]
async fn new_route_replaces_the_previous_one() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    for _ in 0..3 {
        fx.screen.plan_route(&RouteQuery::new("Toulouse", "Paris")).await;
        let counts = fx.overlay_counts();
        assert_eq!(1, counts.route_lines);
        assert_eq!(2, counts.route_markers);
    }
    assert_eq!(1, fx.polylines().len());

    fx.screen.clear_route();
    assert_eq!(OverlayCounts::default(), fx.overlay_counts());
    assert_eq!(None, fx.screen.state().route);
}

#[tokio::test]
async fn no_route_found() {
    let fx = Fixture::new(geocoder(), FakeRouter::default());
    let loading = fx.record_loading();
    fx.screen.plan_route(&RouteQuery::new("Toulouse", "Paris")).await;

    let state = fx.screen.state();
    assert_eq!(Some(Notice::NoRouteFound), state.notice);
    assert!(!state.loading);
    assert!(fx.polylines().is_empty());
    assert_eq!(vec![true, false], *loading.borrow());
}

#[tokio::test]
async fn unresolved_addresses_never_reach_the_router() {
    let fx = Fixture::new(
        geocoder().failing("Toulouse").failing("Paris"),
        FakeRouter::default().with_route(three_point_route()),
    );
    fx.screen.plan_route(&RouteQuery::new("Toulouse", "Paris")).await;

    assert!(fx.router.calls().is_empty());
    let state = fx.screen.state();
    assert_eq!(Some(Notice::AddressesNotFound), state.notice);
    assert!(!state.loading);
}

#[tokio::test]
async fn failed_routing() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().failing());
    fx.screen.plan_route(&RouteQuery::new("Toulouse", "Paris")).await;
    let state = fx.screen.state();
    assert_eq!(Some(Notice::RouteFailed), state.notice);
    assert!(!state.loading);
}

#[tokio::test]
async fn hanging_routing_times_out() {
    let fx = Fixture::with_deadline(
        geocoder(),
        FakeRouter::default().hanging(),
        expiring_deadline(),
    );
    fx.screen.plan_route(&RouteQuery::new("Toulouse", "Paris")).await;
    let state = fx.screen.state();
    assert_eq!(Some(Notice::RouteFailed), state.notice);
    assert!(!state.loading);
}

#[tokio::test]
async fn outdated_route_is_discarded() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    let loading = fx.record_loading();
    let gate = fx.geo.gate("Atlantis");
    let outdated = RouteQuery::new("Toulouse", "Atlantis");
    let latest = RouteQuery::new("Toulouse", "Paris");
    futures::join!(fx.screen.plan_route(&outdated), async {
        fx.screen.plan_route(&latest).await;
        gate.send(()).unwrap();
    });
    let state = fx.screen.state();
    assert_eq!(None, state.notice);
    assert_eq!(Some(three_point_route()), state.route);
    assert_eq!(vec![true, true, false], *loading.borrow());
}

#[tokio::test]
async fn deactivation_clears_loading_of_pending_route() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    let gate = fx.geo.gate("Paris");
    let query = RouteQuery::new("Toulouse", "Paris");
    futures::join!(fx.screen.plan_route(&query), async {
        assert!(fx.screen.state().loading);
        fx.screen.deactivate();
        gate.send(()).unwrap();
    });
    let state = fx.screen.state();
    assert!(!state.loading);
    assert_eq!(None, state.route);
    assert_eq!(None, state.notice);
}

#[tokio::test]
async fn cleared_route_is_not_drawn_when_planning_completes() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    let loading = fx.record_loading();
    let gate = fx.geo.gate("Paris");
    let query = RouteQuery::new("Toulouse", "Paris");
    futures::join!(fx.screen.plan_route(&query), async {
        assert!(fx.screen.state().loading);
        fx.screen.clear_route();
        assert!(!fx.screen.state().loading);
        gate.send(()).unwrap();
    });
    assert_eq!(OverlayCounts::default(), fx.overlay_counts());
    let state = fx.screen.state();
    assert!(!state.loading);
    assert_eq!(None, state.route);
    assert_eq!(None, state.notice);
    assert_eq!(vec![true, false], *loading.borrow());
}

#[tokio::test]
async fn reactivation_forgets_the_previous_route() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    fx.screen.plan_route(&RouteQuery::new("Toulouse", "Paris")).await;
    assert_eq!(Some(three_point_route()), fx.screen.state().route);

    assert!(fx.screen.activate(&fx.backend, "map", None));

    assert!(fx.screen.is_active());
    assert_eq!(OverlayCounts::default(), fx.overlay_counts());
    let state = fx.screen.state();
    assert_eq!(None, state.route);
    assert!(!state.loading);
}

#[tokio::test]
async fn reactivation_discards_pending_route() {
    let fx = Fixture::new(geocoder(), FakeRouter::default().with_route(three_point_route()));
    let gate = fx.geo.gate("Paris");
    let query = RouteQuery::new("Toulouse", "Paris");
    futures::join!(fx.screen.plan_route(&query), async {
        assert!(fx.screen.activate(&fx.backend, "map", None));
        assert!(!fx.screen.state().loading);
        gate.send(()).unwrap();
    });
    assert_eq!(0, fx.overlay_counts().route_lines);
    assert_eq!(None, fx.screen.state().route);
    assert_eq!(1, fx.backend.removed_counter().get());
}
