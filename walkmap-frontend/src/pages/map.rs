use std::{rc::Rc, time::Duration};

use leptos::*;
use walkmap_core::{
    entities::route::RouteQuery,
    gateways::position::PositionSource,
    map::MapOptions,
    screen::{MapScreen, ScreenState, Services, SuggestionField},
    util::timeout::Deadline,
};
use walkmap_gateways::{nominatim, openrouteservice, Nominatim, OpenRouteService};

use crate::{
    components::*,
    map::{LeafletBackend, LeafletSurface},
    position::BrowserPositionSource,
    timer::GlooTimer,
};

const MAP_CONTAINER_ID: &str = "map";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ORS_API_KEY: &str = match option_env!("ORS_API_KEY") {
    Some(key) => key,
    None => "",
};

fn new_screen() -> MapScreen<LeafletSurface> {
    let client = reqwest::Client::new();
    let services = Services {
        geocoding: Rc::new(Nominatim::new(client.clone(), nominatim::DEFAULT_BASE_URL)),
        routing: Rc::new(OpenRouteService::new(
            client,
            openrouteservice::DEFAULT_BASE_URL,
            ORS_API_KEY,
        )),
        deadline: Deadline::new(Rc::new(GlooTimer), REQUEST_TIMEOUT),
    };
    MapScreen::new(services, MapOptions::default())
}

#[allow(clippy::too_many_lines)]
#[component]
pub fn MapPage() -> impl IntoView {
    // -- signals -- //

    let state = RwSignal::new(ScreenState::default());
    let search_text = RwSignal::new(String::new());
    let start_text = RwSignal::new(String::new());
    let end_text = RwSignal::new(String::new());

    let screen = Rc::new(new_screen());
    screen.set_listener(move |snapshot| {
        _ = state.try_set(snapshot.clone());
    });

    // -- lifecycle -- //

    {
        let screen = Rc::clone(&screen);
        // The container exists as soon as the view has been mounted.
        request_animation_frame(move || {
            let position_source: Rc<dyn PositionSource> = Rc::new(BrowserPositionSource::default());
            if !screen.activate(&LeafletBackend, MAP_CONTAINER_ID, Some(position_source)) {
                log::warn!("Map container '{MAP_CONTAINER_ID}' not found");
            }
        });
    }
    {
        let screen = Rc::clone(&screen);
        on_cleanup(move || screen.deactivate());
    }

    let screen = store_value(screen);

    // -- callbacks -- //

    let suggest = move |field: SuggestionField, text: String| {
        let screen = screen.get_value();
        spawn_local(async move {
            screen.suggest(field, &text).await;
        });
    };

    let search = Callback::new(move |text: String| {
        let screen = screen.get_value();
        spawn_local(async move {
            screen.search(&text).await;
        });
    });

    let select = move |field: SuggestionField, index: usize| {
        let Some(place) = screen.get_value().select_suggestion(field, index) else {
            return;
        };
        let text = match field {
            SuggestionField::Search => search_text,
            SuggestionField::Start => start_text,
            SuggestionField::End => end_text,
        };
        text.set(place.display_name);
    };

    let plan_route = Callback::new(move |()| {
        let screen = screen.get_value();
        let query = RouteQuery::new(start_text.get_untracked(), end_text.get_untracked());
        spawn_local(async move {
            screen.plan_route(&query).await;
        });
    });

    let dismiss_notice = Callback::new(move |()| screen.get_value().dismiss_notice());

    // -- derived signals -- //

    let suggestions = move |field: SuggestionField| {
        Signal::derive(move || state.with(|s| s.suggestions(field).to_vec()))
    };
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let notice = Signal::derive(move || state.with(|s| s.notice));

    view! {
      <section class="map-page">
        <AddressInput
          value=search_text
          suggestions=suggestions(SuggestionField::Search)
          placeholder="Search an address"
          on_input=Callback::new(move |text| suggest(SuggestionField::Search, text))
          on_select=Callback::new(move |index| select(SuggestionField::Search, index))
          on_enter=search
        />
        <NoticeBar notice on_dismiss=dismiss_notice />
        <div id=MAP_CONTAINER_ID></div>
        <RouteForm
          start=start_text
          end=end_text
          start_suggestions=suggestions(SuggestionField::Start)
          end_suggestions=suggestions(SuggestionField::End)
          loading
          on_input=Callback::new(move |(field, text)| suggest(field, text))
          on_select=Callback::new(move |(field, index)| select(field, index))
          on_submit=plan_route
        />
      </section>
    }
}
