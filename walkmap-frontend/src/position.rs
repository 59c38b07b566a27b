use std::{cell::RefCell, collections::HashMap, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};
use walkmap_core::{
    entities::geo::MapPoint,
    gateways::position::{PositionError, PositionSource, PositionUpdate, WatchId, WatchOptions},
};
use web_sys::{GeolocationPosition, GeolocationPositionError, PositionOptions};

type OnPosition = Closure<dyn FnMut(GeolocationPosition)>;
type OnError = Closure<dyn FnMut(GeolocationPositionError)>;

/// Device position from the browser geolocation API.
#[derive(Default)]
pub struct BrowserPositionSource {
    // The callbacks must stay alive until the watch is cleared.
    watches: RefCell<HashMap<WatchId, (OnPosition, OnError)>>,
}

fn position_error(err: &GeolocationPositionError) -> PositionError {
    match err.code() {
        GeolocationPositionError::PERMISSION_DENIED => PositionError::PermissionDenied,
        GeolocationPositionError::POSITION_UNAVAILABLE => PositionError::Unavailable,
        GeolocationPositionError::TIMEOUT => PositionError::Timeout,
        _ => PositionError::Other(err.message()),
    }
}

impl PositionSource for BrowserPositionSource {
    fn watch(
        &self,
        options: WatchOptions,
        on_update: Box<dyn Fn(PositionUpdate)>,
    ) -> Result<WatchId, PositionError> {
        let geolocation = leptos::window()
            .navigator()
            .geolocation()
            .map_err(|err| PositionError::Other(format!("{err:?}")))?;
        let on_update = Rc::new(on_update);
        let on_position = {
            let on_update = Rc::clone(&on_update);
            Closure::<dyn FnMut(GeolocationPosition)>::new(move |pos: GeolocationPosition| {
                let coords = pos.coords();
                match MapPoint::try_from_lat_lng_deg(coords.latitude(), coords.longitude()) {
                    Ok(pos) => on_update(PositionUpdate::Fix(pos)),
                    Err(err) => log::warn!("Ignore position: {err}"),
                }
            })
        };
        let on_error = Closure::<dyn FnMut(GeolocationPositionError)>::new(
            move |err: GeolocationPositionError| {
                on_update(PositionUpdate::Failed(position_error(&err)));
            },
        );
        let position_options = PositionOptions::new();
        position_options.set_enable_high_accuracy(options.high_accuracy);
        let id = geolocation
            .watch_position_with_error_callback_and_options(
                on_position.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &position_options,
            )
            .map_err(|err| PositionError::Other(format!("{err:?}")))?;
        self.watches.borrow_mut().insert(id, (on_position, on_error));
        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        match leptos::window().navigator().geolocation() {
            Ok(geolocation) => geolocation.clear_watch(id),
            Err(err) => log::warn!("Unable to clear position watch: {err:?}"),
        }
        self.watches.borrow_mut().remove(&id);
    }
}
