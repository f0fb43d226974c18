use shared_types::LatLong;

/// One-shot browser geolocation. Failures are logged and `on_success` never runs.
pub fn request_position(on_success: impl FnOnce(LatLong) + 'static) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::logging::error;
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;
        use web_sys::Position;

        let Some(window) = web_sys::window() else {
            error!("Unable to retrieve user location: no window.");
            return;
        };

        let geolocation = match window.navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(e) => {
                error!("Geolocation is not supported: {:?}", e);
                return;
            }
        };

        let success = Closure::once(move |position: Position| {
            let coords = position.coords();
            on_success(LatLong::new(coords.latitude(), coords.longitude()));
        });
        let failure = Closure::once(move |_error: JsValue| {
            error!("Unable to retrieve user location.");
        });

        if let Err(e) = geolocation.get_current_position_with_error_callback(
            success.as_ref().unchecked_ref(),
            Some(failure.as_ref().unchecked_ref()),
        ) {
            error!("Unable to retrieve user location: {:?}", e);
        }

        // The browser owns the callbacks from here on.
        success.forget();
        failure.forget();
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = on_success;
    }
}
