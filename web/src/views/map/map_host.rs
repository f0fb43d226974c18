use std::rc::Rc;

use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos_leaflet::{
    leaflet::{Map, MouseEvent},
    prelude::*,
};
use shared_types::{LatLong, Restaurant};
use thaw::{Button, ButtonAppearance, ButtonSize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

use crate::{
    components::{error::ErrorView, loading::LoadingView},
    store::use_repository,
    views::map::{
        add_restaurant_modal::AddRestaurantModal,
        geolocation::request_position,
        leaflet_surface::{LeafletMarker, LeafletSurface},
        lifecycle::MapPhase,
        lookup::LookupRunner,
        reconciler::MarkerReconciler,
        util::{DEFAULT_CENTER, DEFAULT_ZOOM},
    },
};

#[component]
pub fn MapHost<F>(
    /// Name of the app-selected restaurant, drawn highlighted.
    selected_name: Signal<Option<String>>,
    /// Receives the restaurants inside the viewport after every rebuild.
    visible: RwSignal<Vec<Restaurant>>,
    on_restaurant_select: F,
) -> impl IntoView
where
    F: Fn(Restaurant) + 'static + Copy + Send + Sync,
{
    let repository = use_repository();
    let lookup = LookupRunner::new(repository);

    let phase = RwSignal::new(MapPhase::Uninitialized);
    let map: JsRwSignal<Option<Map>> = JsRwSignal::new_local(None::<Map>);
    let surface = StoredValue::new_local(None::<LeafletSurface>);
    let reconciler = StoredValue::new_local(MarkerReconciler::<LeafletSurface>::new());
    let user_marker = StoredValue::new_local(None::<LeafletMarker>);

    let user_location = RwSignal::new(None::<LatLong>);
    let bounds_version = RwSignal::new(0_u64);
    let is_dragging = RwSignal::new(false);
    let pending_click = RwSignal::new(None::<LatLong>);

    // Uninitialized -> Loading, or wait for the page load when Leaflet is not there yet
    Effect::new(move |_| {
        if phase
            .try_update(|p| p.begin_loading(leaflet_available()))
            .unwrap_or(false)
        {
            return;
        }
        if !phase.with_untracked(MapPhase::is_waiting) {
            return;
        }

        log!("Map library not loaded yet, waiting for the page to finish loading");
        on_page_load(move || {
            let loading = phase
                .try_update(|p| p.page_loaded(leaflet_available()))
                .unwrap_or(false);
            if !loading {
                if let Some(e) = phase.with_untracked(|p| p.error().cloned()) {
                    error!("{}", e);
                }
            }
        });
    });

    // Loading -> Ready: runs its body once, when the map instance first appears
    Effect::new(move |_| {
        let Some(map_instance) = map.get() else {
            return;
        };
        if !phase.try_update(MapPhase::mark_ready).unwrap_or(false) {
            return;
        }

        let on_marker_click: Rc<dyn Fn(Restaurant)> = Rc::new(move |restaurant: Restaurant| {
            log!("Marker clicked: {}", restaurant.name);
            on_restaurant_select(restaurant);
        });
        surface.set_value(Some(LeafletSurface::new(
            map_instance.clone(),
            on_marker_click,
        )));

        register_listeners(&map_instance, bounds_version, is_dragging, pending_click);
        bounds_version.update(|v| *v += 1);

        request_position(move |coords| {
            user_location.set(Some(coords));
            let marker = surface.with_value(|s| {
                s.as_ref().map(|s| {
                    s.center_on(coords);
                    s.add_user_marker(coords)
                })
            });
            user_marker.set_value(marker);
            lookup.search_around(coords);
        });
    });

    // Marker reconciliation
    Effect::new(move |_| {
        let restaurants = repository.list();
        let user = user_location.get();
        let selected = selected_name.get();
        bounds_version.track();
        if is_dragging.get() {
            return;
        }

        let rebuilt = surface.with_value(|s| {
            s.as_ref().and_then(|s| {
                reconciler
                    .try_update_value(|r| r.rebuild(s, &restaurants, user, selected.as_deref()))
                    .flatten()
            })
        });
        if let Some(list) = rebuilt {
            visible.set(list);
        }
    });

    // Pending lookups must not touch a torn-down map
    on_cleanup(move || lookup.cancel_all());

    let search_this_area = move |_| {
        match surface.with_value(|s| s.as_ref().map(LeafletSurface::center)) {
            Some(center) => lookup.search_around(center),
            None => log!("Map not ready, ignoring search request"),
        }
    };

    view! {
        <div class="map-host">
            <div class="map-canvas">
                <Show
                    when=move || phase.with(MapPhase::shows_map)
                    fallback=move || match phase.with(|p| p.error().cloned()) {
                        Some(e) => view! {
                            <ErrorView title="Map unavailable" message=Some(e.to_string()) />
                        }.into_any(),
                        None => view! {
                            <LoadingView message=Some("Loading map...".to_string()) />
                        }.into_any(),
                    }
                >
                    <MapContainer
                        style="height: 100%; width: 100%"
                        center=Position::new(DEFAULT_CENTER.lat, DEFAULT_CENTER.long)
                        zoom=DEFAULT_ZOOM
                        set_view=true
                        map=map.write_only()
                    >
                        <TileLayer
                            url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                            attribution="&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                        />
                    </MapContainer>
                </Show>
            </div>

            <div class="map-controls">
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || phase.get() != MapPhase::Ready)
                    on_click=search_this_area
                >
                    "Search this area"
                </Button>
                <span class="map-hint">"Click on the map to add a restaurant."</span>
            </div>

            <AddRestaurantModal pending=pending_click lookup=lookup />
        </div>
    }
}

fn register_listeners(
    map: &Map,
    bounds_version: RwSignal<u64>,
    is_dragging: RwSignal<bool>,
    pending_click: RwSignal<Option<LatLong>>,
) {
    add_map_listener(map, "moveend", move |_| bounds_version.update(|v| *v += 1));
    add_map_listener(map, "dragstart", move |_| is_dragging.set(true));
    add_map_listener(map, "dragend", move |_| is_dragging.set(false));
    add_map_listener(map, "click", move |event: JsValue| {
        // A drag can end with a click on some browsers
        if is_dragging.get_untracked() {
            return;
        }
        let event: MouseEvent = event.unchecked_into();
        let lat_lng = event.lat_lng();
        pending_click.set(Some(LatLong::new(lat_lng.lat(), lat_lng.lng())));
    });
}

fn add_map_listener(map: &Map, event: &str, handler: impl FnMut(JsValue) + 'static) {
    let cb: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(handler));

    let raw_map: &EventTarget = map.unchecked_ref();
    if let Err(e) = raw_map.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        error!("Failed to attach {} listener: {:?}", event, e);
    }

    cb.forget();
}

/// Runs `callback` once the window `load` event has fired, immediately if it already has.
fn on_page_load(callback: impl FnOnce() + 'static) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let loaded = window
            .document()
            .is_some_and(|document| document.ready_state() == "complete");
        if loaded {
            callback();
            return;
        }

        let cb = Closure::once(move |_event: JsValue| callback());
        if let Err(e) = window.add_event_listener_with_callback("load", cb.as_ref().unchecked_ref()) {
            error!("Failed to attach load listener: {:?}", e);
        }
        cb.forget();
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = callback;
    }
}

fn leaflet_available() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.get("L")).is_some()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        true
    }
}
