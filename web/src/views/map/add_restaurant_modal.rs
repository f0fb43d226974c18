use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::{LatLong, NewRestaurant};
use thaw::*;

use crate::{
    components::{error::ErrorView, loading::LoadingView}, server::reverse_geocode, store::use_repository,
    views::map::lookup::LookupRunner,
};

/// Collects a restaurant for the clicked map point. Open while `pending` holds a point.
#[component]
pub fn AddRestaurantModal(pending: RwSignal<Option<LatLong>>, lookup: LookupRunner) -> impl IntoView {
    let repository = use_repository();

    // Form state
    let name = RwSignal::new(String::new());
    let review = RwSignal::new(String::new());
    let stars = RwSignal::new(0.0_f64);

    // UI state
    let is_submitting = RwSignal::new(false);
    let form_error = RwSignal::new(None::<String>);

    let reset_form = move || {
        name.set(String::new());
        review.set(String::new());
        stars.set(0.0);
        is_submitting.set(false);
        form_error.set(None);
    };

    let close_modal = move || {
        reset_form();
        pending.set(None);
    };

    let handle_submit = move || {
        let Some(location) = pending.get_untracked() else {
            return;
        };
        if is_submitting.get_untracked() {
            return;
        }

        let form = NewRestaurant {
            name: name.get_untracked(),
            comment: review.get_untracked(),
            stars: stars.get_untracked() as f32,
            location,
        };
        if let Err(e) = form.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        form_error.set(None);

        // An address lookup is an external call like any other
        if !lookup.acquire("reverse geocode") {
            return;
        }

        is_submitting.set(true);
        spawn_local(async move {
            match reverse_geocode(location).await {
                Ok(Some(address)) => {
                    repository.append(form.into_restaurant(address));
                    close_modal();
                }
                Ok(None) => {
                    alert("No results found");
                    is_submitting.set(false);
                }
                Err(e) => {
                    alert(&format!("Geocoder failed due to: {}", e));
                    is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <Show when=move || pending.get().is_some()>
            <div class="modal-overlay show">
                <div class="modal">
                    <div class="modal-header">
                        <h2>"Add Restaurant"</h2>
                    </div>

                    <div class="modal-content">
                        <p>"Please enter the details of the new restaurant:"</p>
                        <div class="form-group">
                            <label for="restaurant-name">"Restaurant Name"</label>
                            <Input
                                id="restaurant-name"
                                placeholder="Restaurant Name"
                                value=name
                            />
                        </div>
                        <div class="form-group">
                            <label for="restaurant-review">"Initial Review"</label>
                            <Textarea
                                id="restaurant-review"
                                placeholder="What did you think?"
                                value=review
                            />
                        </div>
                        <div class="form-group">
                            <label>{move || format!("Rating: {} stars", stars.get())}</label>
                            <Slider value=stars min=0.0 max=5.0 step=0.5 />
                        </div>

                        <Show when=move || is_submitting.get()>
                            <LoadingView message=Some("Looking up address...".to_string()) compact=true />
                        </Show>

                        {move || form_error.get().map(|message| view! {
                            <ErrorView message=Some(message) />
                        })}
                    </div>

                    <div class="modal-actions">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| close_modal()
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=is_submitting
                            on_click=move |_| handle_submit()
                        >
                            {move || if is_submitting.get() { "Saving..." } else { "Submit" }}
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Blocking browser alert; also logged so it shows up without a window.
fn alert(message: &str) {
    warn!("{}", message);

    #[cfg(feature = "hydrate")]
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
