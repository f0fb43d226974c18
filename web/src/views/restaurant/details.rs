use leptos::ev::MouseEvent;
use leptos::prelude::*;
use shared_types::{average_stars, validate_stars, Rating, Restaurant};
use thaw::*;

use crate::components::{error::ErrorView, StarRating};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder-restaurant.svg";

/// Image to show for a restaurant, falling back to the placeholder for missing or blank URLs.
pub fn image_src(image_url: Option<&str>) -> String {
    match image_url.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Selected restaurant with its reviews. Reviews added here live only as long as this view.
#[component]
pub fn RestaurantDetails(restaurant: Restaurant, show_details: RwSignal<bool>) -> impl IntoView {
    let reviews = RwSignal::new(restaurant.ratings.clone());
    let average = Memo::new(move |_| reviews.with(|r| average_stars(r)));
    let image = RwSignal::new(image_src(restaurant.image_url.as_deref()));

    let show_dialog = RwSignal::new(false);
    let comment = RwSignal::new(String::new());
    let stars = RwSignal::new(0.0_f64);
    let review_error = RwSignal::new(None::<String>);

    let close_dialog = move || {
        comment.set(String::new());
        stars.set(0.0);
        review_error.set(None);
        show_dialog.set(false);
    };

    let add_review = move || {
        let value = stars.get_untracked() as f32;
        if let Err(e) = validate_stars(value) {
            review_error.set(Some(e.to_string()));
            return;
        }
        reviews.update(|r| r.push(Rating::new(value, comment.get_untracked())));
        close_dialog();
    };

    view! {
        <div class="restaurant-details">
            <img
                class="restaurant-image"
                src=move || image.get()
                alt=restaurant.name.clone()
                on:error=move |_| {
                    if image.get_untracked() != PLACEHOLDER_IMAGE {
                        image.set(PLACEHOLDER_IMAGE.to_string());
                    }
                }
            />
            <h3>{restaurant.name.clone()}</h3>
            <div class="restaurant-average">
                {move || view! { <StarRating value=average.get() /> }}
                <span>{move || format!("{:.1}", average.get())}</span>
            </div>
            <p class="restaurant-address">{restaurant.address.clone()}</p>

            <Show when=move || show_details.get()>
                <div class="restaurant-reviews">
                    <h4>"Reviews"</h4>
                    {move || {
                        let list = reviews.get();
                        if list.is_empty() {
                            view! { <p class="no-reviews">"No reviews yet."</p> }.into_any()
                        } else {
                            view! {
                                <ul>
                                    {list
                                        .into_iter()
                                        .map(|review| view! {
                                            <li class="review">
                                                <StarRating value=review.stars small=true />
                                                <p>{review.comment}</p>
                                            </li>
                                        })
                                        .collect_view()}
                                </ul>
                            }
                            .into_any()
                        }
                    }}
                    <Button
                        appearance=ButtonAppearance::Primary
                        size=ButtonSize::Small
                        on_click=move |ev: MouseEvent| {
                            ev.stop_propagation();
                            show_dialog.set(true);
                        }
                    >
                        "Add Review"
                    </Button>
                </div>
            </Show>

            <Show when=move || show_dialog.get()>
                <div class="modal-overlay show" on:click=|ev: MouseEvent| ev.stop_propagation()>
                    <div class="modal">
                        <div class="modal-header">
                            <h2>"Add Review"</h2>
                        </div>
                        <div class="modal-content">
                            <div class="form-group">
                                <label for="review-comment">"Comment"</label>
                                <Textarea
                                    id="review-comment"
                                    placeholder="Write your review"
                                    value=comment
                                />
                            </div>
                            <div class="form-group">
                                <label>{move || format!("Rating: {} stars", stars.get())}</label>
                                <Slider value=stars min=0.0 max=5.0 step=0.5 />
                            </div>
                            {move || review_error.get().map(|message| view! {
                                <ErrorView message=Some(message) />
                            })}
                        </div>
                        <div class="modal-actions">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| close_dialog()
                            >
                                "Cancel"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| add_review()
                            >
                                "Submit"
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
