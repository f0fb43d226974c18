use leptos::prelude::*;
use shared_types::Restaurant;

use crate::{components::StarRating, views::map::util::format_distance};

#[component]
pub fn RestaurantItem<F>(
    restaurant: Restaurant,
    is_selected: Signal<bool>,
    on_restaurant_select: F,
) -> impl IntoView
where
    F: Fn(Restaurant) + 'static + Copy + Send + Sync,
{
    let name = restaurant.name.clone();
    let average = restaurant.average_rating();
    let distance = format_distance(restaurant.distance);

    view! {
        <div
            class=move || if is_selected.get() { "restaurant-item selected" } else { "restaurant-item" }
            on:click=move |_| on_restaurant_select(restaurant.clone())
        >
            <h4 class="restaurant-item-name">{name}</h4>
            <StarRating value=average small=true />
            <p class="restaurant-item-distance">{distance}</p>
        </div>
    }
}
