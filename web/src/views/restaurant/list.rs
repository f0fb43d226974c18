use leptos::prelude::*;
use shared_types::{filter_restaurants, RatingFilter, Restaurant};

use crate::views::restaurant::item::RestaurantItem;

pub const EMPTY_LIST_MESSAGE: &str = "No restaurants match the criteria.";

/// Text shown in place of the list when nothing passes the filter.
pub fn empty_message(filtered: &[Restaurant]) -> Option<&'static str> {
    filtered.is_empty().then_some(EMPTY_LIST_MESSAGE)
}

/// Visible restaurants narrowed by the rating filter.
#[component]
pub fn RestaurantList<F>(
    restaurants: RwSignal<Vec<Restaurant>>,
    filter: RwSignal<RatingFilter>,
    selected_name: Signal<Option<String>>,
    on_restaurant_select: F,
) -> impl IntoView
where
    F: Fn(Restaurant) + 'static + Copy + Send + Sync,
{
    let filtered =
        Memo::new(move |_| restaurants.with(|list| filter_restaurants(list, filter.get())));

    view! {
        <div class="restaurant-list-container">
            {move || {
                let list = filtered.get();
                if let Some(message) = empty_message(&list) {
                    view! { <p class="restaurant-list-empty">{message}</p> }.into_any()
                } else {
                    view! {
                        <div class="restaurant-list">
                            {list
                                .into_iter()
                                .map(|restaurant| {
                                    let name = restaurant.name.clone();
                                    let is_selected = Signal::derive(move || {
                                        selected_name.with(|s| s.as_deref() == Some(name.as_str()))
                                    });
                                    view! {
                                        <RestaurantItem
                                            restaurant=restaurant
                                            is_selected=is_selected
                                            on_restaurant_select=on_restaurant_select
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
