use leptos::prelude::*;

use crate::{selection::Selection, views::restaurant::details::RestaurantDetails};

#[component]
pub fn RestaurantCard(selection: RwSignal<Selection>) -> impl IntoView {
    let show_details = RwSignal::new(true);
    let selected = Memo::new(move |_| selection.with(|s| s.restaurant().cloned()));

    view! {
        <div class="restaurant-card" on:click=move |_| show_details.update(|shown| *shown = !*shown)>
            {move || match selected.get() {
                Some(restaurant) => {
                    view! { <RestaurantDetails restaurant=restaurant show_details=show_details /> }
                        .into_any()
                }
                None => {
                    view! { <p class="restaurant-card-empty">"Click on a restaurant to view details."</p> }
                        .into_any()
                }
            }}
        </div>
    }
}
