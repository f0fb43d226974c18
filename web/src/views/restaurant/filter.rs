use leptos::logging::warn;
use leptos::prelude::*;
use shared_types::RatingFilter;

#[component]
pub fn RestaurantFilter(filter: RwSignal<RatingFilter>) -> impl IntoView {
    let on_change = move |ev| {
        let value = event_target_value(&ev);
        match value.parse::<i32>().ok().and_then(RatingFilter::from_value) {
            Some(selected) => filter.set(selected),
            None => warn!("Ignoring unknown rating filter value {:?}", value),
        }
    };

    view! {
        <div class="filter-container">
            <label for="rating-filter">"Filter by rating"</label>
            <select
                id="rating-filter"
                aria-label="Rating Filter"
                on:change=on_change
                prop:value=move || filter.get().value().to_string()
            >
                {RatingFilter::OPTIONS
                    .into_iter()
                    .map(|option| view! {
                        <option value=option.value().to_string()>{option.label()}</option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
