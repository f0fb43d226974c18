use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};
use shared_types::{RatingFilter, Restaurant};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::{
    selection::Selection,
    store::{RestaurantRepository, RestaurantStore},
    views::{
        map::map_host::MapHost,
        restaurant::{card::RestaurantCard, filter::RestaurantFilter, list::RestaurantList},
    },
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <link
                    rel="stylesheet"
                    href="https://unpkg.com/leaflet@1.9.3/dist/leaflet.css"
                />
                <script
                    src="https://unpkg.com/leaflet@1.9.3/dist/leaflet.js"
                    defer
                ></script>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/web.css"/>

        <Title text="Restaurant Finder"/>

        <ConfigProvider>
            <Router>
                <main>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}

/// Map and card on the left, filter and visible list on the right.
#[component]
fn HomePage() -> impl IntoView {
    RestaurantRepository::provide(RestaurantStore::seeded());

    let selection = RwSignal::new(Selection::default());
    let filter = RwSignal::new(RatingFilter::All);
    let visible = RwSignal::new(Vec::<Restaurant>::new());

    let selected_name =
        Signal::derive(move || selection.with(|s| s.name().map(str::to_string)));
    let on_restaurant_select = move |restaurant: Restaurant| {
        selection.update(|s| s.toggle(restaurant));
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Restaurant Finder"</h1>
            </header>
            <div class="app-columns">
                <section class="app-column map-column">
                    <MapHost
                        selected_name=selected_name
                        visible=visible
                        on_restaurant_select=on_restaurant_select
                    />
                    <RestaurantCard selection=selection />
                </section>
                <section class="app-column list-column">
                    <RestaurantFilter filter=filter />
                    <RestaurantList
                        restaurants=visible
                        filter=filter
                        selected_name=selected_name
                        on_restaurant_select=on_restaurant_select
                    />
                </section>
            </div>
        </div>
    }
}
