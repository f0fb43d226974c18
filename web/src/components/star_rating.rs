use leptos::prelude::*;
use shared_types::{round_to_half, MAX_STARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

impl StarFill {
    fn class(self) -> &'static str {
        match self {
            Self::Full => "star full",
            Self::Half => "star half",
            Self::Empty => "star empty",
        }
    }
}

/// Five stars for `value`, rounded to the nearest half star.
pub fn star_fills(value: f32) -> [StarFill; 5] {
    let rounded = round_to_half(value.clamp(0.0, MAX_STARS));
    std::array::from_fn(|i| {
        let position = i as f32;
        if rounded >= position + 1.0 {
            StarFill::Full
        } else if rounded >= position + 0.5 {
            StarFill::Half
        } else {
            StarFill::Empty
        }
    })
}

/// Read-only star display.
#[component]
pub fn StarRating(value: f32, #[prop(optional)] small: bool) -> impl IntoView {
    let label = format!("{} out of 5 stars", round_to_half(value));

    view! {
        <span
            class=if small { "star-rating small" } else { "star-rating" }
            role="img"
            aria-label=label
        >
            {star_fills(value)
                .into_iter()
                .map(|fill| view! { <span class=fill.class()>"★"</span> })
                .collect_view()}
        </span>
    }
}
