use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

#[component]
pub fn ErrorView(
    message: Option<String>,
    #[prop(optional)] title: Option<&'static str>,
) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            {title.map(|title| view! { <strong class="error-title">{title}" "</strong> })}
            {message.unwrap_or_else(|| "Something went wrong.".to_string())}
        </MessageBar>
    }
}
