use leptos::{component, view, IntoView};

use crate::{components::UpdatePrompt, update::PendingUpdate};

#[component]
pub fn App() -> impl IntoView {
    PendingUpdate::provide_context();

    view! {
        <p><small>{ format!("Version: {}", env!("CARGO_PKG_VERSION")) }</small></p>
        <UpdatePrompt/>
    }
}
