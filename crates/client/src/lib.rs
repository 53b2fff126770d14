use console_error_panic_hook::set_once as set_panic_hook;
use leptos::{mount_to_body, view};
use shared::utils::tracing::configure_tracing_once;
use wasm_bindgen::prelude::wasm_bindgen;

mod components;
use components::App;

mod update;

pub mod utils;

#[wasm_bindgen]
pub fn start_client() {
    set_panic_hook();
    configure_tracing_once();

    mount_to_body(|| view! { <App/> });
}
