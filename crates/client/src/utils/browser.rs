use leptos::window;
use shared::error::{FrontendError, ResultContext};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{js_sys::Reflect, ServiceWorkerContainer, ServiceWorkerRegistration};

/// `navigator.serviceWorker` is absent on insecure origins and older browsers
pub fn service_worker_supported() -> bool {
    Reflect::has(window().navigator().as_ref(), &JsValue::from_str("serviceWorker"))
        .unwrap_or(false)
}

pub fn service_worker_container() -> ServiceWorkerContainer {
    window().navigator().service_worker()
}

/// Resolves once a registration for this scope has an active worker
pub async fn ready_registration(
    container: &ServiceWorkerContainer,
) -> Result<ServiceWorkerRegistration, FrontendError> {
    let registration = JsFuture::from(container.ready().context("service_worker::ready")?)
        .await
        .context("awaiting service_worker::ready")?;
    Ok(registration.into())
}

/// The current registration, or None when nothing is registered for this
/// scope yet (the ready promise never resolves with undefined but
/// getRegistration does)
pub async fn current_registration(
    container: &ServiceWorkerContainer,
) -> Result<Option<ServiceWorkerRegistration>, FrontendError> {
    let registration = JsFuture::from(container.get_registration())
        .await
        .context("service_worker::get_registration")?;

    Ok(if registration.is_undefined() {
        None
    } else {
        Some(registration.into())
    })
}
