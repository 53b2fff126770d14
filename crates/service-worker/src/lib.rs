//! Service worker side of the update flow. The JS shim forwards the worker
//! global scope's lifecycle events to these entry points.

use console_error_panic_hook::set_once as set_panic_hook;
use gloo::utils::format::JsValueSerdeExt;
use shared::{message::WorkerRequest, utils::tracing::configure_tracing_once};
use tracing::{info, warn};
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{js_sys::Promise, MessageEvent, ServiceWorkerGlobalScope};

async fn activate(sw: ServiceWorkerGlobalScope) -> Result<JsValue, JsValue> {
    // Take over open pages immediately so their controllerchange fires and
    // they reload into this version
    JsFuture::from(sw.clients().claim()).await?;

    info!("Service worker activated");

    Ok(JsValue::undefined())
}

#[wasm_bindgen]
pub fn worker_activate(sw: ServiceWorkerGlobalScope) -> Promise {
    set_panic_hook();
    configure_tracing_once();

    future_to_promise(activate(sw))
}

async fn message(sw: ServiceWorkerGlobalScope, event: MessageEvent) -> Result<JsValue, JsValue> {
    match JsValueSerdeExt::into_serde::<WorkerRequest>(&event.data()) {
        Ok(WorkerRequest::SkipWaiting) => {
            info!("Skip waiting requested, activating now");

            // MDN states the promise returned can be safely ignored
            let _ = sw.skip_waiting()?;
        }
        Err(_) => warn!("Ignoring unexpected message: {:?}", event.data()),
    }

    Ok(JsValue::undefined())
}

#[wasm_bindgen]
pub fn worker_message(
    sw: ServiceWorkerGlobalScope,
    event: MessageEvent,
) -> Result<Promise, JsValue> {
    set_panic_hook();
    configure_tracing_once();

    Ok(future_to_promise(message(sw, event)))
}
