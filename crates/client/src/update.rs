use std::{cell::Cell, time::Duration};

use gloo::{events::EventListener, utils::format::JsValueSerdeExt};
use leptos::{
    create_rw_signal, provide_context, set_interval, spawn_local, use_context, window, RwSignal,
    SignalSet, SignalUpdate, SignalWith,
};
use shared::{
    error::{FrontendError, ResultContext},
    message::WorkerRequest,
};
use tracing::{debug, error, info};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ServiceWorker, ServiceWorkerContainer, ServiceWorkerState};

use crate::utils::browser::{
    current_registration, ready_registration, service_worker_container, service_worker_supported,
};

const UPDATE_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Set by the first controllerchange so overlapping controller swaps can't
/// trigger a reload loop. Reset only by the reload itself
#[derive(Debug, Default)]
struct ReloadGuard(Cell<bool>);

impl ReloadGuard {
    /// Returns true exactly once
    fn acquire(&self) -> bool {
        !self.0.replace(true)
    }
}

/// An installed worker is only an update when a controller already exists,
/// otherwise it's the first install and activates on its own
fn update_ready(state: ServiceWorkerState, controlled: bool) -> bool {
    state == ServiceWorkerState::Installed && controlled
}

/// The worker awaiting activation, if any. Some while the update banner is
/// visible, None otherwise
#[derive(Clone, Copy)]
pub struct PendingUpdate(RwSignal<Option<ServiceWorker>>);

impl PendingUpdate {
    /// Creates the pending update signal and wires up the service worker
    /// lifecycle listeners. Does nothing beyond providing the (permanently
    /// None) signal when service workers are unsupported
    pub fn provide_context() {
        let pending = Self(create_rw_signal(None));
        provide_context(pending);

        if !service_worker_supported() {
            debug!("Service workers not supported, update checks disabled");
            return;
        }

        spawn_local(async move {
            if let Err(e) = watch_for_updates(pending).await {
                error!("Failed to wire up service worker update checks: {e}");
            }
        });
    }

    pub fn use_pending() -> Self {
        use_context().expect("PendingUpdate missing from context!")
    }

    pub fn is_some(&self) -> bool {
        self.0.with(Option::is_some)
    }

    fn offer(&self, worker: ServiceWorker) {
        info!("New service worker installed, offering update");
        self.0.set(Some(worker));
    }

    /// Asks the held worker to take over and hides the banner. The reload
    /// happens when the resulting controllerchange fires
    pub fn apply(&self) {
        self.0.update(|pending| {
            if let Some(worker) = pending.take() {
                if let Err(e) = request_skip_waiting(&worker) {
                    error!("Failed to message the waiting service worker: {e}");
                }
            }
        });
    }

    pub fn dismiss(&self) {
        self.0.set(None);
    }
}

fn request_skip_waiting(worker: &ServiceWorker) -> Result<(), FrontendError> {
    let message = <JsValue as JsValueSerdeExt>::from_serde(&WorkerRequest::SkipWaiting)?;
    worker
        .post_message(&message)
        .context("service_worker::post_message")?;
    Ok(())
}

/// The new worker activating swaps the page's controller; reload so the page
/// is served by the new version. Guarded to one reload per page load
fn reload_on_controller_change(container: &ServiceWorkerContainer) {
    let guard = ReloadGuard::default();

    EventListener::new(container, "controllerchange", move |_| {
        if !guard.acquire() {
            return;
        }

        info!("New service worker activated, reloading page");
        if let Err(e) = window().location().reload() {
            error!("Failed to reload: {}", FrontendError::from(e));
        }
    })
    .forget();
}

/// Side-effecting request for the platform to look for a newer worker;
/// failures are logged and otherwise ignored
async fn check_for_update() -> Result<(), FrontendError> {
    let container = service_worker_container();

    let Some(registration) = current_registration(&container).await? else {
        return Ok(());
    };

    JsFuture::from(registration.update().context("registration::update")?)
        .await
        .context("awaiting registration::update")?;

    debug!("Checked for service worker update");
    Ok(())
}

async fn watch_for_updates(pending: PendingUpdate) -> Result<(), FrontendError> {
    let container = service_worker_container();

    reload_on_controller_change(&container);

    let registration = ready_registration(&container).await?;

    set_interval(
        || {
            spawn_local(async {
                if let Err(e) = check_for_update().await {
                    debug!("Update check failed: {e}");
                }
            })
        },
        UPDATE_CHECK_INTERVAL,
    );

    // A new worker may have installed before this page loaded
    if let Some(worker) = registration.waiting() {
        pending.offer(worker);
    }

    let updatefound_registration = registration.clone();
    EventListener::new(&registration, "updatefound", move |_| {
        let Some(worker) = updatefound_registration.installing() else {
            return;
        };

        let container = service_worker_container();
        let installing = worker.clone();
        EventListener::new(&worker, "statechange", move |_| {
            if update_ready(installing.state(), container.controller().is_some()) {
                pending.offer(installing.clone());
            }
        })
        .forget();
    })
    .forget();

    Ok(())
}

#[cfg(test)]
mod test {
    use web_sys::ServiceWorkerState;

    use super::{update_ready, ReloadGuard};

    #[test]
    fn reload_guard_acquires_exactly_once() {
        let guard = ReloadGuard::default();
        assert!(guard.acquire());
        assert!(!guard.acquire());
        assert!(!guard.acquire());
    }

    #[test]
    fn installed_worker_with_existing_controller_is_an_update() {
        assert!(update_ready(ServiceWorkerState::Installed, true));
    }

    #[test]
    fn first_install_is_not_an_update() {
        assert!(!update_ready(ServiceWorkerState::Installed, false));
    }

    #[test]
    fn other_lifecycle_states_are_not_updates() {
        for state in [
            ServiceWorkerState::Parsed,
            ServiceWorkerState::Installing,
            ServiceWorkerState::Activating,
            ServiceWorkerState::Activated,
            ServiceWorkerState::Redundant,
        ] {
            assert!(!update_ready(state, true));
        }
    }
}
