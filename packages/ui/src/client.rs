//! Client context and hooks for the UI.
//!
//! [`ClientProvider`] owns the [`SessionController`] for the page and bridges
//! its change watcher into a Dioxus signal. Components call [`use_client`],
//! which subscribes them to every state change.

use api::{ApiError, HttpApi};
use dioxus::prelude::*;
use store::SessionController;

use crate::config::ApiConfig;

pub type Client = SessionController<HttpApi>;

#[derive(Clone)]
struct ClientContext {
    client: Client,
    revision: Signal<u64>,
}

/// Get the page's client and re-render when its state changes.
pub fn use_client() -> Client {
    let ctx = use_context::<ClientContext>();
    // Reading the revision subscribes the calling component.
    let _ = (ctx.revision)();
    ctx.client
}

fn build_client(config: &ApiConfig) -> Result<Client, ApiError> {
    let api = HttpApi::with_origin(&page_origin(), &config.base_url)?;
    tracing::info!("Resource API at {}", api.base_url());
    Ok(SessionController::new(api))
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> String {
    "http://localhost:8080".to_string()
}

/// Provider component that creates the client and runs the page-load sequence.
/// Wrap the app with this component to enable [`use_client`].
#[component]
pub fn ClientProvider(api: ApiConfig, children: Element) -> Element {
    let revision = use_signal(|| 0u64);
    let ready = use_hook(move || match build_client(&api) {
        Ok(client) => {
            client.watch(move || {
                let mut revision = revision;
                *revision.write() += 1;
            });
            provide_context(ClientContext {
                client: client.clone(),
                revision,
            });
            // Probe the session and load the catalog on mount.
            spawn(async move { client.start().await });
            true
        }
        Err(e) => {
            tracing::error!("Failed to create API client: {}", e);
            false
        }
    });

    if !ready {
        return rsx! {
            div { class: "client-error", "The storefront is misconfigured and cannot reach its API." }
        };
    }

    rsx! {
        {children}
    }
}
