use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{ClientConfig, ClientProvider, SceneBackground, StorefrontView, STOREFRONT_CSS};

const CONFIG_TOML: &str = include_str!("../storefront.toml");

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

/// Read the embedded `storefront.toml`, falling back to defaults.
fn load_config() -> ClientConfig {
    match ClientConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {}", ClientConfig::filename(), e);
            ClientConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: STOREFRONT_CSS }

        SceneBackground { config: config.scene.clone() }
        ClientProvider {
            api: config.api.clone(),
            StorefrontView {}
        }
    }
}
