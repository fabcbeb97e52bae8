use dioxus::prelude::*;
use scene::SceneConfig;

/// Fixed, non-interactive container behind the page that hosts the rotating
/// torus knot. The render loop starts once the element is mounted and runs
/// for the lifetime of the page.
#[component]
pub fn SceneBackground(config: SceneConfig) -> Element {
    let id = config.container_id.clone();

    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        match scene::web::start(&config) {
            Ok(_handle) => {}
            Err(e) => {
                tracing::error!("Failed to start background scene: {}", e);
                panic!("background scene failed to start: {e}");
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        tracing::debug!("No browser; background scene {} not started", config.container_id);
    });

    rsx! {
        div { id: "{id}", class: "scene-bg" }
    }
}
