use thiserror::Error;

/// Startup failures of the background scene. All of them are fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("no browser window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("scene container #{0} not found")]
    MissingContainer(String),
    #[error("2D canvas rendering context is not supported")]
    UnsupportedContext,
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SceneError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SceneError::Js(format!("{value:?}"))
    }
}
