//! # Client configuration — `storefront.toml`
//!
//! ```toml
//! [api]
//! base_url = "/api"      # resolved against the page origin in the browser
//!
//! [scene]
//! container_id = "scene-bg"
//! rotation_step = 0.01
//! color = "#00ff88"
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config, TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Where the Resource API lives. |
//! | [`SceneConfig`] | Background scene parameters, owned by the `scene` crate. |
//!
//! Missing sections and fields take their defaults, so an empty file is the
//! stock configuration.

use scene::SceneConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Absolute URL, or a path resolved against the page origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "storefront.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
