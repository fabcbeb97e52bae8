//! The `[scene]` section of the client configuration.

use serde::{Deserialize, Serialize};

/// Background scene parameters. Every field has a default, so an empty section
/// is the stock scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Id of the element the canvas is appended to.
    pub container_id: String,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Camera distance from the origin along +z.
    pub camera_distance: f32,
    /// Radians added to the mesh's x and y rotation every frame.
    pub rotation_step: f32,
    /// CSS color of the wireframe.
    pub color: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            container_id: "scene-bg".to_string(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 20.0,
            rotation_step: 0.01,
            color: "#00ff88".to_string(),
        }
    }
}
