//! Frame-by-frame driver of the background scene.
//!
//! [`RenderLoop`] owns the scene, camera and renderer. The platform driver
//! calls [`RenderLoop::advance`] once per display refresh and
//! [`RenderLoop::resize`] whenever the viewport changes. Nothing here touches
//! the browser, so the loop is fully testable with a [`HeadlessSurface`].
//!
//! [`HeadlessSurface`]: crate::renderer::HeadlessSurface

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::config::SceneConfig;
use crate::geometry::TorusKnot;
use crate::mesh::{Material, Mesh, MeshId, Scene};
use crate::renderer::{Renderer, Surface};

/// Shared flag that ends the loop. Clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A frame was drawn; carries the total frame count.
    Rendered(u64),
    Stopped,
}

pub struct RenderLoop<S: Surface> {
    scene: Scene,
    mesh: MeshId,
    camera: PerspectiveCamera,
    renderer: Renderer<S>,
    rotation_step: f32,
    frames: u64,
    stop: StopHandle,
}

impl<S: Surface> RenderLoop<S> {
    /// Build the stock scene: one torus knot in front of a camera at
    /// `camera_distance` on +z.
    pub fn new(config: &SceneConfig, surface: S, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));

        let mut camera = PerspectiveCamera::new(
            config.fov_degrees,
            width as f32 / height as f32,
            config.near,
            config.far,
        );
        camera.position = Vec3::new(0.0, 0.0, config.camera_distance);

        let mut scene = Scene::new();
        let mesh = scene.add(Mesh::new(
            TorusKnot::default().build(),
            Material {
                color: config.color.clone(),
            },
        ));

        tracing::debug!(width, height, "scene ready");

        Self {
            scene,
            mesh,
            camera,
            renderer: Renderer::new(surface, width, height),
            rotation_step: config.rotation_step,
            frames: 0,
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Rotate the mesh one step and draw a frame.
    pub fn tick(&mut self) {
        if let Some(mesh) = self.scene.mesh_mut(self.mesh) {
            mesh.rotation.x += self.rotation_step;
            mesh.rotation.y += self.rotation_step;
        }
        self.renderer.render(&self.scene, &self.camera);
        self.frames += 1;
    }

    /// Run one frame unless the stop hook has fired.
    pub fn advance(&mut self) -> FrameOutcome {
        if self.stop.is_stopped() {
            return FrameOutcome::Stopped;
        }
        self.tick();
        FrameOutcome::Rendered(self.frames)
    }

    /// Match camera aspect and drawing buffer to a new viewport size.
    ///
    /// Zero dimensions are clamped to 1. Returns `false` when the size is
    /// already current, in which case nothing is touched.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if self.renderer.size() == (width, height) {
            return false;
        }
        self.camera.aspect = width as f32 / height as f32;
        self.camera.update_projection_matrix();
        self.renderer.set_size(width, height);
        true
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.scene.mesh(self.mesh)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
