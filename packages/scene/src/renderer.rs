//! Wireframe renderer.
//!
//! Projects every mesh edge through the camera into pixel space and hands the
//! resulting segments to a [`Surface`]. The surface is cleared to transparent
//! before each frame. Edges with an endpoint at or behind the near plane are
//! dropped.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::camera::PerspectiveCamera;
use crate::mesh::Scene;

/// A line segment in pixel coordinates, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Output target of the renderer.
pub trait Surface {
    fn set_size(&mut self, width: u32, height: u32);
    /// Clear to fully transparent.
    fn clear(&mut self);
    fn stroke(&mut self, segments: &[Segment], color: &str);
}

pub struct Renderer<S: Surface> {
    surface: S,
    width: u32,
    height: u32,
    segments: Vec<Segment>,
}

impl<S: Surface> Renderer<S> {
    pub fn new(mut surface: S, width: u32, height: u32) -> Self {
        surface.set_size(width, height);
        Self {
            surface,
            width,
            height,
            segments: Vec::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.surface.set_size(width, height);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.surface.clear();
        let view_projection = camera.view_projection();
        let viewport = Vec2::new(self.width as f32, self.height as f32);

        for mesh in scene.meshes() {
            let mvp = view_projection * mesh.model_matrix();
            self.segments.clear();
            for [a, b] in &mesh.geometry.edges {
                let (Some(pa), Some(pb)) = (
                    mesh.geometry.positions.get(*a as usize),
                    mesh.geometry.positions.get(*b as usize),
                ) else {
                    continue;
                };
                if let (Some(from), Some(to)) = (
                    project(mvp, *pa, viewport),
                    project(mvp, *pb, viewport),
                ) {
                    self.segments.push(Segment { from, to });
                }
            }
            self.surface.stroke(&self.segments, &mesh.material.color);
        }
    }
}

fn project(mvp: Mat4, point: Vec3, viewport: Vec2) -> Option<Vec2> {
    let clip: Vec4 = mvp * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    ))
}

/// A surface that draws nowhere and remembers what it was asked to do.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadlessSurface {
    pub width: u32,
    pub height: u32,
    pub clears: u64,
    pub last_stroke: usize,
    pub last_color: String,
}

impl Surface for HeadlessSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn stroke(&mut self, segments: &[Segment], color: &str) {
        self.last_stroke = segments.len();
        self.last_color = color.to_string();
    }
}
