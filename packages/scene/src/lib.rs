//! # Scene crate — the decorative background render loop
//!
//! A scene with one continuously rotating torus knot, seen through a perspective
//! camera and drawn as a wireframe. This domain runs on the display refresh
//! cadence and shares no state with the request domain.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`camera`] | [`PerspectiveCamera`]: field of view, aspect, clip planes, projection matrix |
//! | [`geometry`] | Torus-knot vertex grid and its wireframe edges |
//! | [`mesh`] | [`Mesh`], [`Material`] and the [`Scene`] that holds them |
//! | [`renderer`] | [`Renderer`] projecting edges onto a [`Surface`] |
//! | [`render_loop`] | [`RenderLoop`]: per-frame tick, resize handling, stop hook |
//! | [`config`] | [`SceneConfig`], the `[scene]` configuration section |
//! | `web` (wasm only) | Canvas surface, `requestAnimationFrame` driver, resize listener |

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod render_loop;
pub mod renderer;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use camera::PerspectiveCamera;
pub use config::SceneConfig;
pub use error::SceneError;
pub use geometry::{Geometry, TorusKnot};
pub use mesh::{Material, Mesh, MeshId, Scene};
pub use render_loop::{FrameOutcome, RenderLoop, StopHandle};
pub use renderer::{HeadlessSurface, Renderer, Segment, Surface};
