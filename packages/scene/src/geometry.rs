//! Procedural torus-knot geometry.

use glam::Vec3;
use std::f32::consts::TAU;

/// Vertex positions plus the index pairs of the edges to draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub edges: Vec<[u32; 2]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusKnot {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    /// Windings around the axis of rotational symmetry.
    pub p: u32,
    /// Windings around the interior circle of the torus.
    pub q: u32,
}

impl Default for TorusKnot {
    fn default() -> Self {
        Self {
            radius: 10.0,
            tube: 3.0,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        }
    }
}

impl TorusKnot {
    /// Point on the knot's center curve at parameter `u`.
    fn curve_point(&self, u: f32) -> Vec3 {
        let q_over_p = self.q as f32 / self.p as f32 * u;
        let cs = q_over_p.cos();
        Vec3::new(
            self.radius * (2.0 + cs) * 0.5 * u.cos(),
            self.radius * (2.0 + cs) * 0.5 * u.sin(),
            self.radius * q_over_p.sin() * 0.5,
        )
    }

    /// Sweep a circle of radius `tube` along the curve.
    ///
    /// Produces a `(tubular + 1) x (radial + 1)` vertex grid. Each grid cell
    /// contributes three edges: along the tube, around it, and the diagonal that
    /// splits the cell into two triangles.
    pub fn build(&self) -> Geometry {
        let tubular = self.tubular_segments.max(3);
        let radial = self.radial_segments.max(3);
        let p = self.p.max(1);
        let ring = radial + 1;

        let mut positions = Vec::with_capacity(((tubular + 1) * ring) as usize);
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * p as f32 * TAU;
            let p1 = self.curve_point(u);
            let p2 = self.curve_point(u + 0.01);

            // Frenet-like frame from two nearby curve points.
            let t = p2 - p1;
            let n = p2 + p1;
            let b = t.cross(n).normalize_or_zero();
            let n = b.cross(t).normalize_or_zero();

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let cx = -self.tube * v.cos();
                let cy = self.tube * v.sin();
                positions.push(p1 + n * cx + b * cy);
            }
        }

        let mut edges = Vec::with_capacity((tubular * radial * 3) as usize);
        for i in 0..tubular {
            for j in 0..radial {
                let a = i * ring + j;
                let b = (i + 1) * ring + j;
                let d = i * ring + j + 1;
                edges.push([a, b]);
                edges.push([a, d]);
                edges.push([b, d]);
            }
        }

        Geometry { positions, edges }
    }
}
