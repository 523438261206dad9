//! Wireframe torus mesh generation.

use crate::constants::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusSpec {
    /// Distance from the torus centre to the tube centre.
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
}

impl Default for TorusSpec {
    fn default() -> Self {
        Self {
            radius: TORUS_RADIUS,
            tube: TORUS_TUBE,
            radial_segments: TORUS_RADIAL_SEGMENTS,
            tubular_segments: TORUS_TUBULAR_SEGMENTS,
        }
    }
}

impl TorusSpec {
    pub fn compact() -> Self {
        Self {
            radius: TORUS_RADIUS_COMPACT,
            ..Self::default()
        }
    }
}

/// Line-list mesh: every pair of indices is one edge.
#[derive(Clone, Debug, Default)]
pub struct WireframeMesh {
    pub positions: Vec<[f32; 3]>,
    /// Unit normals pointing away from the tube centre line.
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl WireframeMesh {
    pub fn edge_count(&self) -> usize {
        self.indices.len() / 2
    }
}

pub fn torus_wireframe(spec: &TorusSpec) -> WireframeMesh {
    let radial = spec.radial_segments.max(3);
    let tubular = spec.tubular_segments.max(3);
    let cols = tubular + 1;

    let mut positions = Vec::with_capacity(((radial + 1) * cols) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        let (sin_v, cos_v) = v.sin_cos();
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let (sin_u, cos_u) = u.sin_cos();
            let ring = spec.radius + spec.tube * cos_v;
            positions.push([ring * cos_u, ring * sin_u, spec.tube * sin_v]);
            normals.push([cos_v * cos_u, cos_v * sin_u, sin_v]);
        }
    }

    // Two triangles per quad (a,b,d) and (b,c,d); their shared diagonal b-d is
    // emitted once.
    let mut indices = Vec::with_capacity((radial * tubular * 10) as usize);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = cols * j + i - 1;
            let b = cols * (j - 1) + i - 1;
            let c = cols * (j - 1) + i;
            let d = cols * j + i;
            indices.extend_from_slice(&[a, b, b, d, d, a, b, c, c, d]);
        }
    }

    WireframeMesh {
        positions,
        normals,
        indices,
    }
}
