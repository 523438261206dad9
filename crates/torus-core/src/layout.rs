//! Viewport-dependent scale and projection policy.

use crate::camera::Camera;
use crate::constants::*;
use crate::geometry::TorusSpec;

/// Visible area in layout units (CSS pixels on the web, logical pixels natively).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixels per layout unit.
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = if ratio > 0.0 { ratio } else { 1.0 };
        self
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Backing-store size in whole device pixels, never zero.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            ((self.width * self.pixel_ratio).max(1.0)) as u32,
            ((self.height * self.pixel_ratio).max(1.0)) as u32,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPolicy {
    pub compact_max_width: f32,
    pub compact_scale: f32,
    pub full_scale: f32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            compact_max_width: COMPACT_MAX_WIDTH,
            compact_scale: COMPACT_MESH_SCALE,
            full_scale: FULL_MESH_SCALE,
        }
    }
}

impl LayoutPolicy {
    #[inline]
    pub fn is_compact(&self, viewport: Viewport) -> bool {
        viewport.width <= self.compact_max_width
    }

    /// Torus dimensions for a mesh built at this viewport. The base radius is
    /// fixed once the mesh exists; later resizes only rescale it.
    pub fn torus_for(&self, viewport: Viewport) -> TorusSpec {
        if self.is_compact(viewport) {
            TorusSpec::compact()
        } else {
            TorusSpec::default()
        }
    }
}

/// Current layout derived from the last viewport seen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    pub is_compact: bool,
    pub mesh_scale: f32,
}

impl Layout {
    /// Layout at load. A compact viewport already gets the smaller torus from
    /// [`LayoutPolicy::torus_for`], so the mesh keeps full scale until the
    /// first resize.
    pub fn new(policy: &LayoutPolicy, viewport: Viewport) -> Self {
        Self {
            viewport,
            is_compact: policy.is_compact(viewport),
            mesh_scale: policy.full_scale,
        }
    }

    /// Recompute for a new viewport and update the camera projection.
    /// Returns the pixel size the renderer and post chain must adopt.
    pub fn apply_resize(
        &mut self,
        policy: &LayoutPolicy,
        viewport: Viewport,
        camera: &mut Camera,
    ) -> (u32, u32) {
        let is_compact = policy.is_compact(viewport);
        *self = Layout {
            viewport,
            is_compact,
            mesh_scale: if is_compact {
                policy.compact_scale
            } else {
                policy.full_scale
            },
        };
        camera.aspect = viewport.aspect();
        viewport.pixel_size()
    }
}
