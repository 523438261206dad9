//! Camera description and the pointer-driven drift controller.
//!
//! The drift eases the camera eye toward a target derived from the pointer
//! offset every tick. The X and Y easing factors differ by an order of
//! magnitude, so vertical motion settles much faster than horizontal motion.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Point the camera at `focus`.
    pub fn look_at(&mut self, focus: Vec3) {
        self.target = focus;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::from(CAMERA_START), 1.0)
    }
}

/// Pointer position relative to the viewport centre, in world-ish units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    /// Map client pixel coordinates to an offset from the viewport centre.
    #[inline]
    pub fn from_client(
        client_x: f32,
        client_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        divisor: f32,
    ) -> Self {
        let half_x = viewport_width / 2.0;
        let half_y = viewport_height / 2.0;
        Self {
            x: (client_x - half_x) / divisor,
            y: (client_y - half_y) / divisor,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraDrift {
    pub kx: f32,
    pub ky: f32,
}

impl Default for CameraDrift {
    fn default() -> Self {
        Self {
            kx: CAMERA_DRIFT_X,
            ky: CAMERA_DRIFT_Y,
        }
    }
}

impl CameraDrift {
    /// One easing step of the eye toward `(pointer.x, -pointer.y)`.
    /// Screen Y grows downward, hence the sign flip.
    #[inline]
    pub fn step(&self, camera: &mut Camera, pointer: PointerOffset) {
        camera.eye.x += (pointer.x - camera.eye.x) * self.kx;
        camera.eye.y += (-pointer.y - camera.eye.y) * self.ky;
    }
}
