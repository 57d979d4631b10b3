//! Perspective camera calibrated against the viewport.
//!
//! The field of view is chosen so that, on the `z = 0` plane seen from
//! `z = perspective`, one world unit spans exactly one CSS pixel. Mesh layout
//! relies on this to place planes directly from DOM pixel geometry.

use crate::constants::{CAMERA_FAR, CAMERA_NEAR};
use crate::viewport::ViewportState;
use glam::{Mat4, Vec3};

/// Vertical field of view (degrees) that maps `height` pixels onto the focal
/// plane at distance `perspective`.
#[inline]
pub fn focal_plane_fov_degrees(height: f32, perspective: f32) -> f32 {
    2.0 * ((height / 2.0) / perspective).atan() * 180.0 / std::f32::consts::PI
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub perspective: f32,
}

impl Camera {
    pub fn calibrated(viewport: &ViewportState, perspective: f32) -> Self {
        let mut cam = Self {
            eye: Vec3::new(0.0, 0.0, perspective),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: 1.0,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            perspective,
        };
        cam.calibrate(viewport);
        cam
    }

    /// Recompute aspect and field of view together from the viewport.
    pub fn calibrate(&mut self, viewport: &ViewportState) {
        self.aspect = viewport.aspect_ratio();
        self.fovy_radians = focal_plane_fov_degrees(viewport.height(), self.perspective).to_radians();
    }

    #[inline]
    pub fn fov_degrees(&self) -> f32 {
        self.fovy_radians.to_degrees()
    }

    /// World-space height visible on the focal plane (`z = 0`).
    pub fn visible_height_at_focal_plane(&self) -> f32 {
        2.0 * self.perspective * (self.fovy_radians / 2.0).tan()
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
