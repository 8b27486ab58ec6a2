use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::api::config::CameraConfig;

/// Perspective camera on the +Z axis looking at the origin.
///
/// The world root carries the orbit rotation, so the camera itself only
/// moves in and out along Z.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub distance: f32,
    /// Viewport size in CSS pixels.
    pub viewport: [f32; 2],
}

/// GPU-side camera data: 36 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// xyz position, w = vertical fov in radians.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, distance: f32) -> Self {
        Self {
            fov: config.camera_fov,
            near: config.camera_near,
            far: config.camera_far,
            aspect: 1.0,
            distance,
            viewport: [1.0, 1.0],
        }
    }

    pub fn configure(&mut self, config: &CameraConfig) {
        self.fov = config.camera_fov;
        self.near = config.camera_near;
        self.far = config.camera_far;
    }

    /// Adopt a new viewport size. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.viewport = [width, height];
        self.aspect = width / height;
        true
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        let p = self.position();
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: [p.x, p.y, p.z, self.fov.to_radians()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&CameraConfig::default(), 10.0)
    }

    #[test]
    fn uniform_is_36_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }

    #[test]
    fn resize_sets_aspect() {
        let mut cam = camera();
        assert!(cam.resize(1920.0, 1080.0));
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert!(!cam.resize(0.0, 100.0));
        assert!(!cam.resize(f32::NAN, 100.0));
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn origin_is_in_front_of_camera() {
        let cam = camera();
        let v = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((v - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn projection_uses_config_fov() {
        let cam = camera();
        let m = cam.projection_matrix().to_cols_array_2d();
        let f = 1.0 / (20.0f32.to_radians()).tan();
        assert!((m[1][1] - f).abs() < 1e-4);
    }
}
