//! Orbiting camera that circles the point cloud and always looks at the origin.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Camera on a slow two-frequency orbit around the origin.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal orbit angle in radians.
    pub azimuth: f32,
    /// Phase of the vertical bob in radians.
    pub bob: f32,
    /// Added to `azimuth` every frame.
    pub azimuth_step: f32,
    /// Added to `bob` every frame.
    pub bob_step: f32,
    /// Horizontal distance from the origin.
    pub radius: f32,
    /// Peak height of the vertical bob.
    pub bob_height: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            bob: 0.0,
            azimuth_step: 0.003,
            bob_step: 0.007,
            radius: 4.5,
            bob_height: 2.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Move one step along the orbit. Called once per rendered frame.
    pub fn advance(&mut self) {
        self.azimuth += self.azimuth_step;
        self.bob += self.bob_step;
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.azimuth.cos() * self.radius,
            self.bob.sin() * self.bob_height,
            self.azimuth.sin() * self.radius,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform data for GPU (must match `points.wgsl` Camera).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
    /// x = point size in world units, y = distance fade slope, z = fade offset, w = min alpha
    pub point_params: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
            point_params: [0.035, 0.3, 1.5, 0.2],
        }
    }

    pub fn update(&mut self, camera: &OrbitCamera, point_size: f32) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.proj = camera.projection_matrix().to_cols_array_2d();
        let pos = camera.position();
        self.position = [pos.x, pos.y, pos.z, 1.0];
        self.point_params[0] = point_size;
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
