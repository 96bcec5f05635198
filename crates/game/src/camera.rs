//! First-person camera.

use glam::{Mat4, Vec3};

/// Receives the locomotion core's camera output each tick.
pub trait CameraRig {
    /// Camera height above the character's feet.
    fn set_local_height(&mut self, height: f32);

    /// Yaw and pitch in radians. Positive pitch looks down.
    fn set_rotation(&mut self, yaw: f32, pitch: f32);

    /// World position of the character's feet. Rigs parented elsewhere can
    /// ignore it.
    fn set_anchor(&mut self, _feet: Vec3) {}
}

/// First-person camera state.
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    /// Feet position the camera rides on.
    pub anchor: Vec3,

    /// Height of the eye above the anchor.
    pub local_height: f32,

    /// Yaw in radians.
    pub yaw: f32,

    /// Pitch in radians.
    pub pitch: f32,

    /// Field of view in degrees.
    pub fov: f32,

    /// Near clipping plane.
    pub near: f32,

    /// Far clipping plane.
    pub far: f32,

    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            anchor: Vec3::ZERO,
            local_height: 2.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 90.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl FirstPersonCamera {
    pub fn new(fov: f32, aspect: f32) -> Self {
        Self {
            fov,
            aspect,
            ..Default::default()
        }
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        self.anchor + Vec3::Y * self.local_height
    }

    /// Get the forward direction vector.
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_pitch * cos_yaw, -sin_pitch, cos_pitch * sin_yaw)
    }

    /// Get the right direction vector.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// Get the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        Mat4::look_at_rh(eye, eye + self.forward(), Vec3::Y)
    }

    /// Get the projection matrix for rendering.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraRig for FirstPersonCamera {
    fn set_local_height(&mut self, height: f32) {
        self.local_height = height;
    }

    fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    fn set_anchor(&mut self, feet: Vec3) {
        self.anchor = feet;
    }
}
