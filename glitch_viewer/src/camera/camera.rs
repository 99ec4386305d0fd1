/// Camera - Euler-angle first-person camera.
///
/// Yaw and pitch (degrees) define the look direction. After every angle
/// change the `front`/`right`/`up` basis is rebuilt from them, with
/// `world_up` as the fixed polar axis, so the three vectors always form an
/// orthonormal right-handed triple.
///
/// Out-of-range input is absorbed by clamping, never rejected:
/// - pitch is kept in `[-PITCH_LIMIT, PITCH_LIMIT]`
/// - zoom is kept in `[ZOOM_MIN, ZOOM_MAX]`

use glam::{Mat4, Vec3};
use winit::keyboard::KeyCode;

/// Initial yaw, in degrees. Points the camera along -Z.
pub const DEFAULT_YAW: f32 = -90.0;
/// Initial pitch, in degrees
pub const DEFAULT_PITCH: f32 = 0.0;
/// Movement speed, in world units per second
pub const DEFAULT_SPEED: f32 = 2.5;
/// Degrees of rotation per pixel of mouse movement
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Initial zoom (vertical field of view, in degrees)
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch bound in degrees. Stops the view from flipping at the poles.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view
pub const ZOOM_MIN: f32 = 1.0;
/// Widest field of view
pub const ZOOM_MAX: f32 = 45.0;

/// Discrete movement directions, relative to the current look direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along `front`
    Forward,
    /// Along `-front`
    Backward,
    /// Along `-right`
    Left,
    /// Along `right`
    Right,
}

impl CameraMovement {
    /// Every direction, in W/S/A/D order
    pub const ALL: [CameraMovement; 4] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
    ];

    /// WASD binding
    pub fn from_key_code(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW => Some(CameraMovement::Forward),
            KeyCode::KeyS => Some(CameraMovement::Backward),
            KeyCode::KeyA => Some(CameraMovement::Left),
            KeyCode::KeyD => Some(CameraMovement::Right),
            _ => None,
        }
    }

    /// Key bound to this direction
    pub fn key_code(&self) -> KeyCode {
        match self {
            CameraMovement::Forward => KeyCode::KeyW,
            CameraMovement::Backward => KeyCode::KeyS,
            CameraMovement::Left => KeyCode::KeyA,
            CameraMovement::Right => KeyCode::KeyD,
        }
    }
}

/// First-person camera
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
}

impl Camera {
    /// Create a camera at `position`, looking down -Z with a Y-up world
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    // ===== OUTPUTS =====

    /// Right-handed look-at matrix from `position` towards `position + front`
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL perspective projection using `zoom` as the vertical FOV
    pub fn projection_matrix(&self, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect_ratio, near, far)
    }

    // ===== INPUT =====

    /// Translate along the basis. `delta_time` is seconds since last frame
    /// and is expected to be non-negative.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Turn by a mouse delta in pixels. Pitch is clamped to ±`PITCH_LIMIT`.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_vectors();
    }

    /// Narrow (positive `y_offset`) or widen the field of view.
    ///
    /// The decrement applies only while zoom is inside `[ZOOM_MIN, ZOOM_MAX]`;
    /// the result is then clamped back into that range.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        if (ZOOM_MIN..=ZOOM_MAX).contains(&self.zoom) {
            self.zoom -= y_offset;
        }
        self.zoom = self.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    // ===== GETTERS =====

    /// World-space position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit look direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector (camera-local, not `world_up`)
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Fixed world up axis
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within ±`PITCH_LIMIT`
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees, always within `[ZOOM_MIN, ZOOM_MAX]`
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    // ===== SETTERS =====

    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed;
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f32) {
        self.mouse_sensitivity = sensitivity;
    }

    // ===== INTERNAL =====

    /// Spherical-to-Cartesian conversion of yaw/pitch, then Gram-Schmidt
    /// against `world_up`
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
