/// ViewerState - everything the render loop mutates between frames
///
/// Owned by the loop and passed by `&mut`; input callbacks and the frame
/// body read and write it directly, no shared globals.

use rand::Rng;

use crate::camera::{Camera, CameraMovement};
use crate::config::ViewerConfig;
use crate::effects::EffectFlags;
use crate::frame::FrameUniforms;

/// Camera, input tracking, frame timing and effect toggles
#[derive(Debug, Clone)]
pub struct ViewerState {
    camera: Camera,
    last_x: f32,
    last_y: f32,
    first_mouse: bool,
    delta_time: f32,
    /// Timestamp of the latest `begin_frame`, seconds since start
    last_frame: Option<f32>,
    effects: EffectFlags,
}

impl ViewerState {
    /// Camera at the configured start, cursor assumed at the window center
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            camera: Camera::new(config.camera_position),
            last_x: config.window_width as f32 / 2.0,
            last_y: config.window_height as f32 / 2.0,
            first_mouse: true,
            delta_time: 0.0,
            last_frame: None,
            effects: EffectFlags::empty(),
        }
    }

    // ===== FRAME TIMING =====

    /// Record the frame timestamp and return the time since the previous one
    ///
    /// The first frame has a delta of 0.
    pub fn begin_frame(&mut self, now_seconds: f32) -> f32 {
        self.delta_time = match self.last_frame {
            Some(last) => now_seconds - last,
            None => 0.0,
        };
        self.last_frame = Some(now_seconds);
        self.delta_time
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Timestamp of the current frame (0 before the first one)
    pub fn time(&self) -> f32 {
        self.last_frame.unwrap_or(0.0)
    }

    // ===== INPUT =====

    /// Held movement key, scaled by the current frame delta
    pub fn move_camera(&mut self, direction: CameraMovement) {
        self.camera.process_keyboard(direction, self.delta_time);
    }

    /// Absolute cursor position in window pixels
    ///
    /// The first event only seeds the tracking so the camera does not jump.
    /// Screen y grows downward, so the pitch offset is `last_y - y`.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        if self.first_mouse {
            self.last_x = x;
            self.last_y = y;
            self.first_mouse = false;
            return;
        }

        let x_offset = x - self.last_x;
        let y_offset = self.last_y - y;
        self.last_x = x;
        self.last_y = y;
        self.camera.process_mouse_movement(x_offset, y_offset);
    }

    pub fn scrolled(&mut self, y_offset: f32) {
        self.camera.process_mouse_scroll(y_offset);
    }

    // ===== ACCESSORS =====

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn effects(&self) -> EffectFlags {
        self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectFlags {
        &mut self.effects
    }

    // ===== UNIFORMS =====

    /// Build this frame's uniform block
    ///
    /// `rng` supplies the `rand` uniform, an integer in [0, 100).
    pub fn frame_uniforms<R: Rng>(
        &self,
        config: &ViewerConfig,
        aspect_ratio: f32,
        rng: &mut R,
    ) -> FrameUniforms {
        FrameUniforms {
            projection: self
                .camera
                .projection_matrix(aspect_ratio, config.near_plane, config.far_plane),
            view: self.camera.view_matrix(),
            model: FrameUniforms::model_matrix(config.light_position, config.model_scale),
            view_pos: self.camera.position(),
            light_pos: config.light_position,
            time: self.time(),
            rand: rng.random_range(0..100u32) as f32,
            effects: self.effects,
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
