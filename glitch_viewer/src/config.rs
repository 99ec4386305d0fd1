/// Viewer configuration and scene mode selection

use std::path::{Path, PathBuf};

use glam::Vec3;

// ============================================================================
// SceneMode
// ============================================================================

/// What the viewer renders, picked from the command-line path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    /// Lit model with camera, projection and model matrices
    Model,
    /// Full-screen textured quad
    Background,
}

impl SceneMode {
    /// `Model` when the path mentions `.obj`, otherwise `Background`
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        if path.as_ref().to_string_lossy().contains(".obj") {
            SceneMode::Model
        } else {
            SceneMode::Background
        }
    }
}

// ============================================================================
// ViewerConfig
// ============================================================================

/// Window, camera, lighting and shader file settings
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    /// Starting camera position
    pub camera_position: Vec3,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Light position, also where the model is placed
    pub light_position: Vec3,
    /// Uniform scale applied to the model
    pub model_scale: f32,
    /// RGBA
    pub clear_color: [f32; 4],
    /// Directory holding the shader files
    pub shader_dir: PathBuf,
    pub model_vertex_shader: PathBuf,
    pub model_fragment_shader: PathBuf,
    pub background_vertex_shader: PathBuf,
    pub background_fragment_shader: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            title: "Glitch Viewer".to_string(),
            camera_position: Vec3::new(0.0, 0.0, 3.0),
            near_plane: 0.1,
            far_plane: 100.0,
            light_position: Vec3::new(0.0, -0.75, 0.0),
            model_scale: 0.35,
            clear_color: [0.05, 0.05, 0.05, 1.0],
            shader_dir: PathBuf::from("src"),
            model_vertex_shader: PathBuf::from("vertex.shd"),
            model_fragment_shader: PathBuf::from("fragment.shd"),
            background_vertex_shader: PathBuf::from("background_vertex.shd"),
            background_fragment_shader: PathBuf::from("background_fragment.shd"),
        }
    }
}

impl ViewerConfig {
    /// Width over height; a zero height counts as 1 (minimized window)
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    /// `(vertex, fragment)` shader paths for `mode`, inside `shader_dir`
    pub fn shader_paths(&self, mode: SceneMode) -> (PathBuf, PathBuf) {
        let (vertex, fragment) = match mode {
            SceneMode::Model => (&self.model_vertex_shader, &self.model_fragment_shader),
            SceneMode::Background => {
                (&self.background_vertex_shader, &self.background_fragment_shader)
            }
        };
        (self.shader_dir.join(vertex), self.shader_dir.join(fragment))
    }

    // ===== BUILDERS =====

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_camera_position(mut self, position: Vec3) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near_plane = near;
        self.far_plane = far;
        self
    }

    pub fn with_light_position(mut self, position: Vec3) -> Self {
        self.light_position = position;
        self
    }

    pub fn with_model_scale(mut self, scale: f32) -> Self {
        self.model_scale = scale;
        self
    }

    pub fn with_clear_color(mut self, rgba: [f32; 4]) -> Self {
        self.clear_color = rgba;
        self
    }

    pub fn with_shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = dir.into();
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
