/*!
# Glitch Viewer

Core types for a small OpenGL viewer that renders a lit model or a
background image through glitch-effect shaders.

The core is backend-agnostic: GPU calls go through the [`GraphicsDevice`]
trait, implemented for OpenGL by the `glitch_viewer_renderer_gl` crate.

## Architecture

- **Camera**: first-person camera driven by keyboard, mouse and scroll deltas
- **ShaderProgram**: vertex + fragment program with an explicit lifecycle
  (`Uninitialized -> Initializing -> Linked | Failed`)
- **GraphicsDevice**: the GPU seam (shader, program and uniform calls)
- **ViewerState**: per-loop state replacing process-wide globals
- **FrameUniforms**: everything written to the program each frame
- **Engine**: process-wide logging hub

[`GraphicsDevice`]: crate::glitch::GraphicsDevice
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod device;
pub mod shader;
pub mod effects;
pub mod frame;
pub mod config;
pub mod state;

// Main glitch namespace module
pub mod glitch {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Camera
    pub use crate::camera::{Camera, CameraMovement};

    // Shader lifecycle
    pub use crate::shader::{ProgramState, ShaderProgram, load_shader_source};

    // GPU seam
    pub use crate::device::{
        GraphicsDevice, ProgramHandle, ShaderHandle, ShaderStage, UniformLocation,
    };

    // Per-frame data
    pub use crate::effects::{Effect, EffectFlags};
    pub use crate::frame::FrameUniforms;
    pub use crate::config::{SceneMode, ViewerConfig};
    pub use crate::state::ViewerState;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }
}

// Re-export math library at crate root
pub use glam;
