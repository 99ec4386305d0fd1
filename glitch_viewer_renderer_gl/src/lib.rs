/*!
# Glitch Viewer - OpenGL Backend

OpenGL implementation of the glitch_viewer [`GraphicsDevice`] trait, built
on the `glow` bindings. The caller owns the window and the current GL
context; this crate only turns device calls into GL calls.

[`GraphicsDevice`]: glitch_viewer::glitch::GraphicsDevice
*/

mod gl_device;

pub use gl_device::{
    check_version, gl_error_name, stage_to_gl, GlDevice, MIN_GLES_VERSION, MIN_GL_VERSION,
};

// Main glitch namespace module
pub mod glitch {
    pub use crate::gl_device::GlDevice;
}
