/// Shader source loading

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a whole GLSL file
///
/// No preprocessing: the text is handed to the compiler as-is.
///
/// # Errors
///
/// `Error::ShaderSourceUnreadable` naming the path and the I/O cause.
pub fn load_shader_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        crate::viewer_error!("glitch::ShaderProgram", "Failed to open shader file {}: {}", path.display(), e);
        Error::ShaderSourceUnreadable(format!("{}: {}", path.display(), e))
    })
}
