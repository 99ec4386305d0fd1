//! Shader module - GLSL source loading and program lifecycle.

mod shader_program;
pub mod source;

pub use shader_program::{ProgramState, ShaderProgram};
pub use source::load_shader_source;
