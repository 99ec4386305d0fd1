/// GraphicsDevice trait - shader and uniform operations of the GPU API
///
/// The trait mirrors the OpenGL program API one call at a time so that
/// [`ShaderProgram`](crate::shader::ShaderProgram) owns the sequencing
/// (compile, check, link, check, release) and backends stay thin.

use std::fmt;

use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// Pipeline stage of a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// Lowercase name used in diagnostics ("vertex", "fragment")
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque id of a compiled (or failed) stage object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque id of a program object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Location of an active uniform inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// GPU operations needed to build programs and upload uniforms
///
/// Implemented by backend devices (e.g. `GlDevice`) and by the in-crate
/// mock used in tests. Uniform uploads target the program activated by the
/// last [`use_program`](GraphicsDevice::use_program) call, as in OpenGL.
pub trait GraphicsDevice {
    // ===== STAGES =====

    /// Create an empty stage object
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle>;

    /// Replace the source of a stage object
    fn shader_source(&self, shader: ShaderHandle, source: &str);

    /// Compile the current source
    fn compile_shader(&self, shader: ShaderHandle);

    /// Whether the last compile succeeded
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;

    /// Compiler output for the last compile (may be empty)
    fn shader_info_log(&self, shader: ShaderHandle) -> String;

    /// Free a stage object. Attached stages stay alive until their program is deleted.
    fn delete_shader(&self, shader: ShaderHandle);

    // ===== PROGRAMS =====

    /// Create an empty program object
    fn create_program(&self) -> Result<ProgramHandle>;

    /// Attach a stage to a program
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);

    /// Link the attached stages
    fn link_program(&self, program: ProgramHandle);

    /// Whether the last link succeeded
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    /// Linker output for the last link (may be empty)
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// Free a program object
    fn delete_program(&self, program: ProgramHandle);

    /// Make `program` current; `None` unbinds
    fn use_program(&self, program: Option<ProgramHandle>);

    /// Program receiving uniform uploads, `None` when nothing is bound
    fn current_program(&self) -> Option<ProgramHandle>;

    // ===== UNIFORMS =====

    /// Location of an active uniform, `None` if the program does not declare it
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Upload a column-major 4x4 matrix
    fn uniform_matrix_4_f32(&self, location: UniformLocation, value: &[f32; 16]);

    /// Upload a vec3
    fn uniform_3_f32(&self, location: UniformLocation, value: [f32; 3]);

    /// Upload a float
    fn uniform_1_f32(&self, location: UniformLocation, value: f32);

    /// Upload an int (also used for sampler units)
    fn uniform_1_i32(&self, location: UniformLocation, value: i32);
}
