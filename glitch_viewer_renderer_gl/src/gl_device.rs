/// GlDevice - OpenGL implementation of GraphicsDevice
///
/// Handles cross the trait boundary as plain `u32` names. GL never hands
/// out name 0 for shaders or programs, so a zero handle is rejected as
/// invalid before any call is made.

use std::ffi::{c_void, CStr};
use std::num::NonZeroU32;

use glow::HasContext;

use glitch_viewer::glitch::{
    Error, GraphicsDevice, ProgramHandle, Result, ShaderHandle, ShaderStage, UniformLocation,
};
use glitch_viewer::{viewer_debug, viewer_err, viewer_error, viewer_info, viewer_warn};

const LOG_SOURCE: &str = "glitch::gl";

/// Oldest desktop GL the viewer shaders (`#version 330 core`) compile on
pub const MIN_GL_VERSION: (u32, u32) = (3, 3);
/// Oldest OpenGL ES with equivalent shader support
pub const MIN_GLES_VERSION: (u32, u32) = (3, 0);

/// OpenGL device over a current `glow` context
pub struct GlDevice {
    gl: glow::Context,
}

impl GlDevice {
    /// Wrap a context that is already current on this thread
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` when the context is older than
    /// [`MIN_GL_VERSION`] (or [`MIN_GLES_VERSION`] on ES), which usually
    /// means the loader resolved nothing or picked a legacy context.
    pub fn new(gl: glow::Context) -> Result<Self> {
        let version = gl.version();
        check_version(version.major, version.minor, version.is_embedded)?;

        let device = Self { gl };
        viewer_info!(LOG_SOURCE, "OpenGL device ready ({})", device.version());
        Ok(device)
    }

    /// Load GL entry points by name
    ///
    /// # Safety
    ///
    /// A GL context must be current on the calling thread and `loader` must
    /// return valid function pointers for it.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub unsafe fn from_loader_function<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        Self::new(glow::Context::from_loader_function(loader))
    }

    /// Same as [`from_loader_function`](Self::from_loader_function) with
    /// C-string names (glutin's `get_proc_address`)
    ///
    /// # Safety
    ///
    /// Same requirements as `from_loader_function`.
    pub unsafe fn from_loader_function_cstr<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        Self::new(glow::Context::from_loader_function_cstr(loader))
    }

    /// Underlying context, for draw calls outside the shader lifecycle
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// `GL_VERSION` string
    pub fn version(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }

    /// Set the viewport, enable depth testing and clear color + depth
    pub fn begin_frame(&self, width: u32, height: u32, clear_color: [f32; 4]) {
        let [r, g, b, a] = clear_color;
        unsafe {
            self.gl.viewport(
                0,
                0,
                width.min(i32::MAX as u32) as i32,
                height.min(i32::MAX as u32) as i32,
            );
            self.gl.enable(glow::DEPTH_TEST);
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        self.check_error("begin_frame");
    }

    #[cfg(feature = "gl-error-check")]
    fn check_error(&self, operation: &str) {
        let code = unsafe { self.gl.get_error() };
        if code != glow::NO_ERROR {
            viewer_warn!(LOG_SOURCE, "{} raised {} (0x{:04X})", operation, gl_error_name(code), code);
        }
    }

    #[cfg(not(feature = "gl-error-check"))]
    fn check_error(&self, _operation: &str) {}
}

// ============================================================================
// Handle conversion
// ============================================================================

fn native_shader(handle: ShaderHandle) -> Option<glow::NativeShader> {
    let shader = NonZeroU32::new(handle.0).map(glow::NativeShader);
    if shader.is_none() {
        viewer_warn!(LOG_SOURCE, "Ignoring call on shader handle 0");
    }
    shader
}

fn native_program(handle: ProgramHandle) -> Option<glow::NativeProgram> {
    let program = NonZeroU32::new(handle.0).map(glow::NativeProgram);
    if program.is_none() {
        viewer_warn!(LOG_SOURCE, "Ignoring call on program handle 0");
    }
    program
}

fn native_location(location: UniformLocation) -> glow::NativeUniformLocation {
    glow::NativeUniformLocation(location.0)
}

/// Reject contexts too old for the viewer shaders
pub fn check_version(major: u32, minor: u32, is_embedded: bool) -> Result<()> {
    let (required, api) = if is_embedded {
        (MIN_GLES_VERSION, "OpenGL ES")
    } else {
        (MIN_GL_VERSION, "OpenGL")
    };
    if (major, minor) < required {
        viewer_error!(
            LOG_SOURCE,
            "{} {}.{} is too old, {}.{} required",
            api, major, minor, required.0, required.1
        );
        return Err(Error::InitializationFailed(format!(
            "{} {}.{} context, {}.{} or newer required",
            api, major, minor, required.0, required.1
        )));
    }
    Ok(())
}

/// GL enum for a shader stage
pub fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Symbolic name of a `glGetError` code
pub fn gl_error_name(code: u32) -> &'static str {
    match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

// ============================================================================
// GraphicsDevice
// ============================================================================

impl GraphicsDevice for GlDevice {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let shader = unsafe { self.gl.create_shader(stage_to_gl(stage)) }
            .map_err(|e| viewer_err!(LOG_SOURCE, "Failed to create {} shader: {}", stage, e))?;
        viewer_debug!(LOG_SOURCE, "Created {} shader {}", stage, shader.0);
        Ok(ShaderHandle(shader.0.get()))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.shader_source(shader, source) };
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.compile_shader(shader) };
            self.check_error("compile_shader");
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        native_shader(shader).is_some_and(|s| unsafe { self.gl.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        native_shader(shader)
            .map(|s| unsafe { self.gl.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        if let Some(native) = native_shader(shader) {
            unsafe { self.gl.delete_shader(native) };
            viewer_debug!(LOG_SOURCE, "Deleted shader {}", shader.0);
        }
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| viewer_err!(LOG_SOURCE, "Failed to create program: {}", e))?;
        Ok(ProgramHandle(program.0.get()))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        if let (Some(program), Some(shader)) = (native_program(program), native_shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        if let Some(program) = native_program(program) {
            unsafe { self.gl.link_program(program) };
            self.check_error("link_program");
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        native_program(program).is_some_and(|p| unsafe { self.gl.get_program_link_status(p) })
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        native_program(program)
            .map(|p| unsafe { self.gl.get_program_info_log(p) })
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        if let Some(native) = native_program(program) {
            unsafe { self.gl.delete_program(native) };
            viewer_debug!(LOG_SOURCE, "Deleted program {}", program.0);
        }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        let native = match program {
            Some(handle) => match native_program(handle) {
                Some(native) => Some(native),
                None => return,
            },
            None => None,
        };
        unsafe { self.gl.use_program(native) };
        self.check_error("use_program");
    }

    fn current_program(&self) -> Option<ProgramHandle> {
        let name = unsafe { self.gl.get_parameter_i32(glow::CURRENT_PROGRAM) };
        u32::try_from(name).ok().filter(|&n| n != 0).map(ProgramHandle)
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let program = native_program(program)?;
        unsafe { self.gl.get_uniform_location(program, name) }.map(|l| UniformLocation(l.0))
    }

    fn uniform_matrix_4_f32(&self, location: UniformLocation, value: &[f32; 16]) {
        let location = native_location(location);
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(&location), false, value) };
        self.check_error("uniform_matrix_4_f32");
    }

    fn uniform_3_f32(&self, location: UniformLocation, value: [f32; 3]) {
        let location = native_location(location);
        let [x, y, z] = value;
        unsafe { self.gl.uniform_3_f32(Some(&location), x, y, z) };
        self.check_error("uniform_3_f32");
    }

    fn uniform_1_f32(&self, location: UniformLocation, value: f32) {
        let location = native_location(location);
        unsafe { self.gl.uniform_1_f32(Some(&location), value) };
        self.check_error("uniform_1_f32");
    }

    fn uniform_1_i32(&self, location: UniformLocation, value: i32) {
        let location = native_location(location);
        unsafe { self.gl.uniform_1_i32(Some(&location), value) };
        self.check_error("uniform_1_i32");
    }
}

#[cfg(test)]
#[path = "gl_device_tests.rs"]
mod tests;
