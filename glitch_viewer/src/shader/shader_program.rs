/// ShaderProgram - vertex + fragment program with an explicit lifecycle
///
/// ```text
/// Uninitialized --init()--> Initializing --+--> Linked
///                                          +--> Failed (terminal)
/// ```
///
/// Construction only stores the two source paths. `init()` reads them,
/// compiles both stages, links, and always frees the intermediate stage
/// objects. Compile problems do not stop the sequence early: every stage
/// is compiled and the link attempted so the diagnostic report is complete.
///
/// Only a `Linked` program accepts `use_program()` and uniform uploads. The
/// linked program object is deleted when the `ShaderProgram` is dropped.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::device::{GraphicsDevice, ProgramHandle, ShaderHandle, ShaderStage, UniformLocation};
use crate::error::{Error, Result};
use crate::shader::source::load_shader_source;

const LOG_SOURCE: &str = "glitch::ShaderProgram";

/// Placeholder when a driver reports failure with an empty log
const EMPTY_LOG: &str = "(no diagnostic output)";

/// Lifecycle state of a [`ShaderProgram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    /// Paths stored, no GPU objects yet
    Uninitialized,
    /// `init()` in progress
    Initializing,
    /// Program linked and usable
    Linked,
    /// Source unreadable, compile or link failed; nothing can be used
    Failed,
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProgramState::Uninitialized => "uninitialized",
            ProgramState::Initializing => "initializing",
            ProgramState::Linked => "linked",
            ProgramState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Linked GPU program built from one vertex and one fragment source file
pub struct ShaderProgram {
    device: Rc<dyn GraphicsDevice>,
    vertex_path: PathBuf,
    fragment_path: PathBuf,
    state: ProgramState,
    handle: Option<ProgramHandle>,
    diagnostics: Option<String>,
}

impl ShaderProgram {
    /// Store the source paths. No I/O and no GPU calls happen here.
    pub fn new(
        device: Rc<dyn GraphicsDevice>,
        vertex_path: impl Into<PathBuf>,
        fragment_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            device,
            vertex_path: vertex_path.into(),
            fragment_path: fragment_path.into(),
            state: ProgramState::Uninitialized,
            handle: None,
            diagnostics: None,
        }
    }

    // ===== LIFECYCLE =====

    /// Swap both source paths before `init()`
    ///
    /// # Errors
    ///
    /// `Error::ProgramUnavailable` once initialization has started.
    pub fn set_source_paths(
        &mut self,
        vertex_path: impl Into<PathBuf>,
        fragment_path: impl Into<PathBuf>,
    ) -> Result<()> {
        if self.state != ProgramState::Uninitialized {
            return Err(Error::ProgramUnavailable(format!(
                "cannot change source paths of a {} program",
                self.state
            )));
        }
        self.vertex_path = vertex_path.into();
        self.fragment_path = fragment_path.into();
        Ok(())
    }

    /// Read both files, compile, link
    ///
    /// # Errors
    ///
    /// - `ShaderSourceUnreadable` if either file cannot be read (nothing is
    ///   created on the GPU)
    /// - `ShaderCompileOrLinkFailed` with the combined diagnostic log
    /// - `ProgramUnavailable` if `init` already ran
    ///
    /// Any error leaves the program in the terminal `Failed` state.
    pub fn init(&mut self) -> Result<()> {
        self.begin_init()?;

        let sources = load_shader_source(&self.vertex_path).and_then(|vertex| {
            load_shader_source(&self.fragment_path).map(|fragment| (vertex, fragment))
        });

        match sources {
            Ok((vertex, fragment)) => self.link_sources(&vertex, &fragment),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Same as [`init`](Self::init) with in-memory sources; the stored paths are ignored
    pub fn init_from_sources(&mut self, vertex_source: &str, fragment_source: &str) -> Result<()> {
        self.begin_init()?;
        self.link_sources(vertex_source, fragment_source)
    }

    fn begin_init(&mut self) -> Result<()> {
        if self.state != ProgramState::Uninitialized {
            return Err(Error::ProgramUnavailable(format!(
                "init called on a {} program",
                self.state
            )));
        }
        self.state = ProgramState::Initializing;
        Ok(())
    }

    fn link_sources(&mut self, vertex_source: &str, fragment_source: &str) -> Result<()> {
        match build_program(self.device.as_ref(), vertex_source, fragment_source) {
            Ok(handle) => {
                crate::viewer_info!(
                    LOG_SOURCE,
                    "Program {} linked ({} + {})",
                    handle.0,
                    self.vertex_path.display(),
                    self.fragment_path.display()
                );
                self.handle = Some(handle);
                self.state = ProgramState::Linked;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: Error) -> Error {
        self.state = ProgramState::Failed;
        self.diagnostics = Some(match err.diagnostics() {
            Some(log) => log.to_string(),
            None => err.to_string(),
        });
        err
    }

    // ===== USE =====

    /// Make this program current for subsequent draws and uniform uploads
    ///
    /// # Errors
    ///
    /// `Error::ProgramUnavailable` unless the program is `Linked`.
    pub fn use_program(&self) -> Result<()> {
        let handle = self.linked_handle()?;
        self.device.use_program(Some(handle));
        Ok(())
    }

    // ===== UNIFORMS =====
    //
    // Uploads go to the current program, as in OpenGL, so this program must
    // be current (`use_program()` first); otherwise the setters return
    // `ProgramUnavailable` instead of writing into another program. A name
    // the program does not declare is a silent no-op.

    /// Upload a 4x4 matrix (column-major)
    pub fn set_mat4(&self, name: &str, value: &Mat4) -> Result<()> {
        if let Some(location) = self.upload_location(name)? {
            self.device.uniform_matrix_4_f32(location, &value.to_cols_array());
        }
        Ok(())
    }

    /// Upload a vec3
    pub fn set_vec3(&self, name: &str, value: Vec3) -> Result<()> {
        if let Some(location) = self.upload_location(name)? {
            self.device.uniform_3_f32(location, value.to_array());
        }
        Ok(())
    }

    /// Upload a float
    pub fn set_float(&self, name: &str, value: f32) -> Result<()> {
        if let Some(location) = self.upload_location(name)? {
            self.device.uniform_1_f32(location, value);
        }
        Ok(())
    }

    /// Upload an int (sampler units included)
    pub fn set_int(&self, name: &str, value: i32) -> Result<()> {
        if let Some(location) = self.upload_location(name)? {
            self.device.uniform_1_i32(location, value);
        }
        Ok(())
    }

    /// Location of `name`; `Ok(None)` when the program does not declare it
    ///
    /// # Errors
    ///
    /// `Error::ProgramUnavailable` unless the program is `Linked`.
    pub fn uniform_location(&self, name: &str) -> Result<Option<UniformLocation>> {
        let handle = self.linked_handle()?;
        Ok(self.device.uniform_location(handle, name))
    }

    // ===== GETTERS =====

    pub fn state(&self) -> ProgramState {
        self.state
    }

    pub fn is_linked(&self) -> bool {
        self.state == ProgramState::Linked
    }

    /// GPU handle, only while `Linked`
    pub fn handle(&self) -> Option<ProgramHandle> {
        self.handle
    }

    /// Failure report, set when the program entered `Failed`
    pub fn diagnostics(&self) -> Option<&str> {
        self.diagnostics.as_deref()
    }

    pub fn vertex_path(&self) -> &Path {
        &self.vertex_path
    }

    pub fn fragment_path(&self) -> &Path {
        &self.fragment_path
    }

    /// Location for an upload; requires this program to be current
    fn upload_location(&self, name: &str) -> Result<Option<UniformLocation>> {
        let handle = self.linked_handle()?;
        if self.device.current_program() != Some(handle) {
            return Err(Error::ProgramUnavailable(format!(
                "program {} is not current, call use_program() before setting '{}'",
                handle.0, name
            )));
        }
        Ok(self.device.uniform_location(handle, name))
    }

    fn linked_handle(&self) -> Result<ProgramHandle> {
        match (self.state, self.handle) {
            (ProgramState::Linked, Some(handle)) => Ok(handle),
            (state, _) => Err(Error::ProgramUnavailable(format!("program is {}", state))),
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            crate::viewer_debug!(LOG_SOURCE, "Deleting program {}", handle.0);
            self.device.delete_program(handle);
        }
    }
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("vertex_path", &self.vertex_path)
            .field("fragment_path", &self.fragment_path)
            .field("state", &self.state)
            .field("handle", &self.handle)
            .finish()
    }
}

// ============================================================================
// Scoped GPU objects
// ============================================================================

/// Stage object deleted on every exit path of `build_program`
struct StageGuard<'a> {
    device: &'a dyn GraphicsDevice,
    handle: ShaderHandle,
    stage: ShaderStage,
    /// Compiler log when compilation failed
    failure: Option<String>,
}

impl Drop for StageGuard<'_> {
    fn drop(&mut self) {
        self.device.delete_shader(self.handle);
    }
}

/// Program object deleted unless `build_program` succeeds
struct ProgramGuard<'a> {
    device: &'a dyn GraphicsDevice,
    handle: Option<ProgramHandle>,
}

impl ProgramGuard<'_> {
    fn release(mut self) -> Option<ProgramHandle> {
        self.handle.take()
    }
}

impl Drop for ProgramGuard<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.device.delete_program(handle);
        }
    }
}

fn compile_stage<'a>(
    device: &'a dyn GraphicsDevice,
    stage: ShaderStage,
    source: &str,
) -> Result<StageGuard<'a>> {
    let handle = device.create_shader(stage)?;
    let mut guard = StageGuard { device, handle, stage, failure: None };

    device.shader_source(handle, source);
    device.compile_shader(handle);

    if !device.shader_compile_status(handle) {
        let log = non_empty_log(device.shader_info_log(handle));
        crate::viewer_error!(LOG_SOURCE, "Failed to compile {} shader:\n{}", stage, log);
        guard.failure = Some(log);
    }
    Ok(guard)
}

/// Compile, link, report. Stage objects are freed before returning.
fn build_program(
    device: &dyn GraphicsDevice,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ProgramHandle> {
    let vertex = compile_stage(device, ShaderStage::Vertex, vertex_source)?;
    let fragment = compile_stage(device, ShaderStage::Fragment, fragment_source)?;

    let handle = device.create_program()?;
    let program = ProgramGuard { device, handle: Some(handle) };

    device.attach_shader(handle, vertex.handle);
    device.attach_shader(handle, fragment.handle);
    device.link_program(handle);

    let mut report = Vec::new();
    for stage in [&vertex, &fragment] {
        if let Some(log) = &stage.failure {
            report.push(format!("{}: {}", stage.stage, log));
        }
    }
    if !device.program_link_status(handle) {
        let log = non_empty_log(device.program_info_log(handle));
        crate::viewer_error!(LOG_SOURCE, "Failed to link program {}:\n{}", handle.0, log);
        report.push(format!("link: {}", log));
    }

    if !report.is_empty() {
        return Err(Error::ShaderCompileOrLinkFailed(report.join("\n")));
    }

    program
        .release()
        .ok_or_else(|| Error::BackendError("program handle missing".to_string()))
}

fn non_empty_log(log: String) -> String {
    let trimmed = log.trim_end();
    if trimmed.is_empty() {
        EMPTY_LOG.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;
