/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Behaves like a very small GLSL driver:
/// - a stage "compiles" when its (), [] and {} delimiters balance
/// - a program links when every attached stage compiled, both stages are
///   present and each defines `main`
/// - active uniforms are the `uniform <type> <name>;` lines of the sources
/// - uploaded values are kept per program for readback
/// - deleting an attached stage only flags it; it goes away with the last
///   live program holding it

use std::cell::RefCell;
use std::collections::HashMap;

use crate::device::{
    GraphicsDevice, ProgramHandle, ShaderHandle, ShaderStage, UniformLocation,
};
use crate::error::{Error, Result};

// ============================================================================
// Mock objects
// ============================================================================

/// Value read back from a mock program
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4([f32; 16]),
    Vec3([f32; 3]),
    Float(f32),
    Int(i32),
}

#[derive(Debug)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub info_log: String,
    /// `delete_shader` called while attached to a live program
    pub flagged: bool,
    pub deleted: bool,
}

#[derive(Debug, Default)]
pub struct MockProgram {
    pub attached: Vec<u32>,
    pub linked: bool,
    pub info_log: String,
    /// Active uniform names; the index is the location
    pub uniforms: Vec<String>,
    pub values: HashMap<String, UniformValue>,
    pub deleted: bool,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: u32,
    shaders: HashMap<u32, MockShader>,
    programs: HashMap<u32, MockProgram>,
    current_program: Option<u32>,
    calls: Vec<String>,
    errors: Vec<String>,
    fail_create_program: bool,
}

impl MockState {
    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn attached_to_live_program(&self, shader: u32) -> bool {
        self.programs.values().any(|p| !p.deleted && p.attached.contains(&shader))
    }

    fn upload(&mut self, location: UniformLocation, value: UniformValue) {
        let Some(current) = self.current_program else {
            self.errors.push("uniform upload with no current program".to_string());
            return;
        };
        let Some(program) = self.programs.get_mut(&current) else {
            self.errors.push(format!("current program {} does not exist", current));
            return;
        };
        match program.uniforms.get(location.0 as usize) {
            Some(name) => {
                let name = name.clone();
                program.values.insert(name, value);
            }
            None => self
                .errors
                .push(format!("location {} is not active in program {}", location.0, current)),
        }
    }
}

// ============================================================================
// MockDevice
// ============================================================================

#[derive(Debug, Default)]
pub struct MockDevice {
    state: RefCell<MockState>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_program` calls fail
    pub fn set_fail_create_program(&self, fail: bool) {
        self.state.borrow_mut().fail_create_program = fail;
    }

    /// Readback of an uploaded uniform
    pub fn uniform_value(&self, program: ProgramHandle, name: &str) -> Option<UniformValue> {
        self.state
            .borrow()
            .programs
            .get(&program.0)
            .and_then(|p| p.values.get(name).copied())
    }

    /// Names of every device call, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// GL-style usage errors (upload without a current program, ...)
    pub fn errors(&self) -> Vec<String> {
        self.state.borrow().errors.clone()
    }

    /// Stage objects that still exist, including flagged ones kept alive by
    /// an attached program
    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.values().filter(|s| !s.deleted).count()
    }

    /// Stage objects nobody asked to delete
    pub fn leaked_shader_count(&self) -> usize {
        self.state
            .borrow()
            .shaders
            .values()
            .filter(|s| !s.deleted && !s.flagged)
            .count()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.values().filter(|p| !p.deleted).count()
    }

    fn record(&self, call: &str) {
        self.state.borrow_mut().calls.push(call.to_string());
    }
}

impl GraphicsDevice for MockDevice {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        self.record("create_shader");
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.shaders.insert(id, MockShader {
            stage,
            source: String::new(),
            compiled: false,
            info_log: String::new(),
            flagged: false,
            deleted: false,
        });
        Ok(ShaderHandle(id))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.record("shader_source");
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.0) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.record("compile_shader");
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.0) {
            match check_delimiters(&s.source) {
                Ok(()) => {
                    s.compiled = true;
                    s.info_log.clear();
                }
                Err(log) => {
                    s.compiled = false;
                    s.info_log = log;
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.state.borrow().shaders.get(&shader.0).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader.0)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record("delete_shader");
        let mut state = self.state.borrow_mut();
        let attached = state.attached_to_live_program(shader.0);
        if let Some(s) = state.shaders.get_mut(&shader.0) {
            if attached {
                s.flagged = true;
            } else {
                s.deleted = true;
            }
        }
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        self.record("create_program");
        let mut state = self.state.borrow_mut();
        if state.fail_create_program {
            return Err(Error::BackendError("mock: create_program failed".to_string()));
        }
        let id = state.allocate_id();
        state.programs.insert(id, MockProgram::default());
        Ok(ProgramHandle(id))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record("attach_shader");
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program.0) {
            p.attached.push(shader.0);
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record("link_program");
        let mut state = self.state.borrow_mut();
        let Some(attached) = state.programs.get(&program.0).map(|p| p.attached.clone()) else {
            return;
        };

        let mut errors = Vec::new();
        let mut uniforms: Vec<String> = Vec::new();
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            let shader = attached
                .iter()
                .filter_map(|id| state.shaders.get(id))
                .find(|s| s.stage == stage);
            match shader {
                None => errors.push(format!("error: no {} shader attached", stage)),
                Some(s) if !s.compiled => {
                    errors.push(format!("error: linking with uncompiled {} shader", stage))
                }
                Some(s) if !s.source.contains("void main") => {
                    errors.push(format!("error: {} shader lacks `main'", stage))
                }
                Some(s) => {
                    for name in declared_uniforms(&s.source) {
                        if !uniforms.contains(&name) {
                            uniforms.push(name);
                        }
                    }
                }
            }
        }

        if let Some(p) = state.programs.get_mut(&program.0) {
            p.linked = errors.is_empty();
            p.info_log = errors.join("\n");
            p.uniforms = if p.linked { uniforms } else { Vec::new() };
            p.values.clear();
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.state.borrow().programs.get(&program.0).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.state
            .borrow()
            .programs
            .get(&program.0)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record("delete_program");
        let mut state = self.state.borrow_mut();
        if state.current_program == Some(program.0) {
            state.current_program = None;
        }
        let attached = match state.programs.get_mut(&program.0) {
            Some(p) => {
                p.deleted = true;
                p.attached.clone()
            }
            None => return,
        };
        // Stages flagged for deletion go away with their last program
        for id in attached {
            let still_attached = state.attached_to_live_program(id);
            if let Some(s) = state.shaders.get_mut(&id) {
                if s.flagged && !still_attached {
                    s.deleted = true;
                }
            }
        }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.record("use_program");
        let mut state = self.state.borrow_mut();
        match program {
            Some(p) if !state.programs.get(&p.0).is_some_and(|p| p.linked && !p.deleted) => {
                state.errors.push(format!("use_program on unusable program {}", p.0));
            }
            _ => state.current_program = program.map(|p| p.0),
        }
    }

    fn current_program(&self) -> Option<ProgramHandle> {
        self.state.borrow().current_program.map(ProgramHandle)
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.state
            .borrow()
            .programs
            .get(&program.0)
            .and_then(|p| p.uniforms.iter().position(|u| u == name))
            .map(|index| UniformLocation(index as u32))
    }

    fn uniform_matrix_4_f32(&self, location: UniformLocation, value: &[f32; 16]) {
        self.record("uniform_matrix_4_f32");
        self.state.borrow_mut().upload(location, UniformValue::Mat4(*value));
    }

    fn uniform_3_f32(&self, location: UniformLocation, value: [f32; 3]) {
        self.record("uniform_3_f32");
        self.state.borrow_mut().upload(location, UniformValue::Vec3(value));
    }

    fn uniform_1_f32(&self, location: UniformLocation, value: f32) {
        self.record("uniform_1_f32");
        self.state.borrow_mut().upload(location, UniformValue::Float(value));
    }

    fn uniform_1_i32(&self, location: UniformLocation, value: i32) {
        self.record("uniform_1_i32");
        self.state.borrow_mut().upload(location, UniformValue::Int(value));
    }
}

// ============================================================================
// Fake compiler
// ============================================================================

/// Check (), [] and {} nesting; report the first problem GL-style
fn check_delimiters(source: &str) -> std::result::Result<(), String> {
    let mut stack: Vec<(char, usize, usize)> = Vec::new();
    for (line_index, line) in source.lines().enumerate() {
        let code = line.split("//").next().unwrap_or_default();
        for (col_index, c) in code.chars().enumerate() {
            let (line_no, col_no) = (line_index + 1, col_index + 1);
            match c {
                '(' | '[' | '{' => stack.push((c, line_no, col_no)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _, _)) if open == expected => {}
                        _ => {
                            return Err(format!(
                                "0:{}({}): error: syntax error, unexpected '{}'",
                                line_no, col_no, c
                            ))
                        }
                    }
                }
                _ => {}
            }
        }
    }
    match stack.pop() {
        Some((open, line_no, col_no)) => Err(format!(
            "0:{}({}): error: syntax error, unmatched '{}' at end of input",
            line_no, col_no, open
        )),
        None => Ok(()),
    }
}

/// Names from `uniform <type> <name>;` lines
fn declared_uniforms(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let mut tokens = line.trim().strip_prefix("uniform ")?.split_whitespace();
            let _ty = tokens.next()?;
            let name = tokens.next()?;
            let name = name.trim_end_matches(';');
            let name = name.split('[').next().unwrap_or(name);
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
