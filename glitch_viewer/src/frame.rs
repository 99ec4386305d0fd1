/// Per-frame uniform block
///
/// Gathers every value the viewer writes to the active program in one
/// frame, so the render loop uploads it with a single call.

use glam::{Mat4, Vec3};

use crate::config::SceneMode;
use crate::effects::EffectFlags;
use crate::error::Result;
use crate::shader::ShaderProgram;

/// Sampler unit bound to the background image
pub const BACKGROUND_TEXTURE_UNIT: i32 = 0;

/// Values uploaded to the shader program every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    /// Camera position, for specular lighting
    pub view_pos: Vec3,
    pub light_pos: Vec3,
    /// Seconds since start
    pub time: f32,
    /// Integer in [0, 100), stored as float
    pub rand: f32,
    pub effects: EffectFlags,
}

impl FrameUniforms {
    /// Model placed at the light position and scaled uniformly
    pub fn model_matrix(light_pos: Vec3, scale: f32) -> Mat4 {
        Mat4::from_translation(light_pos) * Mat4::from_scale(Vec3::splat(scale))
    }

    /// Write the block to `program`
    ///
    /// The program must be current (`use_program()` first). Matrices and
    /// lighting vectors only go out in [`SceneMode::Model`]; the background
    /// program gets its sampler unit instead. Time, rand and the effect
    /// toggles are written in both modes.
    ///
    /// # Errors
    ///
    /// `Error::ProgramUnavailable` unless the program is linked.
    pub fn upload(&self, program: &ShaderProgram, mode: SceneMode) -> Result<()> {
        match mode {
            SceneMode::Model => {
                program.set_mat4("projection", &self.projection)?;
                program.set_mat4("view", &self.view)?;
                program.set_mat4("model", &self.model)?;
                program.set_vec3("viewPos", self.view_pos)?;
                program.set_vec3("lightPos", self.light_pos)?;
            }
            SceneMode::Background => {
                program.set_int("texture1", BACKGROUND_TEXTURE_UNIT)?;
            }
        }

        program.set_float("time", self.time)?;
        program.set_float("rand", self.rand)?;
        for (name, value) in self.effects.uniform_values() {
            program.set_float(name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
