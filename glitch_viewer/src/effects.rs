/// Glitch effects toggled from the control panel
///
/// Every effect maps to one float uniform in the shaders (`<name>_check`),
/// written as 1.0 when enabled and 0.0 otherwise.

use std::fmt;

use bitflags::bitflags;

/// One glitch effect, in panel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Lightning,
    UvShift,
    HorizontalLines,
    VerticalLines,
    SmallBlocks,
    RgbShift,
    FullNoise,
    VerticalShift,
}

impl Effect {
    /// All effects in panel order
    pub const ALL: [Effect; 8] = [
        Effect::Lightning,
        Effect::UvShift,
        Effect::HorizontalLines,
        Effect::VerticalLines,
        Effect::SmallBlocks,
        Effect::RgbShift,
        Effect::FullNoise,
        Effect::VerticalShift,
    ];

    /// Checkbox label
    pub fn label(&self) -> &'static str {
        match self {
            Effect::Lightning => "lightning",
            Effect::UvShift => "uv shift",
            Effect::HorizontalLines => "horizontal lines",
            Effect::VerticalLines => "vertical lines",
            Effect::SmallBlocks => "small blocks",
            Effect::RgbShift => "rgb shift",
            Effect::FullNoise => "full noise",
            Effect::VerticalShift => "vertical shift",
        }
    }

    /// Float uniform carrying the toggle
    pub fn uniform_name(&self) -> &'static str {
        match self {
            Effect::Lightning => "lightning_check",
            Effect::UvShift => "uv_shift_check",
            Effect::HorizontalLines => "horizontal_lines_check",
            Effect::VerticalLines => "vertical_lines_check",
            Effect::SmallBlocks => "small_blocks_check",
            Effect::RgbShift => "rgb_shift_check",
            Effect::FullNoise => "full_noise_check",
            Effect::VerticalShift => "vertical_shift_check",
        }
    }

    fn flag(&self) -> EffectFlags {
        match self {
            Effect::Lightning => EffectFlags::LIGHTNING,
            Effect::UvShift => EffectFlags::UV_SHIFT,
            Effect::HorizontalLines => EffectFlags::HORIZONTAL_LINES,
            Effect::VerticalLines => EffectFlags::VERTICAL_LINES,
            Effect::SmallBlocks => EffectFlags::SMALL_BLOCKS,
            Effect::RgbShift => EffectFlags::RGB_SHIFT,
            Effect::FullNoise => EffectFlags::FULL_NOISE,
            Effect::VerticalShift => EffectFlags::VERTICAL_SHIFT,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

bitflags! {
    /// Set of enabled effects. Everything starts disabled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EffectFlags: u8 {
        const LIGHTNING        = 1 << 0;
        const UV_SHIFT         = 1 << 1;
        const HORIZONTAL_LINES = 1 << 2;
        const VERTICAL_LINES   = 1 << 3;
        const SMALL_BLOCKS     = 1 << 4;
        const RGB_SHIFT        = 1 << 5;
        const FULL_NOISE       = 1 << 6;
        const VERTICAL_SHIFT   = 1 << 7;
    }
}

impl EffectFlags {
    /// Whether `effect` is enabled
    pub fn is_enabled(&self, effect: Effect) -> bool {
        self.contains(effect.flag())
    }

    /// Enable or disable `effect`
    pub fn set_effect(&mut self, effect: Effect, enabled: bool) {
        self.set(effect.flag(), enabled);
    }

    /// Flip `effect` (checkbox click)
    pub fn toggle_effect(&mut self, effect: Effect) {
        self.toggle(effect.flag());
    }

    /// Enabled effects in panel order
    pub fn enabled(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(move |e| self.is_enabled(*e))
    }

    /// `(uniform name, 0.0 | 1.0)` for all eight effects, in panel order
    pub fn uniform_values(&self) -> [(&'static str, f32); 8] {
        Effect::ALL.map(|effect| {
            let value = if self.is_enabled(effect) { 1.0 } else { 0.0 };
            (effect.uniform_name(), value)
        })
    }
}

#[cfg(test)]
#[path = "effects_tests.rs"]
mod tests;
