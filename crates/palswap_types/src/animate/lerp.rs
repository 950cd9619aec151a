//! Blending between two full palette rows.

use super::cycle::EffectState;
use crate::color::Color;
use crate::error::PaletteError;

/// Blends two rows component-wise over RGBA.
///
/// `lerp_row(a, b, 0.0) == a` and `lerp_row(a, b, 1.0) == b` exactly.
///
/// # Errors
///
/// Returns [`PaletteError::ColorCountMismatch`] if the rows differ in length.
pub fn lerp_row(a: &[Color], b: &[Color], t: f32) -> Result<Vec<Color>, PaletteError> {
	if a.len() != b.len() {
		return Err(PaletteError::ColorCountMismatch {
			expected: a.len(),
			actual: b.len(),
		});
	}

	Ok(a.iter().zip(b).map(|(&from, &to)| from.lerp(to, t)).collect())
}

/// Blends two authored rows of a table into a target row.
///
/// The blend factor is owned by the caller (a day/night clock, a damage flash); the
/// effect never advances it on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteLerp {
	from_row: u32,
	to_row: u32,
	target_row: u32,
	blend: f32,
	state: EffectState,
}

impl PaletteLerp {
	/// Creates a lerp writing `blend(from_row, to_row, blend)` into `target_row`.
	pub fn new(from_row: u32, to_row: u32, target_row: u32, blend: f32) -> Self {
		Self {
			from_row,
			to_row,
			target_row,
			blend: clamp_blend(blend),
			state: EffectState::Idle,
		}
	}

	/// Row blended from (`t = 0`).
	pub fn from_row(&self) -> u32 {
		self.from_row
	}

	/// Row blended towards (`t = 1`).
	pub fn to_row(&self) -> u32 {
		self.to_row
	}

	/// Row receiving the result.
	pub fn target_row(&self) -> u32 {
		self.target_row
	}

	/// Current blend factor in `[0, 1]`.
	pub fn blend(&self) -> f32 {
		self.blend
	}

	/// Sets the blend factor, clamped to `[0, 1]`.
	pub fn set_blend(&mut self, t: f32) {
		self.blend = clamp_blend(t);
	}

	/// Current lifecycle state.
	pub fn state(&self) -> EffectState {
		self.state
	}

	/// Returns `true` while the lerp is written on tick.
	pub fn is_active(&self) -> bool {
		self.state == EffectState::Active
	}

	/// Starts (or resumes) writing the target row.
	pub fn activate(&mut self) {
		self.state = EffectState::Active;
	}

	/// Stops writing; the target row keeps its last colors.
	pub fn stop(&mut self) {
		self.state = EffectState::Idle;
	}

	/// Blends the two source rows at the current factor.
	pub fn compute(&self, from: &[Color], to: &[Color]) -> Result<Vec<Color>, PaletteError> {
		lerp_row(from, to, self.blend)
	}
}

fn clamp_blend(t: f32) -> f32 {
	if t.is_nan() {
		0.0
	} else {
		t.clamp(0.0, 1.0)
	}
}
