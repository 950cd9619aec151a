//! Color cycling over an inclusive index range.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::PaletteError;

/// How a cycle range moves once it reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleMode {
	/// Colors flow in one direction and wrap around
	#[default]
	Wrap,
	/// Colors move back and forth, reversing at either end
	PingPong,
}

impl fmt::Display for CycleMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Wrap => write!(f, "wrap"),
			Self::PingPong => write!(f, "ping-pong"),
		}
	}
}

/// Lifecycle of an animated effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectState {
	/// Not advancing; colors stay as last written
	#[default]
	Idle,
	/// Advancing on every tick
	Active,
}

/// Number of whole shifts after `elapsed` at `speed` shifts per second.
#[inline]
pub fn shift_count(speed: f64, elapsed: Duration) -> u64 {
	let shifts = (elapsed.as_secs_f64() * speed).floor();
	if shifts.is_nan() || shifts <= 0.0 {
		0
	} else {
		shifts as u64
	}
}

/// Offset of a cycle of `range_size` entries after `shift` whole shifts.
///
/// Wrap mode counts `0, 1, .., size - 1, 0, ..`; ping-pong follows a triangular wave of
/// period `2 * (size - 1)`: `0, 1, .., size - 1, size - 2, .., 1, 0, 1, ..`.
/// Ranges of zero or one entry never move.
#[inline]
pub fn offset_for_shift(range_size: u32, shift: u64, mode: CycleMode) -> u32 {
	if range_size <= 1 {
		return 0;
	}

	let size = u64::from(range_size);
	let offset = match mode {
		CycleMode::Wrap => shift % size,
		CycleMode::PingPong => {
			let period = 2 * (size - 1);
			let phase = shift % period;
			if phase < size {
				phase
			} else {
				period - phase
			}
		}
	};

	offset as u32
}

/// Offset of a cycle after `elapsed` time.
///
/// Depends only on the total elapsed time, not on how it was accumulated.
pub fn compute_offset(range_size: u32, speed: f64, elapsed: Duration, mode: CycleMode) -> u32 {
	offset_for_shift(range_size, shift_count(speed, elapsed), mode)
}

/// Rotates `base[start..=end]` by `offset` into `working`.
///
/// `working[i] = base[start + (i - start + offset) % size]` for every `i` in the range;
/// entries outside the range are left untouched.
pub fn rotate_range(base: &[Color], working: &mut [Color], start: u32, end: u32, offset: u32) {
	let start = start as usize;
	let end = end as usize;
	if start > end || end >= base.len() || end >= working.len() {
		return;
	}

	let size = end - start + 1;
	let offset = offset as usize % size;
	for i in start..=end {
		working[i] = base[start + (i - start + offset) % size];
	}
}

/// An inclusive range of palette columns cycled over time.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRange {
	start: u32,
	end: u32,
	speed: f64,
	mode: CycleMode,
	elapsed: Duration,
	state: EffectState,
}

impl CycleRange {
	/// Creates an idle cycle range over columns `start..=end`.
	///
	/// `speed` is in shifts per second.
	///
	/// # Errors
	///
	/// Returns [`PaletteError::InvalidCycleRange`] if `start > end`.
	pub fn new(start: u32, end: u32, speed: f64, mode: CycleMode) -> Result<Self, PaletteError> {
		if start > end {
			return Err(PaletteError::InvalidCycleRange {
				start,
				end,
			});
		}

		Ok(Self {
			start,
			end,
			speed,
			mode,
			elapsed: Duration::ZERO,
			state: EffectState::Idle,
		})
	}

	/// Checks that the range fits a table of `columns` columns.
	pub fn check_bounds(&self, columns: u32) -> Result<(), PaletteError> {
		if self.end >= columns {
			return Err(PaletteError::RangeOutOfBounds {
				end: self.end,
				columns,
			});
		}
		Ok(())
	}

	/// First column of the range.
	pub fn start(&self) -> u32 {
		self.start
	}

	/// Last column of the range (inclusive).
	pub fn end(&self) -> u32 {
		self.end
	}

	/// Number of columns in the range.
	pub fn size(&self) -> u32 {
		self.end - self.start + 1
	}

	/// Shifts per second.
	pub fn speed(&self) -> f64 {
		self.speed
	}

	/// Cycling mode.
	pub fn mode(&self) -> CycleMode {
		self.mode
	}

	/// Time accumulated while active.
	pub fn elapsed(&self) -> Duration {
		self.elapsed
	}

	/// Current lifecycle state.
	pub fn state(&self) -> EffectState {
		self.state
	}

	/// Returns `true` while the range advances on tick.
	pub fn is_active(&self) -> bool {
		self.state == EffectState::Active
	}

	/// Starts (or resumes) advancing.
	pub fn activate(&mut self) {
		self.state = EffectState::Active;
	}

	/// Stops advancing; the accumulator is frozen.
	pub fn stop(&mut self) {
		self.state = EffectState::Idle;
	}

	/// Rewinds the accumulator to zero.
	pub fn reset(&mut self) {
		self.elapsed = Duration::ZERO;
	}

	/// Accumulates `dt` if active. Returns `true` if time was added.
	pub fn advance(&mut self, dt: Duration) -> bool {
		if !self.is_active() {
			return false;
		}
		self.elapsed = self.elapsed.saturating_add(dt);
		true
	}

	/// Current rotation offset.
	pub fn offset(&self) -> u32 {
		compute_offset(self.size(), self.speed, self.elapsed, self.mode)
	}

	/// Writes the rotated range from `base` into `working`.
	pub fn apply(&self, base: &[Color], working: &mut [Color]) {
		rotate_range(base, working, self.start, self.end, self.offset());
	}

	/// Returns `true` if the two ranges share a column.
	pub fn overlaps(&self, other: &Self) -> bool {
		self.start <= other.end && other.start <= self.end
	}
}
