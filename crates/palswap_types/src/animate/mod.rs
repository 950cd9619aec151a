//! Palette animation: color cycling and row blending.
//!
//! The animator rewrites palette rows once per tick without ever touching an index
//! surface. Two effect kinds exist:
//!
//! - **Cycle** ([`CycleRange`]): rotates an inclusive column range of one row, in wrap
//!   ("flowing") or ping-pong ("breathing") mode, driven by accumulated time.
//! - **Lerp** ([`PaletteLerp`]): blends two authored rows into a target row, driven by an
//!   externally owned blend factor.
//!
//! Every effect computes its output from a snapshot of the authored colors taken when it
//! was added, never from its own previous output, and the combined row is written back
//! with [`PaletteRegistry::update_row`].
//!
//! # Frame order
//!
//! ```
//! use std::time::Duration;
//!
//! use palswap_types::animate::{CycleMode, CycleRange, PaletteAnimator};
//! use palswap_types::color::Color;
//! use palswap_types::registry::PaletteRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = PaletteRegistry::new();
//! let water: Vec<Color> = (0..4).map(|i| Color::rgb(0, 0, 64 * i + 63)).collect();
//! registry.create("water", 4, 1, water.clone())?;
//!
//! let mut animator = PaletteAnimator::new();
//! animator.add_cycle(&registry, "water", 0, CycleRange::new(0, 3, 4.0, CycleMode::Wrap)?)?;
//!
//! // update phase
//! animator.tick(Duration::from_millis(250), &mut registry)?;
//! // draw phase: every sprite using "water" row 0 sees the shifted colors
//! assert_eq!(registry.get_row("water", 0)?[0], water[1]);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::color::Color;
use crate::error::PaletteError;
use crate::registry::PaletteRegistry;

pub mod cycle;
pub mod lerp;

pub use cycle::{CycleMode, CycleRange, EffectState, compute_offset, offset_for_shift, shift_count};
pub use lerp::{PaletteLerp, lerp_row};

/// Handle to an effect owned by a [`PaletteAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectId(u32);

impl EffectId {
	/// Returns the raw id.
	pub fn get(self) -> u32 {
		self.0
	}
}

impl fmt::Display for EffectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// What an effect does to its row.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
	/// Rotates a column range
	Cycle(CycleRange),
	/// Blends two rows into the target row
	Lerp(PaletteLerp),
}

/// One animated effect bound to a table row.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
	table: String,
	row: u32,
	kind: EffectKind,
}

impl Effect {
	/// Table the effect writes to.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Row the effect writes to.
	pub fn row(&self) -> u32 {
		self.row
	}

	/// Effect parameters and state.
	pub fn kind(&self) -> &EffectKind {
		&self.kind
	}

	/// Current lifecycle state.
	pub fn state(&self) -> EffectState {
		match &self.kind {
			EffectKind::Cycle(range) => range.state(),
			EffectKind::Lerp(lerp) => lerp.state(),
		}
	}

	fn is_active(&self) -> bool {
		self.state() == EffectState::Active
	}

	fn activate(&mut self) {
		match &mut self.kind {
			EffectKind::Cycle(range) => range.activate(),
			EffectKind::Lerp(lerp) => lerp.activate(),
		}
	}

	fn stop(&mut self) {
		match &mut self.kind {
			EffectKind::Cycle(range) => range.stop(),
			EffectKind::Lerp(lerp) => lerp.stop(),
		}
	}

	/// Rows whose authored colors this effect reads.
	fn source_rows(&self) -> Vec<u32> {
		match &self.kind {
			EffectKind::Cycle(_) => vec![self.row],
			EffectKind::Lerp(lerp) => vec![lerp.from_row(), lerp.to_row(), self.row],
		}
	}
}

type RowKey = (String, u32);

/// Owns palette effects and applies them to a [`PaletteRegistry`] once per tick.
#[derive(Debug, Clone, Default)]
pub struct PaletteAnimator {
	next_id: u32,
	effects: BTreeMap<EffectId, Effect>,

	/// Authored colors of every row an effect reads or writes
	bases: HashMap<RowKey, Vec<Color>>,
}

impl PaletteAnimator {
	/// Creates an animator with no effects.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches a cycle range to `row` of `table` and activates it.
	///
	/// # Errors
	///
	/// - [`PaletteError::UnknownTable`] / [`PaletteError::RowOutOfRange`]
	/// - [`PaletteError::RangeOutOfBounds`] if the range passes the last column
	/// - [`PaletteError::ConflictingEffect`] if the row carries a lerp or an overlapping
	///   cycle
	pub fn add_cycle(
		&mut self,
		registry: &PaletteRegistry,
		table: &str,
		row: u32,
		mut range: CycleRange,
	) -> Result<EffectId, PaletteError> {
		let palette = registry.get(table)?;
		palette.row(row)?;
		range.check_bounds(palette.columns())?;

		let conflict = self.effects_on(table, row).any(|effect| match &effect.kind {
			EffectKind::Cycle(other) => other.overlaps(&range),
			EffectKind::Lerp(_) => true,
		});
		if conflict {
			return Err(PaletteError::ConflictingEffect {
				table: table.to_string(),
				row,
			});
		}

		range.activate();
		debug!(
			"Cycling '{}' row {} columns {}..={} at {} shifts/s ({})",
			table,
			row,
			range.start(),
			range.end(),
			range.speed(),
			range.mode()
		);
		self.insert(
			registry,
			Effect {
				table: table.to_string(),
				row,
				kind: EffectKind::Cycle(range),
			},
		)
	}

	/// Attaches a row blend to `table` and activates it.
	///
	/// # Errors
	///
	/// - [`PaletteError::UnknownTable`] / [`PaletteError::RowOutOfRange`] for any of the
	///   three rows
	/// - [`PaletteError::ConflictingEffect`] if the target row already carries an effect
	pub fn add_lerp(
		&mut self,
		registry: &PaletteRegistry,
		table: &str,
		mut lerp: PaletteLerp,
	) -> Result<EffectId, PaletteError> {
		let palette = registry.get(table)?;
		for row in [lerp.from_row(), lerp.to_row(), lerp.target_row()] {
			palette.row(row)?;
		}

		let row = lerp.target_row();
		if self.effects_on(table, row).next().is_some() {
			return Err(PaletteError::ConflictingEffect {
				table: table.to_string(),
				row,
			});
		}

		lerp.activate();
		debug!(
			"Blending '{}' rows {} -> {} into row {} (t = {})",
			table,
			lerp.from_row(),
			lerp.to_row(),
			row,
			lerp.blend()
		);
		self.insert(
			registry,
			Effect {
				table: table.to_string(),
				row,
				kind: EffectKind::Lerp(lerp),
			},
		)
	}

	/// Returns an effect.
	pub fn effect(&self, id: EffectId) -> Option<&Effect> {
		self.effects.get(&id)
	}

	/// Iterates over effects in creation order.
	pub fn iter(&self) -> impl Iterator<Item = (EffectId, &Effect)> {
		self.effects.iter().map(|(&id, effect)| (id, effect))
	}

	/// Returns the number of effects.
	pub fn len(&self) -> usize {
		self.effects.len()
	}

	/// Returns `true` if there are no effects.
	pub fn is_empty(&self) -> bool {
		self.effects.is_empty()
	}

	/// Stops an effect immediately; its row keeps the colors last written.
	pub fn stop(&mut self, id: EffectId) -> Result<(), PaletteError> {
		self.effect_mut(id)?.stop();
		Ok(())
	}

	/// Resumes a stopped effect. Cycles continue from their frozen accumulator.
	pub fn resume(&mut self, id: EffectId) -> Result<(), PaletteError> {
		self.effect_mut(id)?.activate();
		Ok(())
	}

	/// Sets the blend factor of a lerp effect, clamped to `[0, 1]`.
	///
	/// The new colors are written on the next [`tick`](Self::tick).
	///
	/// # Errors
	///
	/// Returns [`PaletteError::UnknownEffect`] if `id` is not a lerp.
	pub fn set_blend(&mut self, id: EffectId, t: f32) -> Result<(), PaletteError> {
		match &mut self.effect_mut(id)?.kind {
			EffectKind::Lerp(lerp) => {
				lerp.set_blend(t);
				Ok(())
			}
			EffectKind::Cycle(_) => Err(PaletteError::UnknownEffect(id)),
		}
	}

	/// Removes an effect and restores the authored colors it was writing.
	pub fn remove(&mut self, id: EffectId, registry: &mut PaletteRegistry) -> Result<(), PaletteError> {
		let effect = self.effects.remove(&id).ok_or(PaletteError::UnknownEffect(id))?;
		let key = (effect.table.clone(), effect.row);

		if let Some(base) = self.bases.get(&key) {
			let mut restored = registry.get_row(&effect.table, effect.row)?.to_vec();
			match &effect.kind {
				EffectKind::Cycle(range) => {
					let span = range.start() as usize..=range.end() as usize;
					restored[span.clone()].copy_from_slice(&base[span]);
				}
				EffectKind::Lerp(_) => restored.copy_from_slice(base),
			}
			registry.update_row(&effect.table, effect.row, &restored)?;
		}

		for row in effect.source_rows() {
			let still_used = self
				.effects
				.values()
				.any(|other| other.table == effect.table && other.source_rows().contains(&row));
			if !still_used {
				self.bases.remove(&(effect.table.clone(), row));
			}
		}

		debug!("Removed palette effect {} from '{}' row {}", id, effect.table, effect.row);
		Ok(())
	}

	/// Advances every active effect by `dt` and rewrites their rows.
	///
	/// Each affected row is written exactly once. Returns the number of rows written.
	///
	/// Effects whose table was removed or reshaped are dropped with a warning; the rows
	/// of every other table are still written.
	pub fn tick(&mut self, dt: Duration, registry: &mut PaletteRegistry) -> Result<usize, PaletteError> {
		self.evict_stale(registry);

		for effect in self.effects.values_mut() {
			if let EffectKind::Cycle(range) = &mut effect.kind {
				range.advance(dt);
			}
		}

		// a row is rewritten when any effect on it is active, composed from all of them
		// so stopped cycles keep their frozen offset
		let mut rows: BTreeMap<RowKey, Vec<&Effect>> = BTreeMap::new();
		for effect in self.effects.values() {
			rows.entry((effect.table.clone(), effect.row)).or_default().push(effect);
		}
		rows.retain(|_, effects| effects.iter().any(|effect| effect.is_active()));

		for (key, effects) in &rows {
			let working = self.compose_row(key, effects)?;
			registry.update_row(&key.0, key.1, &working)?;
		}

		Ok(rows.len())
	}

	/// Writes the current state of every active effect without advancing time.
	pub fn refresh(&mut self, registry: &mut PaletteRegistry) -> Result<usize, PaletteError> {
		self.tick(Duration::ZERO, registry)
	}

	fn evict_stale(&mut self, registry: &PaletteRegistry) {
		let stale: BTreeSet<String> = self
			.bases
			.iter()
			.filter(|((table, row), base)| match registry.get(table) {
				Ok(palette) => *row >= palette.rows() || base.len() != palette.columns() as usize,
				Err(_) => true,
			})
			.map(|((table, _), _)| table.clone())
			.collect();

		for table in stale {
			let before = self.effects.len();
			self.effects.retain(|_, effect| effect.table != table);
			self.bases.retain(|(name, _), _| *name != table);
			warn!(
				"Dropped {} palette effects on '{}': the table was removed or resized",
				before - self.effects.len(),
				table
			);
		}
	}

	fn compose_row(&self, key: &RowKey, effects: &[&Effect]) -> Result<Vec<Color>, PaletteError> {
		let base = self.base(&key.0, key.1)?;
		let mut working = base.to_vec();

		for effect in effects {
			match &effect.kind {
				EffectKind::Cycle(range) => range.apply(base, &mut working),
				EffectKind::Lerp(lerp) => {
					let from = self.base(&key.0, lerp.from_row())?;
					let to = self.base(&key.0, lerp.to_row())?;
					working = lerp.compute(from, to)?;
				}
			}
		}

		Ok(working)
	}

	fn base(&self, table: &str, row: u32) -> Result<&[Color], PaletteError> {
		self.bases
			.get(&(table.to_string(), row))
			.map(Vec::as_slice)
			.ok_or_else(|| PaletteError::UnknownTable(table.to_string()))
	}

	fn insert(&mut self, registry: &PaletteRegistry, effect: Effect) -> Result<EffectId, PaletteError> {
		for row in effect.source_rows() {
			let key = (effect.table.clone(), row);
			if !self.bases.contains_key(&key) {
				let authored = registry.get_row(&effect.table, row)?.to_vec();
				self.bases.insert(key, authored);
			}
		}

		let id = EffectId(self.next_id);
		self.next_id += 1;
		self.effects.insert(id, effect);
		Ok(id)
	}

	fn effects_on<'a>(&'a self, table: &'a str, row: u32) -> impl Iterator<Item = &'a Effect> {
		self.effects.values().filter(move |effect| effect.table == table && effect.row == row)
	}

	fn effect_mut(&mut self, id: EffectId) -> Result<&mut Effect, PaletteError> {
		self.effects.get_mut(&id).ok_or(PaletteError::UnknownEffect(id))
	}
}
