//! Row reservation bookkeeping.
//!
//! A palette row is a broadcast channel: every sprite drawn through `(table, row)` sees
//! the same colors. Anything that must animate independently needs a row of its own,
//! so rows are handed out by name here instead of as literals in calling code.

use std::collections::BTreeMap;

use crate::error::PaletteError;

/// First row handed out by automatic allocation; row 0 is the authored default.
pub const FIRST_ALLOCATABLE_ROW: u32 = 1;

/// Reserved rows of a single table, keyed by logical effect name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowAllocator {
	/// effect name -> row
	reservations: BTreeMap<String, u32>,
}

impl RowAllocator {
	/// Creates an empty allocator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Reserves the lowest free row `>= 1` for `effect`.
	///
	/// Reserving an effect that already holds a row returns that row.
	pub fn reserve(&mut self, table: &str, rows: u32, effect: &str) -> Result<u32, PaletteError> {
		if let Some(&row) = self.reservations.get(effect) {
			return Ok(row);
		}

		let row = (FIRST_ALLOCATABLE_ROW..rows)
			.find(|row| self.owner(*row).is_none())
			.ok_or_else(|| PaletteError::NoFreeRow(table.to_string()))?;

		self.reservations.insert(effect.to_string(), row);
		Ok(row)
	}

	/// Reserves a specific row (row 0 included) for `effect`.
	pub fn reserve_specific(
		&mut self,
		table: &str,
		rows: u32,
		effect: &str,
		row: u32,
	) -> Result<u32, PaletteError> {
		if row >= rows {
			return Err(PaletteError::RowOutOfRange {
				row,
				rows,
			});
		}

		match self.owner(row) {
			Some(owner) if owner == effect => return Ok(row),
			Some(owner) => {
				return Err(PaletteError::RowAlreadyReserved {
					table: table.to_string(),
					row,
					owner: owner.to_string(),
				});
			}
			None => {}
		}

		if let Some(&held) = self.reservations.get(effect) {
			return Err(PaletteError::RowAlreadyReserved {
				table: table.to_string(),
				row: held,
				owner: effect.to_string(),
			});
		}

		self.reservations.insert(effect.to_string(), row);
		Ok(row)
	}

	/// Returns the row reserved by `effect`.
	pub fn row_of(&self, effect: &str) -> Option<u32> {
		self.reservations.get(effect).copied()
	}

	/// Returns the effect holding `row`.
	pub fn owner(&self, row: u32) -> Option<&str> {
		self.reservations.iter().find(|&(_, &held)| held == row).map(|(name, _)| name.as_str())
	}

	/// Releases the reservation held by `effect`, returning its row.
	pub fn release(&mut self, effect: &str) -> Option<u32> {
		self.reservations.remove(effect)
	}

	/// Returns the number of reserved rows.
	pub fn len(&self) -> usize {
		self.reservations.len()
	}

	/// Returns `true` if no row is reserved.
	pub fn is_empty(&self) -> bool {
		self.reservations.is_empty()
	}

	/// Iterates over `(effect, row)` pairs in effect-name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
		self.reservations.iter().map(|(name, &row)| (name.as_str(), row))
	}
}
