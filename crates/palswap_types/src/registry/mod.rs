//! Named palette table registry.
//!
//! [`PaletteRegistry`] owns every [`PaletteTable`] by name and is the only place tables
//! are mutated at runtime. Many sprites may draw through the same table; a row rewrite
//! via [`PaletteRegistry::update_row`] is seen by every one of them on the next draw.
//!
//! # Examples
//!
//! ```
//! use palswap_types::color::Color;
//! use palswap_types::registry::PaletteRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = PaletteRegistry::new();
//! registry.create("slime", 2, 2, vec![
//!     Color::rgb(0, 128, 0), Color::rgb(0, 255, 0),   // row 0: green
//!     Color::rgb(128, 0, 0), Color::rgb(255, 0, 0),   // row 1: red
//! ])?;
//!
//! // give a status effect its own row
//! let row = registry.reserve_row("slime", "enraged")?;
//! registry.update_row("slime", row, &[Color::rgb(64, 0, 0), Color::rgb(200, 0, 0)])?;
//!
//! assert_eq!(registry.get_row("slime", 1)?[1], Color::rgb(200, 0, 0));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::color::Color;
use crate::error::PaletteError;
use crate::table::PaletteTable;

pub mod allocation;

pub use allocation::RowAllocator;

#[derive(Debug, Clone)]
struct Entry {
	table: PaletteTable,
	rows: RowAllocator,
}

/// Registry of palette tables keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
	entries: BTreeMap<String, Entry>,
}

impl PaletteRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates and registers a table from row-major colors.
	///
	/// # Errors
	///
	/// - [`PaletteError::DuplicateTable`] if `name` is taken
	/// - [`PaletteError::ColorCountMismatch`] if `colors.len() != columns * rows`
	/// - [`PaletteError::InvalidDimensions`] if either dimension is zero
	pub fn create(
		&mut self,
		name: &str,
		columns: u32,
		rows: u32,
		colors: Vec<Color>,
	) -> Result<&PaletteTable, PaletteError> {
		self.ensure_vacant(name)?;
		let table = PaletteTable::new(columns, rows, colors)?;
		self.insert_unchecked(name, table)
	}

	/// Registers a table built elsewhere (e.g. loaded from an image).
	pub fn insert(&mut self, name: &str, table: PaletteTable) -> Result<&PaletteTable, PaletteError> {
		self.ensure_vacant(name)?;
		self.insert_unchecked(name, table)
	}

	/// Returns the table registered as `name`.
	pub fn get(&self, name: &str) -> Result<&PaletteTable, PaletteError> {
		self.entry(name).map(|entry| &entry.table)
	}

	/// Returns a read-only view of one row.
	///
	/// # Errors
	///
	/// Returns [`PaletteError::UnknownTable`] or [`PaletteError::RowOutOfRange`].
	pub fn get_row(&self, name: &str, row: u32) -> Result<&[Color], PaletteError> {
		self.get(name)?.row(row)
	}

	/// Overwrites one row in place.
	///
	/// `colors.len()` must equal the table's column count. Any draw through this table
	/// after the call observes the new colors.
	pub fn update_row(&mut self, name: &str, row: u32, colors: &[Color]) -> Result<(), PaletteError> {
		self.entry_mut(name)?.table.set_row(row, colors)
	}

	/// Returns `true` if `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Iterates over registered names in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Iterates over `(name, table)` pairs in name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PaletteTable)> {
		self.entries.iter().map(|(name, entry)| (name.as_str(), &entry.table))
	}

	/// Returns the number of registered tables.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if no table is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Unregisters a table and drops its row reservations.
	pub fn remove(&mut self, name: &str) -> Result<PaletteTable, PaletteError> {
		let entry =
			self.entries.remove(name).ok_or_else(|| PaletteError::UnknownTable(name.to_string()))?;
		debug!("Removed palette table '{}' ({} reserved rows)", name, entry.rows.len());
		Ok(entry.table)
	}

	/// Unregisters every table.
	pub fn clear(&mut self) {
		debug!("Clearing {} palette tables", self.entries.len());
		self.entries.clear();
	}

	/// Reserves the lowest free row `>= 1` of `table` for `effect`.
	///
	/// Row 0 stays the authored default. Reserving the same effect twice returns the
	/// same row.
	pub fn reserve_row(&mut self, table: &str, effect: &str) -> Result<u32, PaletteError> {
		let entry = self.entry_mut(table)?;
		let row = entry.rows.reserve(table, entry.table.rows(), effect)?;
		debug!("Reserved row {} of '{}' for '{}'", row, table, effect);
		Ok(row)
	}

	/// Reserves a specific row of `table` for `effect`.
	pub fn reserve_specific_row(
		&mut self,
		table: &str,
		effect: &str,
		row: u32,
	) -> Result<u32, PaletteError> {
		let entry = self.entry_mut(table)?;
		entry.rows.reserve_specific(table, entry.table.rows(), effect, row)
	}

	/// Returns the row `effect` holds in `table`.
	pub fn reserved_row(&self, table: &str, effect: &str) -> Result<Option<u32>, PaletteError> {
		Ok(self.entry(table)?.rows.row_of(effect))
	}

	/// Releases the row `effect` holds in `table`.
	pub fn release_row(&mut self, table: &str, effect: &str) -> Result<u32, PaletteError> {
		self.entry_mut(table)?.rows.release(effect).ok_or_else(|| PaletteError::UnknownReservation {
			table: table.to_string(),
			effect: effect.to_string(),
		})
	}

	/// Returns the reservations of `table`.
	pub fn reservations(&self, table: &str) -> Result<&RowAllocator, PaletteError> {
		self.entry(table).map(|entry| &entry.rows)
	}

	fn ensure_vacant(&self, name: &str) -> Result<(), PaletteError> {
		if self.contains(name) {
			return Err(PaletteError::DuplicateTable(name.to_string()));
		}
		Ok(())
	}

	fn insert_unchecked(
		&mut self,
		name: &str,
		table: PaletteTable,
	) -> Result<&PaletteTable, PaletteError> {
		debug!("Registered palette table '{}': {}", name, table);
		let entry = self.entries.entry(name.to_string()).or_insert(Entry {
			table,
			rows: RowAllocator::new(),
		});
		Ok(&entry.table)
	}

	fn entry(&self, name: &str) -> Result<&Entry, PaletteError> {
		self.entries.get(name).ok_or_else(|| PaletteError::UnknownTable(name.to_string()))
	}

	fn entry_mut(&mut self, name: &str) -> Result<&mut Entry, PaletteError> {
		self.entries.get_mut(name).ok_or_else(|| PaletteError::UnknownTable(name.to_string()))
	}
}
