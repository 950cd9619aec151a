//! Palette tables: 2D color lookup tables of variants × indices.
//!
//! A [`PaletteTable`] is a grid of colors. Each **row** is one variant of the palette
//! (row 0 is conventionally the authored default), each **column** is one index. Column
//! *i* plays the same structural role in every row, which is what makes swapping rows
//! produce a coherent recolor.
//!
//! Lookups go through texture coordinates addressed at texel centers,
//! `u = (index + 0.5) / columns` and `v = (row + 0.5) / rows`, and are sampled with
//! nearest-neighbor, clamp-to-edge semantics. Adjacent entries are never blended.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use log::debug;

use crate::color::Color;
use crate::error::PaletteError;

/// Grid of `columns × rows` colors, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
	columns: u32,
	rows: u32,
	colors: Vec<Color>,
}

impl PaletteTable {
	/// Creates a table from row-major color data.
	///
	/// # Errors
	///
	/// - [`PaletteError::InvalidDimensions`] if `columns` or `rows` is zero
	/// - [`PaletteError::ColorCountMismatch`] if `colors.len() != columns * rows`
	pub fn new(columns: u32, rows: u32, colors: Vec<Color>) -> Result<Self, PaletteError> {
		if columns == 0 || rows == 0 {
			return Err(PaletteError::InvalidDimensions {
				columns,
				rows,
			});
		}

		let expected = (columns as usize) * (rows as usize);
		if colors.len() != expected {
			return Err(PaletteError::ColorCountMismatch {
				expected,
				actual: colors.len(),
			});
		}

		Ok(Self {
			columns,
			rows,
			colors,
		})
	}

	/// Creates a table where every row repeats the same colors.
	pub fn from_row(row: &[Color], rows: u32) -> Result<Self, PaletteError> {
		let columns = u32::try_from(row.len()).map_err(|_| PaletteError::ColorCountMismatch {
			expected: u32::MAX as usize,
			actual: row.len(),
		})?;
		let colors = (0..rows).flat_map(|_| row.iter().copied()).collect();
		Self::new(columns, rows, colors)
	}

	/// Builds a table from an image: one pixel per entry, width = columns, height = rows.
	pub fn from_image(image: &DynamicImage) -> Result<Self, PaletteError> {
		Self::from_rgba(&image.to_rgba8())
	}

	/// Builds a table from an RGBA buffer: width = columns, height = rows.
	pub fn from_rgba(image: &RgbaImage) -> Result<Self, PaletteError> {
		let colors = image.pixels().map(|&pixel| Color::from(pixel)).collect();
		Self::new(image.width(), image.height(), colors)
	}

	/// Loads a table from an image file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
		let path = path.as_ref();
		let table = Self::from_image(&image::open(path)?)?;
		debug!("Loaded palette table {}: {}", path.display(), table);
		Ok(table)
	}

	/// Converts the table to an RGBA image (width = columns, height = rows).
	pub fn to_image(&self) -> RgbaImage {
		RgbaImage::from_fn(self.columns, self.rows, |x, y| self.get(x, y).into())
	}

	/// Saves the table as an image; the format follows the file extension.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PaletteError> {
		self.to_image().save(path)?;
		Ok(())
	}

	/// Returns the number of colors per variant.
	#[inline]
	pub fn columns(&self) -> u32 {
		self.columns
	}

	/// Returns the number of variants.
	#[inline]
	pub fn rows(&self) -> u32 {
		self.rows
	}

	/// Returns all colors, row-major.
	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	/// Returns one row's colors.
	///
	/// # Errors
	///
	/// Returns [`PaletteError::RowOutOfRange`] if `row >= rows`.
	pub fn row(&self, row: u32) -> Result<&[Color], PaletteError> {
		let range = self.row_range(row)?;
		Ok(&self.colors[range])
	}

	/// Returns an iterator over all rows.
	pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Color]> {
		self.colors.chunks_exact(self.columns as usize)
	}

	/// Returns the color at `(index, row)`, clamping both to the last valid entry.
	#[inline]
	pub fn get(&self, index: u32, row: u32) -> Color {
		let index = index.min(self.columns - 1) as usize;
		let row = row.min(self.rows - 1) as usize;
		self.colors[row * self.columns as usize + index]
	}

	/// Texture coordinates of the center of entry `(index, row)`.
	#[inline]
	pub fn texel_center(&self, index: u32, row: u32) -> (f32, f32) {
		texel_center(index, row, self.columns, self.rows)
	}

	/// Samples the table at normalized coordinates with nearest-neighbor filtering.
	///
	/// Coordinates outside `[0, 1)` clamp to the edge entries.
	#[inline]
	pub fn sample_nearest(&self, u: f32, v: f32) -> Color {
		let index = nearest_texel(u, self.columns);
		let row = nearest_texel(v, self.rows);
		self.colors[(row as usize) * (self.columns as usize) + (index as usize)]
	}

	/// Overwrites one row in place.
	pub(crate) fn set_row(&mut self, row: u32, colors: &[Color]) -> Result<(), PaletteError> {
		let range = self.row_range(row)?;
		if colors.len() != range.len() {
			return Err(PaletteError::ColorCountMismatch {
				expected: range.len(),
				actual: colors.len(),
			});
		}

		self.colors[range].copy_from_slice(colors);
		Ok(())
	}

	fn row_range(&self, row: u32) -> Result<std::ops::Range<usize>, PaletteError> {
		if row >= self.rows {
			return Err(PaletteError::RowOutOfRange {
				row,
				rows: self.rows,
			});
		}

		let start = (row as usize) * (self.columns as usize);
		Ok(start..start + self.columns as usize)
	}
}

impl fmt::Display for PaletteTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Palette table: {} columns × {} rows", self.columns, self.rows)
	}
}

/// Half-texel-center coordinates of entry `(index, row)` in a `columns × rows` grid.
///
/// `u = (index + 0.5) / columns`, `v = (row + 0.5) / rows`.
#[inline]
pub fn texel_center(index: u32, row: u32, columns: u32, rows: u32) -> (f32, f32) {
	let u = (index as f32 + 0.5) / columns as f32;
	let v = (row as f32 + 0.5) / rows as f32;
	(u, v)
}

/// Nearest texel along one axis of `size` texels, clamped to `[0, size - 1]`.
#[inline]
pub fn nearest_texel(coord: f32, size: u32) -> u32 {
	let scaled = (coord * size as f32).floor();
	if scaled.is_nan() || scaled <= 0.0 {
		0
	} else {
		(scaled as u32).min(size.saturating_sub(1))
	}
}
