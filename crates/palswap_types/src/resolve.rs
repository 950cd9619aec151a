//! Per-pixel palette resolution.
//!
//! The resolver maps one `(index, alpha)` texel and a chosen palette row to the exact
//! color to write:
//!
//! 1. texels below the alpha threshold are discarded before the palette is touched
//! 2. index and row are clamped into the table
//! 3. the entry is addressed at its texel center and sampled nearest-neighbor
//!
//! The sampled color is returned verbatim; it is never blended with a neighbor.

use crate::color::Color;
use crate::surface::Texel;
use crate::table::{PaletteTable, texel_center};

/// Default alpha below which a texel is discarded.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 0x80;

/// A color lookup table sampled at normalized texture coordinates.
pub trait PaletteSampler {
	/// Returns `(columns, rows)`; both must be non-zero.
	fn dimensions(&self) -> (u32, u32);

	/// Returns the entry containing `(u, v)`, with nearest-neighbor semantics.
	fn sample(&self, u: f32, v: f32) -> Color;
}

impl PaletteSampler for PaletteTable {
	#[inline]
	fn dimensions(&self) -> (u32, u32) {
		(self.columns(), self.rows())
	}

	#[inline]
	fn sample(&self, u: f32, v: f32) -> Color {
		self.sample_nearest(u, v)
	}
}

impl<T: PaletteSampler + ?Sized> PaletteSampler for &T {
	fn dimensions(&self) -> (u32, u32) {
		(**self).dimensions()
	}

	fn sample(&self, u: f32, v: f32) -> Color {
		(**self).sample(u, v)
	}
}

/// Resolves texels to palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
	alpha_threshold: u8,
}

impl Default for Resolver {
	fn default() -> Self {
		Self {
			alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
		}
	}
}

impl Resolver {
	/// Creates a resolver that discards texels with `alpha < alpha_threshold`.
	///
	/// A threshold of 0 makes every texel opaque.
	pub fn new(alpha_threshold: u8) -> Self {
		Self {
			alpha_threshold,
		}
	}

	/// Returns the discard threshold.
	pub fn alpha_threshold(&self) -> u8 {
		self.alpha_threshold
	}

	/// Returns `true` if the texel is discarded without a palette lookup.
	#[inline]
	pub fn is_discarded(&self, texel: Texel) -> bool {
		texel.alpha < self.alpha_threshold
	}

	/// Resolves one texel against `row` of `palette`.
	///
	/// Returns `None` for discarded texels, which must not be written. Indices and rows
	/// past the end of the table resolve to the last valid entry.
	#[inline]
	pub fn resolve<S: PaletteSampler + ?Sized>(
		&self,
		palette: &S,
		texel: Texel,
		row: u32,
	) -> Option<Color> {
		if self.is_discarded(texel) {
			return None;
		}

		let (columns, rows) = palette.dimensions();
		let index = u32::from(texel.index).min(columns.saturating_sub(1));
		let row = row.min(rows.saturating_sub(1));

		let (u, v) = texel_center(index, row, columns, rows);
		Some(palette.sample(u, v))
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	/// Sampler that counts lookups.
	struct CountingSampler {
		table: PaletteTable,
		lookups: Cell<usize>,
	}

	impl PaletteSampler for CountingSampler {
		fn dimensions(&self) -> (u32, u32) {
			self.table.dimensions()
		}

		fn sample(&self, u: f32, v: f32) -> Color {
			self.lookups.set(self.lookups.get() + 1);
			self.table.sample(u, v)
		}
	}

	const RED: Color = Color::rgb(255, 0, 0);
	const BLUE: Color = Color::rgb(0, 0, 255);

	/// Every horizontally and vertically adjacent pair differs maximally.
	fn checker_table(columns: u32, rows: u32) -> PaletteTable {
		let colors = (0..rows)
			.flat_map(|row| {
				(0..columns).map(move |index| {
					if (index + row) % 2 == 0 {
						RED
					} else {
						BLUE
					}
				})
			})
			.collect();
		PaletteTable::new(columns, rows, colors).unwrap()
	}

	#[test]
	fn test_sampling_center_returns_exact_cell() {
		let resolver = Resolver::default();

		for (columns, rows) in [(2, 1), (3, 3), (16, 4), (7, 5), (256, 8), (255, 3)] {
			let table = checker_table(columns, rows);
			for row in 0..rows {
				for index in 0..columns.min(256) {
					let color = resolver.resolve(&table, Texel::opaque(index as u8), row).unwrap();
					let expected = if (index + row) % 2 == 0 {
						RED
					} else {
						BLUE
					};
					assert_eq!(color, expected, "{columns}x{rows} table, entry ({index}, {row})");
				}
			}
		}
	}

	#[test]
	fn test_resolves_distinct_entries() {
		let colors: Vec<_> = (0..=255u8).map(|i| Color::new(i, 255 - i, i / 2, 255)).collect();
		let table = PaletteTable::new(64, 4, colors.clone()).unwrap();
		let resolver = Resolver::default();

		for row in 0..4u32 {
			for index in 0..64u8 {
				let expected = colors[(row as usize) * 64 + index as usize];
				assert_eq!(resolver.resolve(&table, Texel::opaque(index), row), Some(expected));
			}
		}
	}

	#[test]
	fn test_out_of_range_clamps_to_last_entry() {
		let table = checker_table(4, 2);
		let resolver = Resolver::default();

		assert_eq!(resolver.resolve(&table, Texel::opaque(200), 0), Some(table.get(3, 0)));
		assert_eq!(resolver.resolve(&table, Texel::opaque(1), 9), Some(table.get(1, 1)));
		assert_eq!(resolver.resolve(&table, Texel::opaque(255), 255), Some(table.get(3, 1)));
	}

	#[test]
	fn test_transparent_texels_skip_lookup() {
		let sampler = CountingSampler {
			table: checker_table(4, 2),
			lookups: Cell::new(0),
		};
		let resolver = Resolver::default();

		for index in [0u8, 3, 4, 200, 255] {
			for alpha in [0u8, 1, 0x7F] {
				assert_eq!(resolver.resolve(&sampler, Texel::new(index, alpha), 0), None);
				assert_eq!(resolver.resolve(&sampler, Texel::new(index, alpha), 77), None);
			}
		}
		assert_eq!(sampler.lookups.get(), 0);

		assert!(resolver.resolve(&sampler, Texel::new(2, 0x80), 1).is_some());
		assert_eq!(sampler.lookups.get(), 1);
	}

	#[test]
	fn test_custom_threshold() {
		let table = checker_table(2, 1);

		let everything = Resolver::new(0);
		assert_eq!(everything.resolve(&table, Texel::new(1, 0), 0), Some(BLUE));

		let strict = Resolver::new(0xFF);
		assert_eq!(strict.resolve(&table, Texel::new(1, 0xFE), 0), None);
		assert_eq!(strict.resolve(&table, Texel::new(1, 0xFF), 0), Some(BLUE));
	}

	#[test]
	fn test_palette_alpha_is_copied_verbatim() {
		let glass = Color::new(10, 20, 30, 40);
		let table = PaletteTable::new(1, 1, vec![glass]).unwrap();
		assert_eq!(Resolver::default().resolve(&table, Texel::opaque(0), 0), Some(glass));
	}
}
