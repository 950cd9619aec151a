//! Benchmark helper utilities for palswap
//!
//! This module provides generators for synthetic index surfaces and palette tables.
//! All generators are seeded so every run measures the same data.

use palswap_types::color::Color;
use palswap_types::surface::IndexSurface;
use palswap_types::table::PaletteTable;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Seed shared by every generator
pub const SEED: u64 = 0x5EED_CAFE;

/// Generates an index surface with random indices below `columns`.
///
/// Roughly one texel in `transparent_every` is fully transparent (0 disables).
pub fn generate_surface(width: u32, height: u32, columns: u32, transparent_every: u32) -> IndexSurface {
	let mut rng = SmallRng::seed_from_u64(SEED);
	let count = (width as usize) * (height as usize);
	let max_index = columns.clamp(1, 256) - 1;

	let indices = (0..count).map(|_| rng.random_range(0..=max_index) as u8).collect();
	let alpha = (0..count)
		.map(|_| {
			if transparent_every > 0 && rng.random_range(0..transparent_every) == 0 {
				0
			} else {
				255
			}
		})
		.collect();

	IndexSurface::new(width, height, indices, alpha)
		.expect("index and alpha planes have the same length")
		.with_palette_columns(columns)
}

/// Generates a palette table with random opaque colors.
pub fn generate_table(columns: u32, rows: u32) -> PaletteTable {
	let mut rng = SmallRng::seed_from_u64(SEED ^ 0xFFFF);
	let colors = (0..columns * rows).map(|_| Color::rgb(rng.random(), rng.random(), rng.random())).collect();
	PaletteTable::new(columns, rows, colors).expect("benchmark tables have non-zero dimensions")
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Small sprite: 32x32 (1,024 texels)
	pub const SPRITE: (u32, u32) = (32, 32);
	/// Large sprite: 128x128 (16,384 texels)
	pub const LARGE_SPRITE: (u32, u32) = (128, 128);
	/// Full-screen layer: 320x240 (76,800 texels)
	pub const SCREEN: (u32, u32) = (320, 240);
	/// Palette width used by 256-color assets
	pub const COLUMNS: u32 = 256;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_surface() {
		let surface = generate_surface(16, 8, 4, 3);
		assert_eq!((surface.width(), surface.height()), (16, 8));
		assert_eq!(surface.palette_columns(), Some(4));
		assert!(surface.indices().iter().all(|&index| index < 4));
		assert!(surface.alpha().iter().any(|&alpha| alpha == 0));

		// seeded: identical on every call
		assert_eq!(generate_surface(16, 8, 4, 3).indices(), surface.indices());
	}

	#[test]
	fn test_generate_table() {
		let table = generate_table(sizes::COLUMNS, 4);
		assert_eq!(table.colors().len(), 1024);
		assert!(table.colors().iter().all(|color| color.a == 255));
	}
}
