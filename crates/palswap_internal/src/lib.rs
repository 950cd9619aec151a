//! This module is separated into its own crate to enable simple dynamic linking for `palswap`, and should not be used directly.

/// `use palswap::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export palswap_types for convenience
pub use palswap_types;

// Re-export commonly used types at crate root
pub use palswap_types::{
	ManifestError, PaletteError,
	color::Color,
	draw::{Canvas, DestTransform, draw_palette_sprite},
	registry::PaletteRegistry,
	surface::IndexSurface,
	table::PaletteTable,
};
