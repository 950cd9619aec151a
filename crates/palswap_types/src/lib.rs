//! This crate provides the core types of the `palswap` palette-swap renderer.
//!
//! # Model
//!
//! - **Index surfaces** ([`surface::IndexSurface`]): sprite images storing a palette index
//!   and an alpha value per texel instead of a color
//! - **Palette tables** ([`table::PaletteTable`]): 2D color grids, one column per index and
//!   one row per color scheme
//! - **Registry** ([`registry::PaletteRegistry`]): named tables shared by many sprites,
//!   with row reservation for effects
//! - **Resolver** ([`resolve::Resolver`]): maps one texel plus a row to a final color
//! - **Animator** ([`animate::PaletteAnimator`]): color cycling and row blending, rewriting
//!   table rows once per tick
//! - **Draw** ([`draw::DrawOrchestrator`]): paints an index surface through a palette row
//!   onto a canvas
//! - **Manifest** ([`manifest::PaletteManifest`]): tables and effects declared in TOML
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use palswap_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = PaletteRegistry::new();
//! registry.create("hero", 2, 2, vec![
//!     Color::rgb(200, 40, 40), Color::rgb(120, 20, 20),
//!     Color::rgb(40, 40, 200), Color::rgb(20, 20, 120),
//! ])?;
//!
//! let sprite = IndexSurface::new(2, 1, vec![0, 1], vec![255, 255])?;
//! let mut canvas = Canvas::new(2, 1);
//!
//! // same sprite, second color scheme
//! let palette = registry.get("hero")?;
//! draw_palette_sprite(&mut canvas, &sprite, palette, 1, &DestTransform::at(0.0, 0.0))?;
//! assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(40, 40, 200)));
//! # Ok(())
//! # }
//! ```

pub mod animate;
pub mod color;
pub mod draw;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod resolve;
pub mod surface;
pub mod table;

pub use error::{ManifestError, PaletteError};

/// `use palswap_types::prelude::*;` to import commonly used items.
pub mod prelude;
