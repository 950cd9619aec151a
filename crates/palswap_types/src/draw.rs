//! Drawing index surfaces through a palette row.
//!
//! [`DrawOrchestrator::draw`] is the palette equivalent of a normal sprite draw: one
//! index surface, one palette table and one row are bound, the destination quad is
//! rasterized into a [`Canvas`], and every covered pixel is resolved on its own through
//! [`Resolver`]. Nothing carries over from one draw to the next, so two consecutive
//! draws of the same surface with different rows are fully independent.
//!
//! ```
//! use palswap_types::color::Color;
//! use palswap_types::draw::{Canvas, DestTransform, draw_palette_sprite};
//! use palswap_types::surface::{IndexSurface, Texel};
//! use palswap_types::table::PaletteTable;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = PaletteTable::new(2, 2, vec![
//!     Color::rgb(0, 0, 0), Color::rgb(0, 255, 0),
//!     Color::rgb(0, 0, 0), Color::rgb(255, 0, 255),
//! ])?;
//! let surface = IndexSurface::filled(2, 2, Texel::opaque(1));
//! let mut canvas = Canvas::new(4, 4);
//!
//! draw_palette_sprite(&mut canvas, &surface, &table, 0, &DestTransform::at(0.0, 0.0))?;
//! draw_palette_sprite(&mut canvas, &surface, &table, 1, &DestTransform::at(2.0, 2.0))?;
//!
//! assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(0, 255, 0)));
//! assert_eq!(canvas.pixel(3, 3), Some(Color::rgb(255, 0, 255)));
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use image::RgbaImage;

use crate::color::Color;
use crate::error::PaletteError;
use crate::registry::PaletteRegistry;
use crate::resolve::Resolver;
use crate::surface::IndexSurface;
use crate::table::{PaletteTable, nearest_texel};

/// RGBA render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
	width: u32,
	height: u32,
	pixels: Vec<Color>,
}

impl Canvas {
	/// Creates a transparent canvas.
	pub fn new(width: u32, height: u32) -> Self {
		Self::filled(width, height, Color::transparent())
	}

	/// Creates a canvas filled with one color.
	pub fn filled(width: u32, height: u32, color: Color) -> Self {
		Self {
			width,
			height,
			pixels: vec![color; (width as usize) * (height as usize)],
		}
	}

	/// Creates a canvas from an RGBA image.
	pub fn from_image(image: &RgbaImage) -> Self {
		Self {
			width: image.width(),
			height: image.height(),
			pixels: image.pixels().map(|&pixel| Color::from(pixel)).collect(),
		}
	}

	/// Converts the canvas to an RGBA image.
	pub fn to_image(&self) -> RgbaImage {
		let bytes = self.pixels.iter().flat_map(|color| color.to_array()).collect();
		RgbaImage::from_raw(self.width, self.height, bytes)
			.unwrap_or_else(|| RgbaImage::new(self.width, self.height))
	}

	/// Saves the canvas as an image; the format follows the file extension.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PaletteError> {
		self.to_image().save(path)?;
		Ok(())
	}

	/// Returns the canvas width.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the canvas height.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns all pixels, row-major.
	pub fn pixels(&self) -> &[Color] {
		&self.pixels
	}

	/// Gets a pixel, or `None` if out of bounds.
	pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
		self.offset(x, y).map(|offset| self.pixels[offset])
	}

	/// Sets a pixel. Returns `false` if out of bounds.
	pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
		match self.offset(x, y) {
			Some(offset) => {
				self.pixels[offset] = color;
				true
			}
			None => false,
		}
	}

	/// Fills the whole canvas with one color.
	pub fn clear(&mut self, color: Color) {
		self.pixels.fill(color);
	}

	fn offset(&self, x: u32, y: u32) -> Option<usize> {
		if x >= self.width || y >= self.height {
			return None;
		}
		Some((y as usize) * (self.width as usize) + (x as usize))
	}
}

/// Placement of a sprite on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestTransform {
	/// Top-left corner of the unrotated quad, in canvas pixels
	pub position: (f32, f32),
	/// Quad size in canvas pixels; `None` draws at the surface's own size
	pub size: Option<(f32, f32)>,
	/// Clockwise rotation around the quad center, in degrees
	pub rotation: f32,
	/// Mirror horizontally
	pub flip_x: bool,
	/// Mirror vertically
	pub flip_y: bool,
}

impl Default for DestTransform {
	fn default() -> Self {
		Self::at(0.0, 0.0)
	}
}

impl DestTransform {
	/// Unscaled, unrotated placement with the top-left corner at `(x, y)`.
	pub fn at(x: f32, y: f32) -> Self {
		Self {
			position: (x, y),
			size: None,
			rotation: 0.0,
			flip_x: false,
			flip_y: false,
		}
	}

	/// Sets the destination size.
	pub fn with_size(mut self, width: f32, height: f32) -> Self {
		self.size = Some((width, height));
		self
	}

	/// Sets the rotation in degrees (clockwise).
	pub fn with_rotation(mut self, degrees: f32) -> Self {
		self.rotation = degrees;
		self
	}

	/// Sets the mirroring flags.
	pub fn with_flip(mut self, flip_x: bool, flip_y: bool) -> Self {
		self.flip_x = flip_x;
		self.flip_y = flip_y;
		self
	}
}

/// Per-draw pixel counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
	/// Canvas pixels whose center fell inside the quad
	pub covered: usize,
	/// Pixels written with a palette color
	pub written: usize,
	/// Pixels skipped because their texel was transparent
	pub discarded: usize,
}

/// Binds surfaces and palette rows and rasterizes them into a canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawOrchestrator {
	resolver: Resolver,
}

impl DrawOrchestrator {
	/// Creates an orchestrator resolving with `resolver`.
	pub fn new(resolver: Resolver) -> Self {
		Self {
			resolver,
		}
	}

	/// Returns the resolver used for every pixel.
	pub fn resolver(&self) -> &Resolver {
		&self.resolver
	}

	/// Draws `surface` through `row` of `palette`.
	///
	/// # Errors
	///
	/// Configuration errors are reported before any pixel is touched:
	/// - [`PaletteError::RowOutOfRange`] if `row >= palette.rows()`
	/// - [`PaletteError::ColumnMismatch`] if the surface was authored for a different
	///   column count
	pub fn draw(
		&self,
		canvas: &mut Canvas,
		surface: &IndexSurface,
		palette: &PaletteTable,
		row: u32,
		transform: &DestTransform,
	) -> Result<DrawStats, PaletteError> {
		if row >= palette.rows() {
			return Err(PaletteError::RowOutOfRange {
				row,
				rows: palette.rows(),
			});
		}
		if let Some(expected) = surface.palette_columns() {
			if expected != palette.columns() {
				return Err(PaletteError::ColumnMismatch {
					expected,
					actual: palette.columns(),
				});
			}
		}

		let mut stats = DrawStats::default();
		let Some(quad) = Quad::new(surface, transform) else {
			return Ok(stats);
		};
		let Some((x_range, y_range)) = quad.pixel_bounds(canvas) else {
			return Ok(stats);
		};

		for y in y_range {
			for x in x_range.clone() {
				let Some((sx, sy)) = quad.source_texel(x as f32 + 0.5, y as f32 + 0.5) else {
					continue;
				};
				stats.covered += 1;

				let Some(texel) = surface.texel(sx, sy) else {
					continue;
				};
				match self.resolver.resolve(palette, texel, row) {
					Some(color) => {
						canvas.set_pixel(x, y, color);
						stats.written += 1;
					}
					None => stats.discarded += 1,
				}
			}
		}

		Ok(stats)
	}

	/// Draws through a table looked up by name in `registry`.
	pub fn draw_named(
		&self,
		canvas: &mut Canvas,
		registry: &PaletteRegistry,
		table: &str,
		surface: &IndexSurface,
		row: u32,
		transform: &DestTransform,
	) -> Result<DrawStats, PaletteError> {
		self.draw(canvas, surface, registry.get(table)?, row, transform)
	}
}

/// Draws `surface` through `row` of `palette` with the default resolver.
pub fn draw_palette_sprite(
	canvas: &mut Canvas,
	surface: &IndexSurface,
	palette: &PaletteTable,
	row: u32,
	transform: &DestTransform,
) -> Result<DrawStats, PaletteError> {
	DrawOrchestrator::default().draw(canvas, surface, palette, row, transform)
}

/// Destination quad with its inverse mapping back to surface texels.
struct Quad {
	center: (f32, f32),
	half: (f32, f32),
	size: (f32, f32),
	cos: f32,
	sin: f32,
	source: (u32, u32),
	flip: (bool, bool),
}

impl Quad {
	fn new(surface: &IndexSurface, transform: &DestTransform) -> Option<Self> {
		if surface.is_empty() {
			return None;
		}

		let size = transform.size.unwrap_or((surface.width() as f32, surface.height() as f32));
		let finite = [size.0, size.1, transform.position.0, transform.position.1, transform.rotation]
			.iter()
			.all(|value| value.is_finite());
		if !finite || size.0 <= 0.0 || size.1 <= 0.0 {
			return None;
		}

		let half = (size.0 / 2.0, size.1 / 2.0);
		let radians = transform.rotation.to_radians();
		Some(Self {
			center: (transform.position.0 + half.0, transform.position.1 + half.1),
			half,
			size,
			cos: radians.cos(),
			sin: radians.sin(),
			source: (surface.width(), surface.height()),
			flip: (transform.flip_x, transform.flip_y),
		})
	}

	/// Canvas pixel ranges that may be covered, clipped to the canvas.
	fn pixel_bounds(&self, canvas: &Canvas) -> Option<(std::ops::Range<u32>, std::ops::Range<u32>)> {
		let extent_x = self.half.0 * self.cos.abs() + self.half.1 * self.sin.abs();
		let extent_y = self.half.0 * self.sin.abs() + self.half.1 * self.cos.abs();

		let clip = |low: f32, high: f32, limit: u32| -> Option<std::ops::Range<u32>> {
			let low = low.floor().max(0.0);
			let high = high.ceil().min(limit as f32);
			if !(low < high) {
				return None;
			}
			Some(low as u32..high as u32)
		};

		let xs = clip(self.center.0 - extent_x, self.center.0 + extent_x, canvas.width())?;
		let ys = clip(self.center.1 - extent_y, self.center.1 + extent_y, canvas.height())?;
		Some((xs, ys))
	}

	/// Maps a canvas point to the surface texel under it, if inside the quad.
	fn source_texel(&self, px: f32, py: f32) -> Option<(u32, u32)> {
		let dx = px - self.center.0;
		let dy = py - self.center.1;

		// inverse of a clockwise rotation in y-down space
		let local_x = dx * self.cos + dy * self.sin + self.half.0;
		let local_y = -dx * self.sin + dy * self.cos + self.half.1;
		if local_x < 0.0 || local_y < 0.0 || local_x >= self.size.0 || local_y >= self.size.1 {
			return None;
		}

		let mut sx = nearest_texel(local_x / self.size.0, self.source.0);
		let mut sy = nearest_texel(local_y / self.size.1, self.source.1);
		if self.flip.0 {
			sx = self.source.0 - 1 - sx;
		}
		if self.flip.1 {
			sy = self.source.1 - 1 - sy;
		}
		Some((sx, sy))
	}
}
