//! Index surfaces: images that store palette indices instead of colors.
//!
//! Every texel of an [`IndexSurface`] holds a palette index (0-255) and an alpha value.
//! The index is a structural reference ("shadow of material A"), never a color; the
//! color is picked at draw time from whichever palette row the surface is drawn with.
//!
//! # Image layout
//!
//! When loaded from an image, the red channel carries the index and the alpha channel
//! carries transparency. Green and blue are ignored, so authoring tools may use them
//! for previews.
//!
//! ```
//! use palswap_types::surface::IndexSurface;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 2x1 surface: an opaque index 3 next to a transparent texel
//! let surface = IndexSurface::new(2, 1, vec![3, 0], vec![0xFF, 0x00])?;
//!
//! let texel = surface.texel(0, 0).unwrap();
//! assert_eq!(texel.index, 3);
//! assert!(surface.texel(1, 0).unwrap().alpha == 0);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use log::{debug, warn};

use crate::error::PaletteError;

/// One sampled texel: palette index plus alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texel {
	/// Palette column this texel refers to
	pub index: u8,
	/// Transparency (0x00 = transparent, 0xFF = opaque)
	pub alpha: u8,
}

impl Texel {
	/// Creates a new texel.
	pub const fn new(index: u8, alpha: u8) -> Self {
		Self {
			index,
			alpha,
		}
	}

	/// Creates a fully opaque texel.
	pub const fn opaque(index: u8) -> Self {
		Self::new(index, 0xFF)
	}
}

/// Summary of how a surface's indices fit a palette width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexReport {
	/// Column count the surface was checked against
	pub columns: u32,
	/// Largest index used by an opaque texel, if any texel is opaque
	pub max_index: Option<u8>,
	/// Number of opaque texels whose index is `>= columns`
	pub out_of_range: usize,
}

impl IndexReport {
	/// Returns `true` when every opaque texel addresses a valid column.
	pub fn is_valid(&self) -> bool {
		self.out_of_range == 0
	}
}

/// Immutable index image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSurface {
	width: u32,
	height: u32,

	/// Palette indices, row-major
	indices: Vec<u8>,

	/// Alpha plane, row-major
	alpha: Vec<u8>,

	/// Column count of the palette this surface was authored for
	palette_columns: Option<u32>,
}

impl IndexSurface {
	/// Creates a surface from separate index and alpha planes.
	///
	/// # Errors
	///
	/// Returns [`PaletteError::SurfaceSizeMismatch`] if either plane is not exactly
	/// `width * height` bytes long.
	pub fn new(
		width: u32,
		height: u32,
		indices: Vec<u8>,
		alpha: Vec<u8>,
	) -> Result<Self, PaletteError> {
		let expected = (width as usize) * (height as usize);
		for plane in [&indices, &alpha] {
			if plane.len() != expected {
				return Err(PaletteError::SurfaceSizeMismatch {
					expected,
					actual: plane.len(),
				});
			}
		}

		Ok(Self {
			width,
			height,
			indices,
			alpha,
			palette_columns: None,
		})
	}

	/// Creates a surface where every texel has the same index and alpha.
	pub fn filled(width: u32, height: u32, texel: Texel) -> Self {
		let count = (width as usize) * (height as usize);
		Self {
			width,
			height,
			indices: vec![texel.index; count],
			alpha: vec![texel.alpha; count],
			palette_columns: None,
		}
	}

	/// Builds a surface from an image (red = index, alpha = alpha).
	pub fn from_image(image: &DynamicImage) -> Self {
		Self::from_rgba(&image.to_rgba8())
	}

	/// Builds a surface from an RGBA buffer (red = index, alpha = alpha).
	pub fn from_rgba(image: &RgbaImage) -> Self {
		let count = (image.width() as usize) * (image.height() as usize);
		let mut indices = Vec::with_capacity(count);
		let mut alpha = Vec::with_capacity(count);

		for pixel in image.pixels() {
			indices.push(pixel.0[0]);
			alpha.push(pixel.0[3]);
		}

		Self {
			width: image.width(),
			height: image.height(),
			indices,
			alpha,
			palette_columns: None,
		}
	}

	/// Loads a surface from an image file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
		let path = path.as_ref();
		let surface = Self::from_image(&image::open(path)?);
		debug!("Loaded index surface {}: {}", path.display(), surface);
		Ok(surface)
	}

	/// Records the palette column count this surface was authored for.
	///
	/// Draws through a table with a different column count are rejected.
	pub fn with_palette_columns(mut self, columns: u32) -> Self {
		self.palette_columns = Some(columns);
		self
	}

	/// Returns the surface width.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the surface height.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns `true` when the surface has no texels.
	pub fn is_empty(&self) -> bool {
		self.indices.is_empty()
	}

	/// Returns the authored palette column count, if recorded.
	pub fn palette_columns(&self) -> Option<u32> {
		self.palette_columns
	}

	/// Returns the index plane.
	pub fn indices(&self) -> &[u8] {
		&self.indices
	}

	/// Returns the alpha plane.
	pub fn alpha(&self) -> &[u8] {
		&self.alpha
	}

	/// Gets the texel at the specified coordinates, or `None` if out of bounds.
	#[inline]
	pub fn texel(&self, x: u32, y: u32) -> Option<Texel> {
		if x >= self.width || y >= self.height {
			return None;
		}
		let offset = (y as usize) * (self.width as usize) + (x as usize);
		Some(Texel::new(self.indices[offset], self.alpha[offset]))
	}

	/// Returns an iterator over the rows of the index plane.
	pub fn index_rows(&self) -> RowIterator<'_> {
		RowIterator::new(&self.indices, self.width as usize)
	}

	/// Returns an iterator over the rows of the alpha plane.
	pub fn alpha_rows(&self) -> RowIterator<'_> {
		RowIterator::new(&self.alpha, self.width as usize)
	}

	/// Returns the largest index used by a texel with non-zero alpha.
	pub fn max_opaque_index(&self) -> Option<u8> {
		self.indices
			.iter()
			.zip(&self.alpha)
			.filter(|&(_, &alpha)| alpha != 0)
			.map(|(&index, _)| index)
			.max()
	}

	/// Checks every texel with non-zero alpha against a palette width.
	///
	/// Out-of-range indices are clamped at draw time; this check reports them once
	/// per asset (with a single aggregated warning) instead of per pixel.
	pub fn validate_indices(&self, columns: u32) -> IndexReport {
		let out_of_range = self
			.index_rows()
			.zip(self.alpha_rows())
			.map(|(indices, coverage)| {
				indices
					.iter()
					.zip(coverage)
					.filter(|&(&index, &alpha)| alpha != 0 && u32::from(index) >= columns)
					.count()
			})
			.sum::<usize>();

		let report = IndexReport {
			columns,
			max_index: self.max_opaque_index(),
			out_of_range,
		};

		if !report.is_valid() {
			warn!(
				"{} texels of a {}x{} surface index past column {} (max index {:?}); they will be clamped",
				out_of_range,
				self.width,
				self.height,
				columns.saturating_sub(1),
				report.max_index
			);
		}

		report
	}
}

impl fmt::Display for IndexSurface {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} index surface", self.width, self.height)?;
		if let Some(columns) = self.palette_columns {
			write!(f, " ({} palette columns)", columns)?;
		}
		Ok(())
	}
}

/// Iterator over rows of a single surface plane.
#[derive(Debug, Clone)]
pub struct RowIterator<'a> {
	pixels: &'a [u8],
	width: usize,
	current_row: usize,
	total_rows: usize,
}

impl<'a> RowIterator<'a> {
	/// Creates a new row iterator.
	///
	/// # Arguments
	///
	/// * `pixels` - Plane data to iterate over
	/// * `width` - Width of each row
	pub fn new(pixels: &'a [u8], width: usize) -> Self {
		let total_rows = if width > 0 {
			pixels.len() / width
		} else {
			0
		};

		Self {
			pixels,
			width,
			current_row: 0,
			total_rows,
		}
	}
}

impl<'a> Iterator for RowIterator<'a> {
	type Item = &'a [u8];

	fn next(&mut self) -> Option<Self::Item> {
		if self.current_row >= self.total_rows {
			return None;
		}

		let start = self.current_row * self.width;
		let end = start + self.width;
		self.current_row += 1;

		Some(&self.pixels[start..end])
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.total_rows - self.current_row;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for RowIterator<'_> {
	fn len(&self) -> usize {
		self.total_rows - self.current_row
	}
}
