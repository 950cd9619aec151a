//! RGBA colour value shared by palette tables and canvases.

use std::fmt;

use crate::error::PaletteError;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a new grayscale color.
	pub const fn gray(value: u8) -> Self {
		Self::rgb(value, value, value)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns the color as a 32-bit RGBA value.
	pub const fn to_rgba32(&self) -> u32 {
		((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
	}

	/// Creates a color from a 32-bit RGBA value.
	pub const fn from_rgba32(rgba: u32) -> Self {
		Self {
			r: ((rgba >> 24) & 0xFF) as u8,
			g: ((rgba >> 16) & 0xFF) as u8,
			b: ((rgba >> 8) & 0xFF) as u8,
			a: (rgba & 0xFF) as u8,
		}
	}

	/// Returns the components as `[r, g, b, a]`.
	pub const fn to_array(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}

	/// Parses `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
	///
	/// Six-digit colors are fully opaque.
	pub fn from_hex(text: &str) -> Result<Self, PaletteError> {
		let digits = text.trim().trim_start_matches('#');
		let bytes = hex::decode(digits).map_err(|_| PaletteError::InvalidColor(text.to_string()))?;

		match bytes.as_slice() {
			[r, g, b] => Ok(Self::rgb(*r, *g, *b)),
			[r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
			_ => Err(PaletteError::InvalidColor(text.to_string())),
		}
	}

	/// Formats the color as `#RRGGBBAA`.
	pub fn to_hex(&self) -> String {
		format!("#{}", hex::encode_upper(self.to_array()))
	}

	/// Linearly interpolates every component (including alpha) towards `other`.
	///
	/// `t` is clamped to `[0, 1]`; `t == 0` returns `self` and `t == 1` returns `other`
	/// exactly.
	pub fn lerp(self, other: Self, t: f32) -> Self {
		let t = if t.is_nan() {
			0.0
		} else {
			t.clamp(0.0, 1.0)
		};

		let mix = |from: u8, to: u8| -> u8 {
			let from = f32::from(from);
			let to = f32::from(to);
			(from + (to - from) * t).round().clamp(0.0, 255.0) as u8
		};

		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: mix(self.a, other.a),
		}
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

impl From<image::Rgba<u8>> for Color {
	fn from(pixel: image::Rgba<u8>) -> Self {
		let [r, g, b, a] = pixel.0;
		Self::new(r, g, b, a)
	}
}

impl From<Color> for image::Rgba<u8> {
	fn from(color: Color) -> Self {
		image::Rgba(color.to_array())
	}
}
