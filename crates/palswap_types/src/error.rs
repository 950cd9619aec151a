//! Error types for palette tables, index surfaces, animation and manifests.

use thiserror::Error;

use crate::animate::EffectId;

/// Errors that can occur when building, mutating or drawing through palette resources.
///
/// Every variant except the wrapped I/O errors is a configuration error: the rejected
/// operation leaves registry and table state untouched.
#[derive(Debug, Error)]
pub enum PaletteError {
	/// A table with this name is already registered
	#[error("Palette table '{0}' already exists")]
	DuplicateTable(String),

	/// No table with this name is registered
	#[error("Unknown palette table '{0}'")]
	UnknownTable(String),

	/// Row index is outside the table
	#[error("Row {row} out of range (table has {rows} rows)")]
	RowOutOfRange {
		/// Requested row
		row: u32,
		/// Number of rows in the table
		rows: u32,
	},

	/// Colour data does not match the table layout
	#[error("Color count mismatch: expected {expected} colors, got {actual}")]
	ColorCountMismatch {
		/// Number of colours required
		expected: usize,
		/// Number of colours supplied
		actual: usize,
	},

	/// A table must have at least one row and one column
	#[error("Invalid palette dimensions: {columns} columns x {rows} rows")]
	InvalidDimensions {
		/// Requested column count
		columns: u32,
		/// Requested row count
		rows: u32,
	},

	/// Index or alpha plane does not cover the surface
	#[error("Surface data size mismatch: expected {expected} texels, got {actual}")]
	SurfaceSizeMismatch {
		/// `width * height`
		expected: usize,
		/// Length of the supplied plane
		actual: usize,
	},

	/// The surface was authored for a palette with a different column count
	#[error("Column mismatch: surface expects {expected} palette columns, table has {actual}")]
	ColumnMismatch {
		/// Columns the surface was authored for
		expected: u32,
		/// Columns of the bound table
		actual: u32,
	},

	/// Cycle range with `start > end`
	#[error("Invalid cycle range: start {start} is after end {end}")]
	InvalidCycleRange {
		/// First index of the range
		start: u32,
		/// Last index of the range (inclusive)
		end: u32,
	},

	/// Cycle range reaches past the last column of its table
	#[error("Cycle range end {end} out of bounds (table has {columns} columns)")]
	RangeOutOfBounds {
		/// Last index of the range (inclusive)
		end: u32,
		/// Number of columns in the table
		columns: u32,
	},

	/// No animator effect with this id
	#[error("Unknown palette effect {0}")]
	UnknownEffect(EffectId),

	/// Two effects would write the same colours
	#[error("Effect conflicts with an existing effect on table '{table}' row {row}")]
	ConflictingEffect {
		/// Table name
		table: String,
		/// Row both effects target
		row: u32,
	},

	/// Row is already reserved by another effect
	#[error("Row {row} of table '{table}' is already reserved by '{owner}'")]
	RowAlreadyReserved {
		/// Table name
		table: String,
		/// Requested row
		row: u32,
		/// Effect currently holding the row
		owner: String,
	},

	/// Every allocatable row of the table is reserved
	#[error("No free row left in palette table '{0}'")]
	NoFreeRow(String),

	/// The effect holds no reservation in this table
	#[error("Effect '{effect}' has no row reserved in table '{table}'")]
	UnknownReservation {
		/// Table name
		table: String,
		/// Effect name
		effect: String,
	},

	/// Colour string could not be parsed
	#[error("Invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
	InvalidColor(String),

	/// Image decoding or encoding failed
	#[error(transparent)]
	ImageError(#[from] image::ImageError),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors that can occur when loading a palette manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
	/// The manifest could not be read or deserialized
	#[error(transparent)]
	Config(#[from] config::ConfigError),

	/// A table entry names neither `colors` nor `image`
	#[error("Palette table '{0}' has no color source (set `colors` or `image`)")]
	MissingColorSource(String),

	/// A table entry names both `colors` and `image`
	#[error("Palette table '{0}' sets both `colors` and `image`")]
	AmbiguousColorSource(String),

	/// A palette image does not have the size declared for its table
	#[error(
		"Palette table '{table}' declares {columns}x{rows} entries but its image is {image_columns}x{image_rows}"
	)]
	ImageSizeMismatch {
		/// Table name
		table: String,
		/// Declared column count
		columns: u32,
		/// Declared row count
		rows: u32,
		/// Image width
		image_columns: u32,
		/// Image height
		image_rows: u32,
	},

	/// Building a resource from the manifest failed
	#[error(transparent)]
	Palette(#[from] PaletteError),
}
