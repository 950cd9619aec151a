//! Palette manifests: tables and effects declared in a TOML file.
//!
//! A manifest describes the palette tables of a scene and the effects animating them.
//! It is read through the `config` crate, so any TOML file with the layout below works:
//!
//! ```toml
//! [[tables]]
//! name = "water"
//! columns = 4
//! rows = 2
//! colors = [
//!     "#001040", "#002060", "#003080", "#0040A0",
//!     "#400010", "#600020", "#800030", "#A00040",
//! ]
//!
//! [[tables]]
//! name = "hero"
//! image = "hero_palette.png"    # relative to the manifest directory
//!
//! [[cycles]]
//! table = "water"
//! effect = "river"              # reserve a row by name instead of a literal
//! start = 0
//! end = 3
//! speed = 8.0
//! mode = "ping-pong"            # or "wrap" (default)
//!
//! [[lerps]]
//! table = "hero"
//! from = 0
//! to = 1
//! target = 2
//! blend = 0.25
//! ```

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::animate::{CycleMode, CycleRange, EffectId, PaletteAnimator, PaletteLerp};
use crate::color::Color;
use crate::error::{ManifestError, PaletteError};
use crate::registry::PaletteRegistry;
use crate::table::PaletteTable;

/// A palette table declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
	/// Registry name
	pub name: String,
	/// Colors per row; defaults to all colors in one row
	#[serde(default)]
	pub columns: Option<u32>,
	/// Number of rows; defaults to 1 for inline colors
	#[serde(default)]
	pub rows: Option<u32>,
	/// Inline colors, row-major, as `#RRGGBB` or `#RRGGBBAA`
	#[serde(default)]
	pub colors: Option<Vec<String>>,
	/// Palette image (one pixel per entry), relative to the manifest directory
	#[serde(default)]
	pub image: Option<PathBuf>,
}

/// A color cycle declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSpec {
	/// Table to animate
	pub table: String,
	/// Row to animate; with `effect` set, the row is reserved under that name
	#[serde(default)]
	pub row: Option<u32>,
	/// Logical effect name used for row reservation
	#[serde(default)]
	pub effect: Option<String>,
	/// First column of the range
	pub start: u32,
	/// Last column of the range (inclusive)
	pub end: u32,
	/// Shifts per second
	pub speed: f64,
	/// Cycling mode
	#[serde(default)]
	pub mode: CycleMode,
}

/// A row blend declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LerpSpec {
	/// Table to animate
	pub table: String,
	/// Row blended from
	pub from: u32,
	/// Row blended towards
	pub to: u32,
	/// Row receiving the blend
	pub target: u32,
	/// Initial blend factor
	#[serde(default)]
	pub blend: f32,
}

/// Tables and effects of a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteManifest {
	/// Palette tables
	#[serde(default)]
	pub tables: Vec<TableSpec>,
	/// Color cycles
	#[serde(default)]
	pub cycles: Vec<CycleSpec>,
	/// Row blends
	#[serde(default)]
	pub lerps: Vec<LerpSpec>,
}

impl PaletteManifest {
	/// Reads a manifest from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
		let path = path.as_ref();
		let settings = Config::builder()
			.add_source(File::from(path).format(FileFormat::Toml).required(true))
			.build()?;
		let manifest: Self = settings.try_deserialize()?;
		debug!(
			"Read manifest {}: {} tables, {} cycles, {} lerps",
			path.display(),
			manifest.tables.len(),
			manifest.cycles.len(),
			manifest.lerps.len()
		);
		Ok(manifest)
	}

	/// Parses a manifest from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
		let settings = Config::builder().add_source(File::from_str(text, FileFormat::Toml)).build()?;
		Ok(settings.try_deserialize()?)
	}

	/// Registers every table and attaches every effect.
	///
	/// Relative image paths resolve against `base_dir`. Either everything is applied or,
	/// on error, neither the registry nor the animator is modified.
	pub fn apply(
		&self,
		registry: &mut PaletteRegistry,
		animator: &mut PaletteAnimator,
		base_dir: &Path,
	) -> Result<Vec<EffectId>, ManifestError> {
		let mut staged_registry = registry.clone();
		let mut staged_animator = animator.clone();
		let mut effects = Vec::with_capacity(self.cycles.len() + self.lerps.len());

		for spec in &self.tables {
			let table = spec.build(base_dir)?;
			staged_registry.insert(&spec.name, table)?;
		}

		// literal rows are reserved first so named effects are allocated around them
		for spec in self.cycles.iter().filter(|spec| spec.effect.is_none()) {
			let row = spec.row.unwrap_or(0);
			staged_registry.reserve_specific_row(&spec.table, &literal_row_owner(row), row)?;
		}
		for spec in &self.lerps {
			staged_registry.reserve_specific_row(
				&spec.table,
				&literal_row_owner(spec.target),
				spec.target,
			)?;
		}

		for spec in &self.cycles {
			let row = match (&spec.effect, spec.row) {
				(Some(effect), Some(row)) => staged_registry.reserve_specific_row(&spec.table, effect, row)?,
				(Some(effect), None) => staged_registry.reserve_row(&spec.table, effect)?,
				(None, row) => row.unwrap_or(0),
			};
			let range = CycleRange::new(spec.start, spec.end, spec.speed, spec.mode)?;
			effects.push(staged_animator.add_cycle(&staged_registry, &spec.table, row, range)?);
		}

		for spec in &self.lerps {
			let lerp = PaletteLerp::new(spec.from, spec.to, spec.target, spec.blend);
			effects.push(staged_animator.add_lerp(&staged_registry, &spec.table, lerp)?);
		}

		staged_animator.refresh(&mut staged_registry)?;

		*registry = staged_registry;
		*animator = staged_animator;
		info!("Applied palette manifest: {} tables, {} effects", self.tables.len(), effects.len());
		Ok(effects)
	}
}

/// Reservation owner of a row addressed by number in a manifest.
fn literal_row_owner(row: u32) -> String {
	format!("row {}", row)
}

impl TableSpec {
	/// Builds the table from inline colors or an image.
	pub fn build(&self, base_dir: &Path) -> Result<PaletteTable, ManifestError> {
		match (&self.colors, &self.image) {
			(Some(_), Some(_)) => Err(ManifestError::AmbiguousColorSource(self.name.clone())),
			(None, None) => Err(ManifestError::MissingColorSource(self.name.clone())),
			(Some(colors), None) => {
				let colors =
					colors.iter().map(|text| Color::from_hex(text)).collect::<Result<Vec<_>, _>>()?;
				let rows = self.rows.unwrap_or(1);
				let columns = self.columns.unwrap_or_else(|| colors.len() as u32 / rows.max(1));
				Ok(PaletteTable::new(columns, rows, colors)?)
			}
			(None, Some(image)) => {
				let table = PaletteTable::open(base_dir.join(image))?;
				let columns = self.columns.unwrap_or(table.columns());
				let rows = self.rows.unwrap_or(table.rows());
				if (columns, rows) != (table.columns(), table.rows()) {
					return Err(ManifestError::ImageSizeMismatch {
						table: self.name.clone(),
						columns,
						rows,
						image_columns: table.columns(),
						image_rows: table.rows(),
					});
				}
				Ok(table)
			}
		}
	}
}
