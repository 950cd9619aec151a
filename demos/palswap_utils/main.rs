//! Palette-swap CLI utility.
//!
//! Renders index images through palette tables, previews palette animation and reports
//! asset summaries.
//!
//! # Inputs
//!
//! - **Index image**: any RGBA image; the red channel is the palette index and the alpha
//!   channel the coverage
//! - **Palette image**: one pixel per palette entry, one image row per palette row
//! - **Manifest**: a TOML file declaring named tables and effects (see
//!   `palswap::palswap_types::manifest`)
//!
//! # Usage
//!
//! ```bash
//! # Render a sprite through row 2 of a palette image, scaled 4x
//! cargo run --example palswap_utils -- render hero_idx.png -p hero_pal.png -r 2 -s 4 -o hero.png
//!
//! # Render through a manifest table
//! cargo run --example palswap_utils -- render water_idx.png -m scene.toml -t water -o water.png
//!
//! # Write 16 frames of the manifest's animation at 30 fps
//! cargo run --example palswap_utils -- cycle water_idx.png -m scene.toml -t water -f 16 --fps 30
//!
//! # Print surface and palette information as JSON
//! cargo run --example palswap_utils -- info hero_idx.png -p hero_pal.png
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
	time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use palswap::prelude::*;
use serde::Serialize;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Render(opts) => run_render(opts),
		Command::Cycle(opts) => run_cycle(opts),
		Command::Info(opts) => run_info(opts),
	}
}

#[derive(Parser)]
#[command(name = "palswap_utils")]
#[command(author = "palswap project")]
#[command(version)]
#[command(about = "Render and inspect palette-swapped sprites", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Render an index image through one palette row
	Render(RenderArgs),
	/// Render successive frames of the palette animation declared in a manifest
	Cycle(CycleArgs),
	/// Print a JSON summary of an index image and its palette
	Info(InfoArgs),
}

#[derive(Args)]
struct PaletteSource {
	/// Palette image (one pixel per entry)
	#[arg(short, long, value_name = "PALETTE", conflicts_with = "manifest")]
	palette: Option<PathBuf>,

	/// Palette manifest (TOML)
	#[arg(short, long, value_name = "MANIFEST")]
	manifest: Option<PathBuf>,

	/// Table name inside the manifest (defaults to the first table)
	#[arg(short, long, value_name = "TABLE", requires = "manifest")]
	table: Option<String>,
}

#[derive(Args)]
struct RenderArgs {
	/// Index image path
	#[arg(value_name = "INDEX_IMAGE")]
	input: PathBuf,

	#[command(flatten)]
	source: PaletteSource,

	/// Palette row to draw with
	#[arg(short, long, value_name = "ROW", default_value_t = 0)]
	row: u32,

	/// Integer upscale factor
	#[arg(short, long, value_name = "FACTOR", default_value_t = 1)]
	scale: u32,

	/// Alpha threshold below which texels are discarded
	#[arg(long, value_name = "ALPHA", default_value_t = DEFAULT_ALPHA_THRESHOLD)]
	threshold: u8,

	/// Output PNG path (defaults to `<input>_row<ROW>.png`)
	#[arg(short, long, value_name = "OUTPUT")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct CycleArgs {
	/// Index image path
	#[arg(value_name = "INDEX_IMAGE")]
	input: PathBuf,

	/// Palette manifest (TOML)
	#[arg(short, long, value_name = "MANIFEST")]
	manifest: PathBuf,

	/// Table name inside the manifest (defaults to the first table)
	#[arg(short, long, value_name = "TABLE")]
	table: Option<String>,

	/// Palette row to draw with
	#[arg(short, long, value_name = "ROW", default_value_t = 0)]
	row: u32,

	/// Number of frames to write
	#[arg(short, long, value_name = "COUNT", default_value_t = 8)]
	frames: u32,

	/// Simulated frame rate
	#[arg(long, value_name = "FPS", default_value_t = 30)]
	fps: u32,

	/// Integer upscale factor
	#[arg(short, long, value_name = "FACTOR", default_value_t = 1)]
	scale: u32,

	/// Output directory (defaults to `<input>_frames/`)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
	/// Index image path
	#[arg(value_name = "INDEX_IMAGE")]
	input: PathBuf,

	#[command(flatten)]
	source: PaletteSource,
}

/// Summary printed by `info`
#[derive(Debug, Serialize)]
struct AssetInfo {
	/// Index image path
	surface: String,
	/// Width in texels
	width: u32,
	/// Height in texels
	height: u32,
	/// Highest index used by an opaque texel
	max_index: Option<u8>,
	/// Palette summary, when a palette was given
	palette: Option<PaletteInfo>,
}

/// Palette part of [`AssetInfo`]
#[derive(Debug, Serialize)]
struct PaletteInfo {
	/// Table name or palette path
	name: String,
	/// Colors per row
	columns: u32,
	/// Number of rows
	rows: u32,
	/// Opaque texels whose index falls outside the row
	out_of_range: usize,
	/// Rows as `#RRGGBBAA` strings
	colors: Vec<Vec<String>>,
}

/// Loaded palette state: the registry plus the animator driving it
struct Scene {
	registry: PaletteRegistry,
	animator: PaletteAnimator,
	table: String,
}

impl Scene {
	fn load(source: &PaletteSource) -> Result<Self> {
		match (&source.palette, &source.manifest) {
			(Some(palette), _) => Self::from_palette(palette),
			(None, Some(manifest)) => Self::from_manifest(manifest, source.table.as_deref()),
			(None, None) => bail!("Either --palette or --manifest is required"),
		}
	}

	fn from_palette(path: &Path) -> Result<Self> {
		let table = PaletteTable::open(path)
			.with_context(|| format!("Failed to load palette {}", path.display()))?;
		let name = path.display().to_string();

		let mut registry = PaletteRegistry::new();
		registry.insert(&name, table)?;
		Ok(Self {
			registry,
			animator: PaletteAnimator::new(),
			table: name,
		})
	}

	fn from_manifest(path: &Path, table: Option<&str>) -> Result<Self> {
		let manifest = PaletteManifest::from_file(path)
			.with_context(|| format!("Failed to read manifest {}", path.display()))?;
		let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

		let mut registry = PaletteRegistry::new();
		let mut animator = PaletteAnimator::new();
		let effects = manifest.apply(&mut registry, &mut animator, base_dir)?;
		info!("Loaded {} tables and {} effects from {}", registry.len(), effects.len(), path.display());

		let table = match table {
			Some(name) => name.to_string(),
			None => match manifest.tables.first() {
				Some(spec) => spec.name.clone(),
				None => bail!("Manifest {} declares no tables", path.display()),
			},
		};
		if !registry.contains(&table) {
			bail!("Manifest {} has no table named '{}'", path.display(), table);
		}

		Ok(Self {
			registry,
			animator,
			table,
		})
	}

	fn palette(&self) -> Result<&PaletteTable> {
		Ok(self.registry.get(&self.table)?)
	}
}

fn load_surface(path: &Path) -> Result<IndexSurface> {
	IndexSurface::open(path).with_context(|| format!("Failed to load index image {}", path.display()))
}

fn render_frame(
	orchestrator: &DrawOrchestrator,
	surface: &IndexSurface,
	palette: &PaletteTable,
	row: u32,
	scale: u32,
) -> Result<Canvas> {
	if scale == 0 {
		bail!("Scale must be at least 1");
	}

	let mut canvas = Canvas::new(surface.width() * scale, surface.height() * scale);
	let transform = DestTransform::at(0.0, 0.0)
		.with_size(canvas.width() as f32, canvas.height() as f32);
	let stats = orchestrator.draw(&mut canvas, surface, palette, row, &transform)?;
	log::debug!(
		"Drew {} pixels ({} written, {} discarded)",
		stats.covered,
		stats.written,
		stats.discarded
	);
	Ok(canvas)
}

fn report_indices(surface: &IndexSurface, palette: &PaletteTable) {
	let report = surface.validate_indices(palette.columns());
	log::debug!("Index check against {} columns: max index {:?}", report.columns, report.max_index);
}

fn default_output(input: &Path, suffix: &str) -> PathBuf {
	let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
	input.with_file_name(format!("{}{}", stem, suffix))
}

fn run_render(opts: RenderArgs) -> Result<()> {
	let surface = load_surface(&opts.input)?;
	let scene = Scene::load(&opts.source)?;
	let palette = scene.palette()?;
	report_indices(&surface, palette);

	let orchestrator = DrawOrchestrator::new(Resolver::new(opts.threshold));
	let canvas = render_frame(&orchestrator, &surface, palette, opts.row, opts.scale)?;

	let output =
		opts.output.unwrap_or_else(|| default_output(&opts.input, &format!("_row{}.png", opts.row)));
	canvas.save(&output).with_context(|| format!("Failed to write {}", output.display()))?;
	info!("Rendered {} with '{}' row {} -> {}", surface, scene.table, opts.row, output.display());
	Ok(())
}

fn run_cycle(opts: CycleArgs) -> Result<()> {
	if opts.fps == 0 {
		bail!("Frame rate must be at least 1");
	}

	let surface = load_surface(&opts.input)?;
	let mut scene = Scene::from_manifest(&opts.manifest, opts.table.as_deref())?;
	if scene.animator.is_empty() {
		warn!("Manifest {} declares no effects; all frames will be identical", opts.manifest.display());
	}
	report_indices(&surface, scene.palette()?);

	let output_dir = opts.output.unwrap_or_else(|| default_output(&opts.input, "_frames"));
	fs::create_dir_all(&output_dir)
		.with_context(|| format!("Failed to create {}", output_dir.display()))?;

	let orchestrator = DrawOrchestrator::default();
	let dt = Duration::from_secs(1) / opts.fps;
	for frame in 0..opts.frames {
		// update, then draw
		if frame > 0 {
			scene.animator.tick(dt, &mut scene.registry)?;
		}
		let canvas = render_frame(&orchestrator, &surface, scene.palette()?, opts.row, opts.scale)?;

		let path = output_dir.join(format!("frame_{:03}.png", frame));
		canvas.save(&path).with_context(|| format!("Failed to write {}", path.display()))?;
	}

	info!("Wrote {} frames at {} fps to {}", opts.frames, opts.fps, output_dir.display());
	Ok(())
}

fn run_info(opts: InfoArgs) -> Result<()> {
	let surface = load_surface(&opts.input)?;

	let palette = if opts.source.palette.is_some() || opts.source.manifest.is_some() {
		let scene = Scene::load(&opts.source)?;
		let palette = scene.palette()?;
		Some(PaletteInfo {
			name: scene.table.clone(),
			columns: palette.columns(),
			rows: palette.rows(),
			out_of_range: surface.validate_indices(palette.columns()).out_of_range,
			colors: palette
				.iter_rows()
				.map(|row| row.iter().map(Color::to_hex).collect())
				.collect(),
		})
	} else {
		None
	};

	let summary = AssetInfo {
		surface: opts.input.display().to_string(),
		width: surface.width(),
		height: surface.height(),
		max_index: surface.max_opaque_index(),
		palette,
	};
	println!("{}", serde_json::to_string_pretty(&summary)?);
	Ok(())
}
