//! Manifests loaded from disk

use std::{
	fs,
	path::{Path, PathBuf},
	time::Duration,
};

use palswap::prelude::*;

use crate::gray_and_blue_table;

/// Scratch directory removed on drop
struct ScratchDir(PathBuf);

impl ScratchDir {
	fn new(name: &str) -> Self {
		let path = std::env::temp_dir().join(format!("palswap-{}-{}", name, std::process::id()));
		fs::create_dir_all(&path).unwrap();
		Self(path)
	}

	fn path(&self) -> &Path {
		&self.0
	}
}

impl Drop for ScratchDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.0);
	}
}

#[test_log::test]
fn test_manifest_with_image_palette() {
	let scratch = ScratchDir::new("manifest");
	gray_and_blue_table().save(scratch.path().join("ramp.png")).unwrap();
	fs::write(
		scratch.path().join("scene.toml"),
		r##"
[[tables]]
name = "ramp"
image = "ramp.png"

[[tables]]
name = "flag"
columns = 2
colors = ["#FF0000", "#0000FF"]

[[cycles]]
table = "ramp"
row = 1
start = 0
end = 15
speed = 16.0
"##,
	)
	.unwrap();

	let manifest = PaletteManifest::from_file(scratch.path().join("scene.toml")).unwrap();
	let mut registry = PaletteRegistry::new();
	let mut animator = PaletteAnimator::new();
	let effects = manifest.apply(&mut registry, &mut animator, scratch.path()).unwrap();

	assert_eq!(effects.len(), 1);
	assert_eq!(registry.names().collect::<Vec<_>>(), vec!["flag", "ramp"]);
	assert_eq!(registry.get("ramp").unwrap(), &gray_and_blue_table());

	animator.tick(Duration::from_millis(125), &mut registry).unwrap();
	let surface = IndexSurface::filled(1, 1, Texel::opaque(8));
	let mut canvas = Canvas::new(1, 1);
	DrawOrchestrator::default()
		.draw_named(&mut canvas, &registry, "ramp", &surface, 1, &DestTransform::at(0.0, 0.0))
		.unwrap();
	// two shifts: index 8 now shows entry 10 of the blue row
	assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(40, 80, 170)));
}

#[test]
fn test_manifest_missing_image() {
	let scratch = ScratchDir::new("missing");
	let manifest = PaletteManifest::from_toml_str(
		r#"
[[tables]]
name = "ghost"
image = "nowhere.png"
"#,
	)
	.unwrap();

	let mut registry = PaletteRegistry::new();
	let mut animator = PaletteAnimator::new();
	let err = manifest.apply(&mut registry, &mut animator, scratch.path()).unwrap_err();
	assert!(matches!(err, ManifestError::Palette(_)));
	assert!(registry.is_empty());
}
