//! Row selection at draw time

use palswap::prelude::*;

use crate::gray_and_blue_table;

#[test_log::test]
fn test_single_texel_gray_then_blue() {
	let table = gray_and_blue_table();
	let surface = IndexSurface::new(1, 1, vec![8], vec![255]).unwrap();
	let mut canvas = Canvas::new(1, 1);
	let at_origin = DestTransform::at(0.0, 0.0);

	draw_palette_sprite(&mut canvas, &surface, &table, 0, &at_origin).unwrap();
	assert_eq!(canvas.pixel(0, 0), Some(Color::gray(136)));

	draw_palette_sprite(&mut canvas, &surface, &table, 1, &at_origin).unwrap();
	assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(32, 64, 136)));
}

#[test]
fn test_one_table_many_sprites() {
	let mut registry = PaletteRegistry::new();
	registry.insert("shared", gray_and_blue_table()).unwrap();

	let first = IndexSurface::new(2, 1, vec![0, 15], vec![255, 255]).unwrap();
	let second = IndexSurface::new(1, 1, vec![15], vec![255]).unwrap();
	let orchestrator = DrawOrchestrator::default();
	let mut canvas = Canvas::new(4, 1);

	orchestrator
		.draw_named(&mut canvas, &registry, "shared", &first, 0, &DestTransform::at(0.0, 0.0))
		.unwrap();
	orchestrator
		.draw_named(&mut canvas, &registry, "shared", &second, 1, &DestTransform::at(3.0, 0.0))
		.unwrap();

	assert_eq!(canvas.pixel(0, 0), Some(Color::gray(0)));
	assert_eq!(canvas.pixel(1, 0), Some(Color::gray(255)));
	assert_eq!(canvas.pixel(2, 0), Some(Color::transparent()));
	assert_eq!(canvas.pixel(3, 0), Some(Color::rgb(60, 120, 255)));
}

#[test]
fn test_row_update_seen_by_next_draw() {
	let mut registry = PaletteRegistry::new();
	registry.insert("shared", gray_and_blue_table()).unwrap();
	let surface = IndexSurface::filled(2, 2, Texel::opaque(3));
	let mut canvas = Canvas::new(2, 2);

	let mut flash = registry.get_row("shared", 1).unwrap().to_vec();
	flash[3] = Color::rgb(255, 255, 0);
	registry.update_row("shared", 1, &flash).unwrap();

	let stats = DrawOrchestrator::default()
		.draw_named(&mut canvas, &registry, "shared", &surface, 1, &DestTransform::at(0.0, 0.0))
		.unwrap();
	assert_eq!(stats.written, 4);
	assert!(canvas.pixels().iter().all(|&pixel| pixel == Color::rgb(255, 255, 0)));

	// row 0 is unaffected
	assert_eq!(registry.get_row("shared", 0).unwrap()[3], Color::gray(51));
}

#[test]
fn test_transparent_texels_keep_background() {
	let table = gray_and_blue_table();
	let surface = IndexSurface::new(3, 1, vec![5, 5, 5], vec![255, 0x7F, 0x80]).unwrap();
	let background = Color::rgb(9, 9, 9);
	let mut canvas = Canvas::filled(3, 1, background);

	let stats =
		draw_palette_sprite(&mut canvas, &surface, &table, 0, &DestTransform::at(0.0, 0.0)).unwrap();
	assert_eq!(stats.discarded, 1);
	assert_eq!(canvas.pixel(0, 0), Some(Color::gray(85)));
	assert_eq!(canvas.pixel(1, 0), Some(background));
	assert_eq!(canvas.pixel(2, 0), Some(Color::new(85, 85, 85, 255)));
}

#[test]
fn test_bad_row_is_rejected_before_drawing() {
	let table = gray_and_blue_table();
	let surface = IndexSurface::filled(1, 1, Texel::opaque(0));
	let mut canvas = Canvas::filled(1, 1, Color::rgb(1, 2, 3));

	let err = draw_palette_sprite(&mut canvas, &surface, &table, 2, &DestTransform::at(0.0, 0.0))
		.unwrap_err();
	assert!(matches!(
		err,
		PaletteError::RowOutOfRange {
			row: 2,
			rows: 2
		}
	));
	assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(1, 2, 3)));
}
