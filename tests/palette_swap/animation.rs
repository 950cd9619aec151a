//! Animation driving draws through the update-then-draw order

use std::time::Duration;

use palswap::prelude::*;

use crate::gray_and_blue_table;

#[test_log::test]
fn test_cycle_recolors_every_sprite_sharing_the_row() {
	let mut registry = PaletteRegistry::new();
	registry.insert("water", gray_and_blue_table()).unwrap();
	let mut animator = PaletteAnimator::new();
	animator
		.add_cycle(&registry, "water", 0, CycleRange::new(0, 3, 10.0, CycleMode::Wrap).unwrap())
		.unwrap();

	let left = IndexSurface::filled(1, 1, Texel::opaque(0));
	let right = IndexSurface::filled(1, 1, Texel::opaque(3));
	let orchestrator = DrawOrchestrator::default();
	let mut canvas = Canvas::new(2, 1);

	let mut frames = Vec::new();
	for _ in 0..5 {
		animator.tick(Duration::from_millis(100), &mut registry).unwrap();
		orchestrator
			.draw_named(&mut canvas, &registry, "water", &left, 0, &DestTransform::at(0.0, 0.0))
			.unwrap();
		orchestrator
			.draw_named(&mut canvas, &registry, "water", &right, 0, &DestTransform::at(1.0, 0.0))
			.unwrap();
		frames.push((canvas.pixel(0, 0).unwrap().r, canvas.pixel(1, 0).unwrap().r));
	}

	// range 0..=3 of the gray ramp is [0, 17, 34, 51]
	assert_eq!(frames, vec![(17, 0), (34, 17), (51, 34), (0, 51), (17, 0)]);
}

#[test]
fn test_variable_frame_times_match_fixed_steps() {
	let mut fixed = PaletteRegistry::new();
	fixed.insert("t", gray_and_blue_table()).unwrap();
	let mut jittery = fixed.clone();

	let range = CycleRange::new(2, 12, 7.5, CycleMode::PingPong).unwrap();
	let mut fixed_animator = PaletteAnimator::new();
	fixed_animator.add_cycle(&fixed, "t", 1, range.clone()).unwrap();
	let mut jittery_animator = PaletteAnimator::new();
	jittery_animator.add_cycle(&jittery, "t", 1, range).unwrap();

	for _ in 0..60 {
		fixed_animator.tick(Duration::from_millis(50), &mut fixed).unwrap();
	}
	let steps = [7u64, 33, 160, 900, 1_900];
	for ms in steps {
		jittery_animator.tick(Duration::from_millis(ms), &mut jittery).unwrap();
	}

	assert_eq!(steps.iter().sum::<u64>(), 3_000);
	assert_eq!(fixed.get_row("t", 1).unwrap(), jittery.get_row("t", 1).unwrap());
}

#[test]
fn test_day_night_blend() {
	let mut registry = PaletteRegistry::new();
	let table = gray_and_blue_table();
	let day = table.row(0).unwrap().to_vec();
	let night = table.row(1).unwrap().to_vec();
	let mut colors = table.colors().to_vec();
	colors.extend_from_slice(&day);
	registry.create("sky", 16, 3, colors).unwrap();

	let mut animator = PaletteAnimator::new();
	let id = animator.add_lerp(&registry, "sky", PaletteLerp::new(0, 1, 2, 0.0)).unwrap();
	let surface = IndexSurface::filled(1, 1, Texel::opaque(8));
	let mut canvas = Canvas::new(1, 1);

	let draw = |registry: &PaletteRegistry, canvas: &mut Canvas| {
		DrawOrchestrator::default()
			.draw_named(canvas, registry, "sky", &surface, 2, &DestTransform::at(0.0, 0.0))
			.unwrap();
		canvas.pixel(0, 0).unwrap()
	};

	animator.refresh(&mut registry).unwrap();
	assert_eq!(draw(&registry, &mut canvas), day[8]);

	animator.set_blend(id, 1.0).unwrap();
	animator.refresh(&mut registry).unwrap();
	assert_eq!(draw(&registry, &mut canvas), night[8]);

	animator.set_blend(id, 0.5).unwrap();
	animator.refresh(&mut registry).unwrap();
	assert_eq!(draw(&registry, &mut canvas), day[8].lerp(night[8], 0.5));
}

#[test]
fn test_reserved_row_for_status_effect() {
	let mut registry = PaletteRegistry::new();
	let table = gray_and_blue_table();
	let mut colors = table.colors().to_vec();
	colors.extend_from_slice(table.row(0).unwrap());
	registry.create("hero", 16, 3, colors).unwrap();

	let burning = registry.reserve_row("hero", "burning").unwrap();
	let frozen = registry.reserve_row("hero", "frozen").unwrap();
	assert_eq!((burning, frozen), (1, 2));
	assert!(matches!(registry.reserve_row("hero", "poisoned"), Err(PaletteError::NoFreeRow(_))));

	let mut animator = PaletteAnimator::new();
	let id = animator
		.add_cycle(&registry, "hero", frozen, CycleRange::new(0, 15, 4.0, CycleMode::Wrap).unwrap())
		.unwrap();
	animator.tick(Duration::from_millis(250), &mut registry).unwrap();
	assert_eq!(registry.get_row("hero", frozen).unwrap()[0], Color::gray(17));

	animator.remove(id, &mut registry).unwrap();
	registry.release_row("hero", "frozen").unwrap();
	assert_eq!(registry.get_row("hero", frozen).unwrap()[0], Color::gray(0));
	assert_eq!(registry.reserve_row("hero", "poisoned").unwrap(), 2);
}
