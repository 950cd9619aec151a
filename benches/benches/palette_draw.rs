//! Benchmark suite for palette-swapped drawing
//!
//! Measures the per-texel resolve cost, full sprite draws at several scales and the
//! per-tick cost of palette animation.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use palswap_benches::{generate_surface, generate_table, sizes};
use palswap_types::animate::{CycleMode, CycleRange, PaletteAnimator, PaletteLerp};
use palswap_types::draw::{Canvas, DestTransform, DrawOrchestrator};
use palswap_types::registry::PaletteRegistry;
use palswap_types::resolve::Resolver;

/// Benchmark resolving every texel of a surface without rasterization
fn bench_resolve(c: &mut Criterion) {
	let mut group = c.benchmark_group("resolve");
	let table = generate_table(sizes::COLUMNS, 8);
	let resolver = Resolver::default();

	for (name, (width, height)) in [("sprite", sizes::SPRITE), ("screen", sizes::SCREEN)] {
		let surface = generate_surface(width, height, sizes::COLUMNS, 8);
		let texels: Vec<_> = (0..height)
			.flat_map(|y| (0..width).map(move |x| (x, y)))
			.filter_map(|(x, y)| surface.texel(x, y))
			.collect();

		group.throughput(Throughput::Elements(texels.len() as u64));
		group.bench_with_input(BenchmarkId::new("texels", name), &texels, |b, texels| {
			b.iter(|| {
				let mut opaque = 0usize;
				for &texel in texels {
					if resolver.resolve(&table, black_box(texel), 3).is_some() {
						opaque += 1;
					}
				}
				black_box(opaque)
			});
		});
	}

	group.finish();
}

/// Benchmark full draws, unscaled and upscaled
fn bench_draw(c: &mut Criterion) {
	let mut group = c.benchmark_group("draw");
	let table = generate_table(sizes::COLUMNS, 4);
	let surface = generate_surface(sizes::LARGE_SPRITE.0, sizes::LARGE_SPRITE.1, sizes::COLUMNS, 5);
	let orchestrator = DrawOrchestrator::default();

	for scale in [1u32, 2, 4] {
		let width = sizes::LARGE_SPRITE.0 * scale;
		let height = sizes::LARGE_SPRITE.1 * scale;
		let mut canvas = Canvas::new(width, height);
		let transform = DestTransform::at(0.0, 0.0).with_size(width as f32, height as f32);

		group.throughput(Throughput::Elements(u64::from(width) * u64::from(height)));
		group.bench_function(BenchmarkId::new("scaled", scale), |b| {
			b.iter(|| {
				let stats = orchestrator.draw(&mut canvas, &surface, &table, 1, black_box(&transform));
				black_box(stats)
			});
		});
	}

	let mut canvas = Canvas::new(256, 256);
	let rotated = DestTransform::at(64.0, 64.0).with_rotation(30.0);
	group.bench_function("rotated", |b| {
		b.iter(|| black_box(orchestrator.draw(&mut canvas, &surface, &table, 1, &rotated)));
	});

	group.finish();
}

/// Benchmark one animation tick over a busy table
fn bench_animation_tick(c: &mut Criterion) {
	let mut group = c.benchmark_group("animate");

	let mut registry = PaletteRegistry::new();
	registry.insert("scene", generate_table(sizes::COLUMNS, 16)).unwrap();
	let mut animator = PaletteAnimator::new();
	for row in 0..12 {
		for start in (0..sizes::COLUMNS).step_by(32) {
			let mode = if row % 2 == 0 { CycleMode::Wrap } else { CycleMode::PingPong };
			let range = CycleRange::new(start, start + 15, 8.0 + f64::from(row), mode).unwrap();
			animator.add_cycle(&registry, "scene", row, range).unwrap();
		}
	}
	for target in 12..16 {
		animator.add_lerp(&registry, "scene", PaletteLerp::new(0, 1, target, 0.3)).unwrap();
	}

	group.throughput(Throughput::Elements(animator.len() as u64));
	group.bench_function("tick_16ms", |b| {
		b.iter(|| black_box(animator.tick(Duration::from_micros(16_667), &mut registry)));
	});

	group.finish();
}

criterion_group!(benches, bench_resolve, bench_draw, bench_animation_tick);
criterion_main!(benches);
