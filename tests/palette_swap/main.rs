//! End-to-end palette swap tests for `palswap`

mod animation;
mod manifest;
mod swap;

use palswap::prelude::*;

/// 16-column, 2-row table: row 0 is a gray ramp, row 1 the same ramp shifted to blue.
pub(crate) fn gray_and_blue_table() -> PaletteTable {
	let gray = (0..16u8).map(|i| Color::gray(i * 17));
	let blue = (0..16u8).map(|i| Color::rgb(i * 4, i * 8, i * 17));
	PaletteTable::new(16, 2, gray.chain(blue).collect()).unwrap()
}

#[test]
fn test_logger_smoke() {
	// Initialize logger with default level set to info if RUST_LOG is not set
	let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.is_test(true)
		.try_init();
	log::info!("palette swap tests running against {}", gray_and_blue_table());
}
