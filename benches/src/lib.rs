//! Synthetic test-data helpers for the transforms benchmark suite.
//!
//! This crate builds in-memory [`dcm_core::Image`] values with deterministic
//! pseudo-random sample data, so the benchmarks don't depend on any sample
//! DICOM files living in the repository.

use dcm_core::{Depth, Image};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Builds an RGB image of `width` x `height` filled with deterministic
/// pseudo-random samples, seeded from `seed` so repeated benchmark runs see
/// identical input.
pub fn rgb_image(width: u32, height: u32, seed: u64) -> Image {
	let image = Image::new(width, height, "RGB", Depth::U8, 7, None).expect("benchmark dimensions are always valid");
	fill_random(&image, seed);
	image
}

/// Builds a `MONOCHROME2` image at `depth`/`high_bit`, filled with
/// deterministic pseudo-random samples within the depth's representable
/// range.
pub fn monochrome_image(width: u32, height: u32, depth: Depth, high_bit: u32, seed: u64) -> Image {
	let image =
		Image::new(width, height, "MONOCHROME2", depth, high_bit, None).expect("benchmark dimensions are always valid");
	fill_random(&image, seed);
	image
}

fn fill_random(image: &Image, seed: u64) {
	let mut rng = SmallRng::seed_from_u64(seed);
	let min = dcm_core::depth::sample_min(image.depth(), image.high_bit());
	let max = dcm_core::depth::sample_max(image.depth(), image.high_bit());
	let mut writer = image.write_handle();
	for i in 0..image.element_count() {
		writer.set_sample(i, rng.random_range(min..=max));
	}
	writer.commit();
}

/// Common benchmark image dimensions, spanning a typical thumbnail up to a
/// full HD display surface.
pub mod sizes {
	/// Thumbnail: 64x64 (4,096 pixels).
	pub const TINY: (u32, u32) = (64, 64);
	/// Small: 256x256 (65,536 pixels).
	pub const SMALL: (u32, u32) = (256, 256);
	/// Medium: 512x512 (262,144 pixels) - typical CT/MR slice.
	pub const MEDIUM: (u32, u32) = (512, 512);
	/// Large: 2048x2048 (4,194,304 pixels) - typical CR/DX detector readout.
	pub const LARGE: (u32, u32) = (2048, 2048);
	/// Extra large: 1920x1080 (2,073,600 pixels) - HD display surface.
	pub const XLARGE: (u32, u32) = (1920, 1080);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rgb_image_has_requested_shape() {
		let image = rgb_image(16, 8, 42);
		assert_eq!(image.width(), 16);
		assert_eq!(image.height(), 8);
		assert_eq!(image.channels(), 3);
	}

	#[test]
	fn fill_random_is_deterministic() {
		let a = monochrome_image(8, 8, Depth::U16, 15, 7);
		let b = monochrome_image(8, 8, Depth::U16, 15, 7);
		let (ra, rb) = (a.read_handle(), b.read_handle());
		for i in 0..a.element_count() {
			assert_eq!(ra.sample(i), rb.sample(i));
		}
	}

	#[test]
	fn sizes_constants_are_positive() {
		for (w, h) in [sizes::TINY, sizes::SMALL, sizes::MEDIUM, sizes::LARGE, sizes::XLARGE] {
			assert!(w > 0 && h > 0);
		}
	}
}
