//! Bitmap renderer: pipes an image through a transforms chain and emits a
//! row-aligned RGB/BGR(A) byte buffer (§4.11).

use dcm_core::{Depth, Image};

use crate::error::TransformError;
use crate::high_bit::HighBitTransform;
use crate::registry::get_transform;
use crate::transform::{PixelTransform, Rect};
use crate::TransformsChain;

/// Output pixel layout for [`BitmapRenderer::get_bitmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
	/// 3 bytes per pixel, red first.
	Rgb,
	/// 3 bytes per pixel, blue first.
	Bgr,
	/// 4 bytes per pixel, red first, trailing `0xFF` alpha.
	Rgba,
	/// 4 bytes per pixel, blue first, trailing `0xFF` alpha.
	Bgra,
}

impl PixelFormat {
	/// Bytes per output pixel for this variant.
	pub fn pixel_size(self) -> usize {
		match self {
			PixelFormat::Rgb | PixelFormat::Bgr => 3,
			PixelFormat::Rgba | PixelFormat::Bgra => 4,
		}
	}

	fn has_alpha(self) -> bool {
		matches!(self, PixelFormat::Rgba | PixelFormat::Bgra)
	}

	fn reversed(self) -> bool {
		matches!(self, PixelFormat::Bgr | PixelFormat::Bgra)
	}
}

fn align_up(value: u32, align: u32) -> u32 {
	if align == 0 {
		return value;
	}
	value.div_ceil(align) * align
}

/// Converts a decoded image to a display-ready byte buffer, optionally
/// running it through a user-supplied transforms chain first.
pub struct BitmapRenderer {
	user_chain: TransformsChain,
}

impl BitmapRenderer {
	/// Builds a renderer with no user-supplied chain: the image is still
	/// forced to `RGB`/`(U8, high_bit=7)` before rendering.
	pub fn new() -> Self {
		Self { user_chain: TransformsChain::new() }
	}

	/// Builds a renderer that first runs `chain`.
	pub fn with_chain(chain: TransformsChain) -> Self {
		Self { user_chain: chain }
	}

	/// Runs the user chain (if any), then appends an `-> RGB` transform and
	/// a high-bit transform as needed to reach `(RGB, U8, high_bit=7)`
	/// (§4.11 "Pipeline assembly").
	fn to_display_rgb(&self, image: &Image) -> Result<Image, TransformError> {
		let after_user = if self.user_chain.is_empty() {
			shallow_rgb_copy(image)
		} else {
			run_chain(&self.user_chain, image)?
		};

		let is_display_ready = |img: &Image| {
			img.color_space().as_str() == "RGB" && img.depth() == Depth::U8 && img.high_bit() == 7
		};
		if is_display_ready(&after_user) {
			return Ok(after_user);
		}

		let after_color = if after_user.color_space().as_str() != "RGB" {
			let to_rgb = get_transform(after_user.color_space().as_str(), "RGB")?;
			if to_rgb.is_empty() {
				after_user
			} else {
				let out = Image::new(
					after_user.width(),
					after_user.height(),
					"RGB",
					after_user.depth(),
					after_user.high_bit(),
					None,
				)?;
				to_rgb.run(&after_user, Rect::whole(after_user.width(), after_user.height()), &out, (0, 0))?;
				out
			}
		} else {
			after_user
		};

		if after_color.depth() == Depth::U8 && after_color.high_bit() == 7 {
			return Ok(after_color);
		}
		let target = Image::new(after_color.width(), after_color.height(), "RGB", Depth::U8, 7, None)?;
		HighBitTransform.run(&after_color, Rect::whole(after_color.width(), after_color.height()), &target, (0, 0))?;
		Ok(target)
	}

	/// Writes `image`'s rendered bitmap into `buffer` under `row_align`
	/// alignment. If `buffer` is `None` or too small, returns the required
	/// size without writing anything.
	pub fn get_bitmap(
		&self,
		image: &Image,
		format: PixelFormat,
		row_align: u32,
		buffer: Option<&mut [u8]>,
	) -> Result<usize, TransformError> {
		let pixel_size = format.pixel_size();
		let row_bytes = align_up(image.width() * pixel_size as u32, row_align.max(1)) as usize;
		let required = row_bytes * image.height() as usize;

		let buffer = match buffer {
			Some(buf) if buf.len() >= required => buf,
			_ => return Ok(required),
		};

		let source = self.to_display_rgb(image)?;
		let reader = source.read_handle();
		for y in 0..source.height() {
			let row_off = y as usize * row_bytes;
			for x in 0..source.width() {
				let px_off = row_off + x as usize * pixel_size;
				let r = reader.sample(source.element_index(x, y, 0)) as u8;
				let g = reader.sample(source.element_index(x, y, 1)) as u8;
				let b = reader.sample(source.element_index(x, y, 2)) as u8;
				if format.reversed() {
					buffer[px_off] = b;
					buffer[px_off + 1] = g;
					buffer[px_off + 2] = r;
				} else {
					buffer[px_off] = r;
					buffer[px_off + 1] = g;
					buffer[px_off + 2] = b;
				}
				if format.has_alpha() {
					buffer[px_off + 3] = 0xFF;
				}
			}
			for pad in (source.width() as usize * pixel_size)..row_bytes {
				buffer[row_off + pad] = 0;
			}
		}
		Ok(required)
	}
}

impl Default for BitmapRenderer {
	fn default() -> Self {
		Self::new()
	}
}

fn run_chain(chain: &TransformsChain, image: &Image) -> Result<Image, TransformError> {
	let out = chain.allocate_output_image(
		image.depth(),
		image.color_space().as_str(),
		image.high_bit(),
		image.palette(),
		image.width(),
		image.height(),
	)?;
	chain.run(image, Rect::whole(image.width(), image.height()), &out, (0, 0))?;
	Ok(out)
}

/// A byte-for-byte copy of `source`'s committed pixel buffer into a new
/// image with the same shape, used when no stage needs to run at all.
fn shallow_rgb_copy(source: &Image) -> Image {
	let copy =
		Image::new(source.width(), source.height(), source.color_space().as_str(), source.depth(), source.high_bit(), None)
			.expect("source image's own shape is always valid");
	let reader = source.read_handle();
	let mut writer = copy.write_handle();
	for i in 0..source.element_count() {
		writer.set_sample(i, reader.sample(i));
	}
	writer.commit();
	copy
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn row_alignment_matches_scenario_6() {
		let image = Image::new(3, 2, "RGB", Depth::U8, 7, None).unwrap();
		{
			let mut w = image.write_handle();
			for i in 0..18 {
				w.set_sample(i, i as i64);
			}
			w.commit();
		}
		let renderer = BitmapRenderer::new();
		let required = renderer.get_bitmap(&image, PixelFormat::Bgr, 4, None).unwrap();
		assert_eq!(required, 24);

		let mut buf = vec![0u8; required];
		renderer.get_bitmap(&image, PixelFormat::Bgr, 4, Some(&mut buf)).unwrap();
		assert_eq!(&buf[0..12], &[2, 1, 0, 5, 4, 3, 8, 7, 6, 0, 0, 0]);
	}

	#[test]
	fn too_small_buffer_reports_required_size() {
		let image = Image::new(2, 2, "RGB", Depth::U8, 7, None).unwrap();
		let renderer = BitmapRenderer::new();
		let mut tiny = [0u8; 1];
		let required = renderer.get_bitmap(&image, PixelFormat::Rgb, 1, Some(&mut tiny)).unwrap();
		assert_eq!(required, 12);
	}

	#[test]
	fn monochrome_source_is_converted_and_rescaled() {
		let image = Image::new(1, 1, "MONOCHROME2", Depth::U16, 15, None).unwrap();
		{
			let mut w = image.write_handle();
			w.set_sample(0, 32768);
			w.commit();
		}
		let renderer = BitmapRenderer::new();
		let mut buf = vec![0u8; 3];
		renderer.get_bitmap(&image, PixelFormat::Rgb, 1, Some(&mut buf)).unwrap();
		assert_eq!(buf[0], buf[1]);
		assert_eq!(buf[1], buf[2]);
	}
}
