//! High-bit rescaling within a single color space (§4.9).

use dcm_core::depth::sample_min;
use dcm_core::{Depth, Image, Palette};

use crate::error::TransformError;
use crate::transform::{run_rows, PixelTransform, Rect};

/// Rescales samples between two high-bit settings of the same color space.
///
/// Unlike every other transform, the color-space endpoints are not fixed
/// at construction: they are read off the input image at `run` time and
/// required to be equal.
#[derive(Debug)]
pub struct HighBitTransform;

impl HighBitTransform {
	fn validate(input: &Image, in_rect: Rect, output: &Image, out_origin: (u32, u32)) -> Result<(), TransformError> {
		let in_fits = in_rect
			.x
			.checked_add(in_rect.w)
			.is_some_and(|r| r <= input.width())
			&& in_rect.y.checked_add(in_rect.h).is_some_and(|b| b <= input.height());
		if !in_fits {
			return Err(TransformError::InvalidTransformArea {
				x: in_rect.x,
				y: in_rect.y,
				w: in_rect.w,
				h: in_rect.h,
				image_w: input.width(),
				image_h: input.height(),
			});
		}
		let out_fits = out_origin.0.checked_add(in_rect.w).is_some_and(|r| r <= output.width())
			&& out_origin.1.checked_add(in_rect.h).is_some_and(|b| b <= output.height());
		if !out_fits {
			return Err(TransformError::InvalidTransformArea {
				x: out_origin.0,
				y: out_origin.1,
				w: in_rect.w,
				h: in_rect.h,
				image_w: output.width(),
				image_h: output.height(),
			});
		}
		if input.color_space() != output.color_space() {
			return Err(TransformError::DifferentColorSpaces {
				input: input.color_space().as_str().to_string(),
				output: output.color_space().as_str().to_string(),
			});
		}
		Ok(())
	}
}

impl PixelTransform for HighBitTransform {
	fn initial_color_space(&self) -> &str {
		""
	}

	fn final_color_space(&self) -> &str {
		""
	}

	fn check_high_bit(&self, _input_high_bit: u32, _output_high_bit: u32) -> bool {
		true
	}

	fn allocate_output_image(
		&self,
		in_depth: Depth,
		in_color_space: &str,
		_in_high_bit: u32,
		_in_palette: Option<&Palette>,
		out_w: u32,
		out_h: u32,
	) -> Result<Image, TransformError> {
		Ok(Image::new(out_w, out_h, in_color_space, in_depth, in_depth.native_high_bit(), None)?)
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		Self::validate(input, in_rect, output, out_origin)?;
		let in_high_bit = input.high_bit();
		let out_high_bit = output.high_bit();
		let in_min = sample_min(input.depth(), in_high_bit);
		let out_min = sample_min(output.depth(), out_high_bit);

		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let centered = ins[0] - in_min;
			let shifted = if in_high_bit > out_high_bit {
				centered >> (in_high_bit - out_high_bit)
			} else {
				centered << (out_high_bit - in_high_bit)
			};
			outs[0] = out_min + shifted;
		});
		Ok(())
	}
}
