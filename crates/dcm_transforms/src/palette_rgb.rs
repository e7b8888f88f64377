//! `PALETTE COLOR -> RGB` (§4.5).

use dcm_core::depth::sample_min;
use dcm_core::Image;

use crate::error::TransformError;
use crate::transform::{run_rows, PixelTransform, Rect};

/// Expands a palette-indexed image to RGB via its attached palette's three
/// LUTs.
#[derive(Debug)]
pub struct PaletteToRgb;

impl PaletteToRgb {
	/// Validates `run`'s preconditions. Unlike the shared `validate_run`,
	/// the high-bit check here compares the palette's own bit width (not
	/// the input image's declared `high_bit`) against the output's
	/// `high_bit`: the palette is the authority on the effective input
	/// high bit for this transform, matching the original
	/// `PALETTECOLORToRGBImpl`'s `checkHighBit(palette->getRed()->getBits()
	/// - 1, outputHighBit)`.
	fn validate(input: &Image, in_rect: Rect, output: &Image, out_origin: (u32, u32)) -> Result<(), TransformError> {
		let in_fits = in_rect.x.checked_add(in_rect.w).is_some_and(|r| r <= input.width())
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
		if input.color_space().as_str() != "PALETTE COLOR" {
			return Err(TransformError::WrongColorSpace {
				expected: "PALETTE COLOR".to_string(),
				actual: input.color_space().as_str().to_string(),
			});
		}
		if output.color_space().as_str() != "RGB" {
			return Err(TransformError::WrongColorSpace {
				expected: "RGB".to_string(),
				actual: output.color_space().as_str().to_string(),
			});
		}
		let palette = input.palette().ok_or(TransformError::MissingPalette)?;
		let effective_input_high_bit = palette.bits() - 1;
		if effective_input_high_bit != output.high_bit() {
			return Err(TransformError::DifferentHighBit {
				input: effective_input_high_bit,
				output: output.high_bit(),
			});
		}
		Ok(())
	}
}

impl PixelTransform for PaletteToRgb {
	fn initial_color_space(&self) -> &str {
		"PALETTE COLOR"
	}

	fn final_color_space(&self) -> &str {
		"RGB"
	}

	/// Bypassed: [`PaletteToRgb::validate`] checks the palette-derived
	/// effective input high bit directly instead of the image's own
	/// `high_bit`.
	fn check_high_bit(&self, _input_high_bit: u32, _output_high_bit: u32) -> bool {
		true
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		Self::validate(input, in_rect, output, out_origin)?;
		let palette = input.palette().ok_or(TransformError::MissingPalette)?;
		let out_min = sample_min(output.depth(), output.high_bit());
		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let (r, g, b) = palette.map(ins[0]);
			outs[0] = out_min + r;
			outs[1] = out_min + g;
			outs[2] = out_min + b;
		});
		Ok(())
	}
}
