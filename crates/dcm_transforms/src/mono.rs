//! Monochrome identity/inversion and the monochrome/RGB conversions
//! (§4.4).

use dcm_core::depth::{num_values_minus_one, sample_min};
use dcm_core::Image;

use crate::error::TransformError;
use crate::transform::{run_rows, validate_run, PixelTransform, Rect};

/// `MONOCHROME1 -> MONOCHROME2` or `MONOCHROME2 -> MONOCHROME1`: both
/// directions are the same inversion formula.
#[derive(Debug)]
pub struct MonochromeInversion {
	initial: &'static str,
	final_: &'static str,
}

impl MonochromeInversion {
	/// `MONOCHROME1 -> MONOCHROME2`.
	pub fn mono1_to_mono2() -> Self {
		Self { initial: "MONOCHROME1", final_: "MONOCHROME2" }
	}

	/// `MONOCHROME2 -> MONOCHROME1`.
	pub fn mono2_to_mono1() -> Self {
		Self { initial: "MONOCHROME2", final_: "MONOCHROME1" }
	}
}

impl PixelTransform for MonochromeInversion {
	fn initial_color_space(&self) -> &str {
		self.initial
	}

	fn final_color_space(&self) -> &str {
		self.final_
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		validate_run(self, input, in_rect, output, out_origin)?;
		let in_min = sample_min(input.depth(), input.high_bit());
		let out_min = sample_min(output.depth(), output.high_bit());
		let n = num_values_minus_one(input.high_bit());
		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			outs[0] = out_min + (n - (ins[0] - in_min));
		});
		Ok(())
	}
}

/// `MONOCHROME2 -> RGB`: the rescaled monochrome sample replicated into all
/// three output channels.
#[derive(Debug)]
pub struct MonochromeToRgb;

impl PixelTransform for MonochromeToRgb {
	fn initial_color_space(&self) -> &str {
		"MONOCHROME2"
	}

	fn final_color_space(&self) -> &str {
		"RGB"
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		validate_run(self, input, in_rect, output, out_origin)?;
		let in_min = sample_min(input.depth(), input.high_bit());
		let out_min = sample_min(output.depth(), output.high_bit());
		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let v = out_min + (ins[0] - in_min);
			outs[0] = v;
			outs[1] = v;
			outs[2] = v;
		});
		Ok(())
	}
}

/// `RGB -> MONOCHROME2`: luma reduction using the same BT.601 weights as
/// the luma channel of [`crate::ybr::RgbToYbrFullLike`], reported as a
/// single monochrome channel instead of a chroma triple.
#[derive(Debug)]
pub struct RgbToMonochrome2;

impl PixelTransform for RgbToMonochrome2 {
	fn initial_color_space(&self) -> &str {
		"RGB"
	}

	fn final_color_space(&self) -> &str {
		"MONOCHROME2"
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		validate_run(self, input, in_rect, output, out_origin)?;
		let in_min = sample_min(input.depth(), input.high_bit());
		let out_min = sample_min(output.depth(), output.high_bit());
		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let r = ins[0] - in_min;
			let g = ins[1] - in_min;
			let b = ins[2] - in_min;
			let y = (4899 * r + 9617 * g + 1868 * b + 8191) >> 14;
			outs[0] = out_min + y;
		});
		Ok(())
	}
}
