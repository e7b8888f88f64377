//! RGB <-> YBR_FULL / YBR_PARTIAL / YBR_ICT / YBR_RCT (§4.6).
//!
//! All matrix transforms use fixed-point arithmetic with 14 fractional
//! bits (divisor 16384); every accumulator stays within `i64` for the
//! validated 32-bit high-bit range.

use dcm_core::depth::{sample_max, sample_min};
use dcm_core::{Depth, Image};

use crate::error::TransformError;
use crate::transform::{run_rows, validate_run, PixelTransform, Rect};

fn clamp(v: i64, out_min: i64, out_high_bit: u32) -> i64 {
	let out_max = out_min + (1i64 << (out_high_bit + 1)) - 1;
	v.clamp(out_min, out_max)
}

/// `RGB -> YBR_FULL` or `RGB -> YBR_ICT`: the ITU-R BT.601 full-range
/// matrix. Both share identical coefficients; only the reported output
/// color space differs.
#[derive(Debug)]
pub struct RgbToYbrFullLike {
	final_: &'static str,
}

impl RgbToYbrFullLike {
	/// `RGB -> YBR_FULL`.
	pub fn ybr_full() -> Self {
		Self { final_: "YBR_FULL" }
	}

	/// `RGB -> YBR_ICT`.
	pub fn ybr_ict() -> Self {
		Self { final_: "YBR_ICT" }
	}
}

impl PixelTransform for RgbToYbrFullLike {
	fn initial_color_space(&self) -> &str {
		"RGB"
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
		let out_high_bit = output.high_bit();
		let out_middle = out_min + (1i64 << out_high_bit);

		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let r = ins[0] - in_min;
			let g = ins[1] - in_min;
			let b = ins[2] - in_min;
			let y = (4899 * r + 9617 * g + 1868 * b + 8191) >> 14;
			let cb = (-2765 * r - 5427 * g + 8192 * b + 8191) >> 14;
			let cr = (8192 * r - 6860 * g - 1332 * b + 8191) >> 14;
			outs[0] = clamp(out_min + y, out_min, out_high_bit);
			outs[1] = clamp(out_middle + cb, out_min, out_high_bit);
			outs[2] = clamp(out_middle + cr, out_min, out_high_bit);
		});
		Ok(())
	}
}

/// `YBR_FULL -> RGB` or `YBR_ICT -> RGB`: the inverse BT.601 full-range
/// matrix, shared by both source spaces.
#[derive(Debug)]
pub struct YbrFullLikeToRgb {
	initial: &'static str,
}

impl YbrFullLikeToRgb {
	/// `YBR_FULL -> RGB`.
	pub fn ybr_full() -> Self {
		Self { initial: "YBR_FULL" }
	}

	/// `YBR_ICT -> RGB`.
	pub fn ybr_ict() -> Self {
		Self { initial: "YBR_ICT" }
	}
}

impl PixelTransform for YbrFullLikeToRgb {
	fn initial_color_space(&self) -> &str {
		self.initial
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
		let in_middle = in_min + (1i64 << input.high_bit());
		let out_min = sample_min(output.depth(), output.high_bit());
		let out_high_bit = output.high_bit();

		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let y = ins[0] - in_min;
			let cb = ins[1] - in_middle;
			let cr = ins[2] - in_middle;
			let r = y + ((22970 * cr) >> 14);
			let g = y - ((5638 * cb + 11700 * cr) >> 14);
			let b = y + ((29032 * cb) >> 14);
			outs[0] = clamp(out_min + r, out_min, out_high_bit);
			outs[1] = clamp(out_min + g, out_min, out_high_bit);
			outs[2] = clamp(out_min + b, out_min, out_high_bit);
		});
		Ok(())
	}
}

/// `RGB -> YBR_PARTIAL`: the BT.601 studio-range matrix.
#[derive(Debug)]
pub struct RgbToYbrPartial;

impl PixelTransform for RgbToYbrPartial {
	fn initial_color_space(&self) -> &str {
		"RGB"
	}

	fn final_color_space(&self) -> &str {
		"YBR_PARTIAL"
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
		let out_high_bit = output.high_bit();
		let out_middle = out_min + (1i64 << out_high_bit);
		let min_y = out_min + (1i64 << (out_high_bit - 3));

		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let r = ins[0] - in_min;
			let g = ins[1] - in_min;
			let b = ins[2] - in_min;
			let y = (4207 * r + 8259 * g + 1604 * b + 8191) >> 14;
			let cb = (7196 * b - 2428 * r - 4768 * g + 8191) >> 14;
			let cr = (7196 * r - 6026 * g - 1170 * b + 8191) >> 14;
			outs[0] = clamp(min_y + y, out_min, out_high_bit);
			outs[1] = clamp(out_middle + cb, out_min, out_high_bit);
			outs[2] = clamp(out_middle + cr, out_min, out_high_bit);
		});
		Ok(())
	}
}

/// `YBR_PARTIAL -> RGB`: the inverse BT.601 studio-range matrix, derived
/// algebraically from the forward matrix in [`RgbToYbrPartial`] (the
/// source repo's exact constants for this direction are not given; these
/// are the standard ITU-R BT.601 limited-range inverse coefficients at the
/// same 14-bit fixed point).
#[derive(Debug)]
pub struct YbrPartialToRgb;

impl PixelTransform for YbrPartialToRgb {
	fn initial_color_space(&self) -> &str {
		"YBR_PARTIAL"
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
		let in_high_bit = input.high_bit();
		let in_min = sample_min(input.depth(), in_high_bit);
		let in_middle = in_min + (1i64 << in_high_bit);
		let min_y = in_min + (1i64 << (in_high_bit - 3));
		let out_min = sample_min(output.depth(), output.high_bit());
		let out_high_bit = output.high_bit();

		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let y = (ins[0] - min_y) * 19070 >> 14;
			let cb = ins[1] - in_middle;
			let cr = ins[2] - in_middle;
			let r = y + ((26149 * cr) >> 14);
			let g = y - ((6406 * cb + 13320 * cr) >> 14);
			let b = y + ((33062 * cb) >> 14);
			outs[0] = clamp(out_min + r, out_min, out_high_bit);
			outs[1] = clamp(out_min + g, out_min, out_high_bit);
			outs[2] = clamp(out_min + b, out_min, out_high_bit);
		});
		Ok(())
	}
}

/// `RGB -> YBR_RCT`: the lossless reversible color transform. Grows the
/// output's high bit by one, promoting the depth to the smallest type that
/// fits it while preserving the input's signedness parity.
#[derive(Debug)]
pub struct RgbToYbrRct;

impl PixelTransform for RgbToYbrRct {
	fn initial_color_space(&self) -> &str {
		"RGB"
	}

	fn final_color_space(&self) -> &str {
		"YBR_RCT"
	}

	fn check_high_bit(&self, input_high_bit: u32, output_high_bit: u32) -> bool {
		output_high_bit == input_high_bit + 1
	}

	fn allocate_output_image(
		&self,
		in_depth: Depth,
		_in_color_space: &str,
		in_high_bit: u32,
		_in_palette: Option<&dcm_core::Palette>,
		out_w: u32,
		out_h: u32,
	) -> Result<Image, TransformError> {
		let high_bit = in_high_bit + 1;
		let depth = Depth::smallest_for_high_bit(high_bit, in_depth.is_signed());
		Ok(Image::new(out_w, out_h, self.final_color_space(), depth, high_bit, None)?)
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
		let out_high_bit = output.high_bit();
		let out_middle = out_min + (1i64 << out_high_bit);

		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let r = ins[0] - in_min;
			let g = ins[1] - in_min;
			let b = ins[2] - in_min;
			let y = ((r + 2 * g + b) >> 2) + out_min;
			let cb = (b - g) + out_middle;
			let cr = (r - g) + out_middle;
			outs[0] = y;
			outs[1] = clamp(cb, out_min, out_high_bit);
			outs[2] = clamp(cr, out_min, out_high_bit);
		});
		Ok(())
	}
}

/// `YBR_RCT -> RGB`: the exact inverse of [`RgbToYbrRct`].
#[derive(Debug)]
pub struct YbrRctToRgb;

impl PixelTransform for YbrRctToRgb {
	fn initial_color_space(&self) -> &str {
		"YBR_RCT"
	}

	fn final_color_space(&self) -> &str {
		"RGB"
	}

	fn check_high_bit(&self, input_high_bit: u32, output_high_bit: u32) -> bool {
		input_high_bit == output_high_bit + 1
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		validate_run(self, input, in_rect, output, out_origin)?;
		let in_high_bit = input.high_bit();
		let in_min = sample_min(input.depth(), in_high_bit);
		let in_middle = in_min + (1i64 << in_high_bit);
		let out_min = sample_min(output.depth(), output.high_bit());
		let out_max = sample_max(output.depth(), output.high_bit());

		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			let y = ins[0] - in_min;
			let cb = ins[1] - in_middle;
			let cr = ins[2] - in_middle;
			let g = y - ((cb + cr) >> 2);
			let r = cr + g;
			let b = cb + g;
			outs[0] = (out_min + r).clamp(out_min, out_max);
			outs[1] = (out_min + g).clamp(out_min, out_max);
			outs[2] = (out_min + b).clamp(out_min, out_max);
		});
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rct_reversibility_matches_scenario_3() {
		let input = Image::new(1, 1, "RGB", Depth::U8, 7, None).unwrap();
		{
			let mut w = input.write_handle();
			w.set_sample(0, 200);
			w.set_sample(1, 100);
			w.set_sample(2, 50);
			w.commit();
		}
		let encoded = RgbToYbrRct
			.allocate_output_image(input.depth(), "RGB", input.high_bit(), None, 1, 1)
			.unwrap();
		assert_eq!(encoded.depth(), Depth::U16);
		assert_eq!(encoded.high_bit(), 8);

		RgbToYbrRct.run(&input, Rect::whole(1, 1), &encoded, (0, 0)).unwrap();
		let r = encoded.read_handle();
		assert_eq!((r.sample(0), r.sample(1), r.sample(2)), (112, 206, 356));

		let decoded = Image::new(1, 1, "RGB", Depth::U8, 7, None).unwrap();
		YbrRctToRgb.run(&encoded, Rect::whole(1, 1), &decoded, (0, 0)).unwrap();
		let d = decoded.read_handle();
		assert_eq!((d.sample(0), d.sample(1), d.sample(2)), (200, 100, 50));
	}

	#[test]
	fn full_round_trip_is_within_one() {
		let input = Image::new(1, 1, "RGB", Depth::U8, 7, None).unwrap();
		{
			let mut w = input.write_handle();
			w.set_sample(0, 120);
			w.set_sample(1, 45);
			w.set_sample(2, 200);
			w.commit();
		}
		let ybr = Image::new(1, 1, "YBR_FULL", Depth::U8, 7, None).unwrap();
		RgbToYbrFullLike::ybr_full().run(&input, Rect::whole(1, 1), &ybr, (0, 0)).unwrap();
		let back = Image::new(1, 1, "RGB", Depth::U8, 7, None).unwrap();
		YbrFullLikeToRgb::ybr_full().run(&ybr, Rect::whole(1, 1), &back, (0, 0)).unwrap();

		let orig = [120i64, 45, 200];
		let r = back.read_handle();
		for c in 0..3 {
			assert!((r.sample(c) - orig[c]).abs() <= 1);
		}
	}
}
