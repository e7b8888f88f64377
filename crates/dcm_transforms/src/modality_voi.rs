//! Modality VOI/LUT: the first-stage rescale from raw device samples to a
//! standardized unit (§4.7).

use dcm_core::depth::{sample_max, sample_min};
use dcm_core::{Depth, Image, Lut, Palette};

use crate::error::TransformError;
use crate::transform::{run_rows, PixelTransform, Rect};

const LADDER: [(Depth, u32); 4] =
	[(Depth::U8, 7), (Depth::S8, 7), (Depth::U16, 15), (Depth::S16, 15)];

fn round_toward_zero(v: f64) -> i64 {
	v as i64
}

fn rescale(value: i64, slope: f64, intercept: f64) -> i64 {
	round_toward_zero(value as f64 * slope + intercept)
}

/// Rescales raw device samples to a standardized unit, either via a
/// modality LUT or a linear `slope`/`intercept` pair.
#[derive(Debug)]
pub struct ModalityVoiLutTransform {
	lut: Option<Lut>,
	slope: f64,
	intercept: f64,
}

impl ModalityVoiLutTransform {
	/// Builds the transform from a dataset-provided rescale slope/intercept
	/// and an optional modality LUT. When `lut` has entries, it takes
	/// priority over `slope`/`intercept` at `run` time.
	pub fn new(rescale_slope: f64, rescale_intercept: f64, lut: Option<Lut>) -> Self {
		Self { lut, slope: rescale_slope, intercept: rescale_intercept }
	}

	fn has_lut(&self) -> bool {
		self.lut.as_ref().is_some_and(|l| l.size() > 0)
	}

	fn slope_is_usable(&self) -> bool {
		self.slope.abs() >= f64::MIN_POSITIVE
	}

	fn validate(input: &Image, in_rect: Rect, output: &Image, out_origin: (u32, u32)) -> Result<(), TransformError> {
		if !input.color_space().is_monochrome() || !output.color_space().is_monochrome() {
			return Err(TransformError::ModalityVoiError);
		}
		let in_fits = in_rect.x.checked_add(in_rect.w).is_some_and(|r| r <= input.width())
			&& in_rect.y.checked_add(in_rect.h).is_some_and(|b| b <= input.height());
		let out_fits = out_origin.0.checked_add(in_rect.w).is_some_and(|r| r <= output.width())
			&& out_origin.1.checked_add(in_rect.h).is_some_and(|b| b <= output.height());
		if !in_fits || !out_fits {
			return Err(TransformError::InvalidTransformArea {
				x: in_rect.x,
				y: in_rect.y,
				w: in_rect.w,
				h: in_rect.h,
				image_w: input.width(),
				image_h: input.height(),
			});
		}
		Ok(())
	}

	fn rescaled_range(&self, in_depth: Depth, in_high_bit: u32) -> (i64, i64) {
		let lo = sample_min(in_depth, in_high_bit);
		let hi = sample_max(in_depth, in_high_bit);
		let a = rescale(lo, self.slope, self.intercept);
		let b = rescale(hi, self.slope, self.intercept);
		(a.min(b), a.max(b))
	}
}

impl PixelTransform for ModalityVoiLutTransform {
	fn initial_color_space(&self) -> &str {
		"MONOCHROME2"
	}

	fn final_color_space(&self) -> &str {
		"MONOCHROME2"
	}

	fn is_empty(&self) -> bool {
		!self.has_lut() && !self.slope_is_usable()
	}

	fn check_high_bit(&self, _input_high_bit: u32, _output_high_bit: u32) -> bool {
		true
	}

	fn allocate_output_image(
		&self,
		in_depth: Depth,
		in_color_space: &str,
		in_high_bit: u32,
		_in_palette: Option<&Palette>,
		out_w: u32,
		out_h: u32,
	) -> Result<Image, TransformError> {
		if self.is_empty() {
			return Ok(Image::new(out_w, out_h, in_color_space, in_depth, in_high_bit, None)?);
		}
		if let Some(lut) = &self.lut {
			if lut.size() > 0 {
				let depth = if lut.bits() > 8 { Depth::U16 } else { Depth::U8 };
				return Ok(Image::new(out_w, out_h, in_color_space, depth, lut.bits() - 1, None)?);
			}
		}
		if !self.slope_is_usable() {
			return Ok(Image::new(out_w, out_h, in_color_space, in_depth, in_high_bit, None)?);
		}
		let (lo, hi) = self.rescaled_range(in_depth, in_high_bit);
		for (depth, high_bit) in LADDER {
			if lo >= sample_min(depth, high_bit) && hi <= sample_max(depth, high_bit) {
				return Ok(Image::new(out_w, out_h, in_color_space, depth, high_bit, None)?);
			}
		}
		Ok(Image::new(out_w, out_h, in_color_space, Depth::S32, 31, None)?)
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		Self::validate(input, in_rect, output, out_origin)?;
		let out_min = sample_min(output.depth(), output.high_bit());

		if let Some(lut) = &self.lut {
			if lut.size() > 0 {
				run_rows(input, in_rect, output, out_origin, |ins, outs| {
					outs[0] = out_min + lut.map(ins[0]);
				});
				return Ok(());
			}
		}
		let slope = self.slope;
		let intercept = self.intercept;
		run_rows(input, in_rect, output, out_origin, |ins, outs| {
			outs[0] = rescale(ins[0], slope, intercept);
		});
		Ok(())
	}
}
