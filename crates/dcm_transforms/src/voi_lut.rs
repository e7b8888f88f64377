//! VOI/LUT: the window or presentation-LUT stage that maps raw values to
//! the display range (§4.8).

use dcm_core::depth::sample_min;
use dcm_core::{Depth, Image, Lut, Palette, VoiDescription, VoiFunction};

use crate::error::TransformError;
use crate::transform::{run_rows, validate_run, PixelTransform, Rect};

/// Applies either a presentation LUT or a `(center, width, function)`
/// window to a monochrome image.
#[derive(Debug)]
pub struct VoiLutTransform {
	lut: Option<Lut>,
	center: f64,
	width: f64,
	function: VoiFunction,
}

impl VoiLutTransform {
	/// Builds a window-based transform.
	pub fn from_window(center: f64, width: f64, function: VoiFunction) -> Self {
		Self { lut: None, center, width, function }
	}

	/// Builds a LUT-based transform.
	pub fn from_lut(lut: Lut) -> Self {
		Self { lut: Some(lut), center: 0.0, width: 0.0, function: VoiFunction::Linear }
	}
}

impl PixelTransform for VoiLutTransform {
	fn initial_color_space(&self) -> &str {
		"MONOCHROME2"
	}

	fn final_color_space(&self) -> &str {
		"MONOCHROME2"
	}

	fn is_empty(&self) -> bool {
		self.lut.is_none() && self.width < 1.0
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
			let depth = if lut.bits() > 8 { Depth::U16 } else { Depth::U8 };
			return Ok(Image::new(out_w, out_h, in_color_space, depth, lut.bits() - 1, None)?);
		}
		if self.width <= 1.0 {
			return Ok(Image::new(out_w, out_h, in_color_space, in_depth, in_high_bit, None)?);
		}
		let depth = in_depth.promote_unsigned_for_window();
		Ok(Image::new(out_w, out_h, in_color_space, depth, in_high_bit, None)?)
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		validate_run(self, input, in_rect, output, out_origin)?;
		let out_min = sample_min(output.depth(), output.high_bit());

		if let Some(lut) = &self.lut {
			run_rows(input, in_rect, output, out_origin, |ins, outs| {
				outs[0] = out_min + lut.map(ins[0]);
			});
			return Ok(());
		}

		let out_high_bit = output.high_bit();
		let n = 1i64 << (out_high_bit + 1);
		let out_max = out_min + n - 1;
		let span = (out_max - out_min) as f64;
		let center = self.center;
		let width = self.width;

		match self.function {
			VoiFunction::Linear if width <= 1.0 => {
				let threshold = center - 0.5;
				run_rows(input, in_rect, output, out_origin, |ins, outs| {
					outs[0] = if (ins[0] as f64) > threshold { out_max } else { out_min };
				});
			}
			VoiFunction::Linear => {
				run_rows(input, in_rect, output, out_origin, |ins, outs| {
					let v = ((ins[0] as f64 - (center - 0.5)) / (width - 1.0) + 0.5) * span + out_min as f64;
					outs[0] = (v.round() as i64).clamp(out_min, out_max);
				});
			}
			VoiFunction::LinearExact => {
				run_rows(input, in_rect, output, out_origin, |ins, outs| {
					let v = ((ins[0] as f64 - center) / width) * span + out_min as f64;
					outs[0] = (v.round() as i64).clamp(out_min, out_max);
				});
			}
			VoiFunction::Sigmoid => {
				run_rows(input, in_rect, output, out_origin, |ins, outs| {
					let v = span / (1.0 + (-4.0 * (ins[0] as f64 - center) / width).exp()) + out_min as f64;
					outs[0] = (v.round() as i64).clamp(out_min, out_max);
				});
			}
		}
		Ok(())
	}
}

/// Scans `rect` of `image` for its sample extrema and returns the window
/// that maps `[minV, maxV]` onto the display range (§4.8 "Optimal VOI
/// computation").
pub fn optimal_voi(image: &Image, rect: Rect) -> Result<VoiDescription, TransformError> {
	let fits = rect.x.checked_add(rect.w).is_some_and(|r| r <= image.width())
		&& rect.y.checked_add(rect.h).is_some_and(|b| b <= image.height());
	if !fits {
		return Err(TransformError::InvalidTransformArea {
			x: rect.x,
			y: rect.y,
			w: rect.w,
			h: rect.h,
			image_w: image.width(),
			image_h: image.height(),
		});
	}

	let reader = image.read_handle();
	let mut min_v = i64::MAX;
	let mut max_v = i64::MIN;
	for row in 0..rect.h {
		let y = rect.y + row;
		for col in 0..rect.w {
			let x = rect.x + col;
			let v = reader.sample(image.element_index(x, y, 0));
			min_v = min_v.min(v);
			max_v = max_v.max(v);
		}
	}

	let center = ((max_v + min_v + 1) as f64) / 2.0;
	let width = 2.0 * (center - min_v as f64);
	Ok(VoiDescription::new(center, width, VoiFunction::Linear))
}
