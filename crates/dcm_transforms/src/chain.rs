//! Transforms chain: composes transforms with automatic intermediate
//! allocation and row-strip streaming (§4.10).

use dcm_core::{Depth, Image, Palette};

use crate::error::TransformError;
use crate::high_bit::HighBitTransform;
use crate::transform::{PixelTransform, Rect};

/// An ordered sequence of non-empty transforms.
///
/// Adding an empty transform ([`PixelTransform::is_empty`]) is a silent
/// no-op.
#[derive(Debug, Default)]
pub struct TransformsChain {
	stages: Vec<Box<dyn PixelTransform>>,
}

impl TransformsChain {
	/// An empty chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `transform` unless it is empty.
	pub fn add(&mut self, transform: Box<dyn PixelTransform>) {
		if !transform.is_empty() {
			self.stages.push(transform);
		}
	}

	/// Number of non-empty stages.
	pub fn len(&self) -> usize {
		self.stages.len()
	}

	fn strip_rows(input_width: u32, input_height: u32) -> u32 {
		let by_width = if input_width == 0 { input_height } else { 65536 / input_width };
		input_height.min(by_width).max(1)
	}
}

impl PixelTransform for TransformsChain {
	fn initial_color_space(&self) -> &str {
		self.stages.first().map_or("", |t| t.initial_color_space())
	}

	fn final_color_space(&self) -> &str {
		self.stages.last().map_or("", |t| t.final_color_space())
	}

	fn is_empty(&self) -> bool {
		self.stages.is_empty()
	}

	fn check_high_bit(&self, input_high_bit: u32, output_high_bit: u32) -> bool {
		match self.stages.as_slice() {
			[] => input_high_bit == output_high_bit,
			[only] => only.check_high_bit(input_high_bit, output_high_bit),
			_ => true,
		}
	}

	fn allocate_output_image(
		&self,
		in_depth: Depth,
		in_color_space: &str,
		in_high_bit: u32,
		in_palette: Option<&Palette>,
		out_w: u32,
		out_h: u32,
	) -> Result<Image, TransformError> {
		if self.stages.is_empty() {
			return Ok(Image::new(out_w, out_h, in_color_space, in_depth, in_high_bit, None)?);
		}
		let mut depth = in_depth;
		let mut color_space = in_color_space.to_string();
		let mut high_bit = in_high_bit;

		for (i, stage) in self.stages.iter().enumerate() {
			let is_last = i == self.stages.len() - 1;
			let (w, h) = if is_last { (out_w, out_h) } else { (1, 1) };
			let image = stage.allocate_output_image(depth, &color_space, high_bit, in_palette, w, h)?;
			depth = image.depth();
			color_space = image.color_space().as_str().to_string();
			high_bit = image.high_bit();
			if is_last {
				return Ok(image);
			}
		}
		unreachable!("non-empty chain always returns from its last stage")
	}

	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError> {
		if self.stages.is_empty() {
			return HighBitTransform.run(input, in_rect, output, out_origin);
		}
		if self.stages.len() == 1 {
			return self.stages[0].run(input, in_rect, output, out_origin);
		}

		let strip_rows = Self::strip_rows(in_rect.w, in_rect.h);
		log::trace!(
			"chain: running {} stages over {}x{} in {}-row strips",
			self.stages.len(),
			in_rect.w,
			in_rect.h,
			strip_rows
		);
		let mut intermediates = Vec::with_capacity(self.stages.len() - 1);
		let mut depth = input.depth();
		let mut color_space = input.color_space().as_str().to_string();
		let mut high_bit = input.high_bit();
		for stage in &self.stages[..self.stages.len() - 1] {
			let image =
				stage.allocate_output_image(depth, &color_space, high_bit, input.palette(), in_rect.w, strip_rows)?;
			depth = image.depth();
			color_space = image.color_space().as_str().to_string();
			high_bit = image.high_bit();
			intermediates.push(image);
		}

		let mut remaining = in_rect.h;
		let mut in_y = in_rect.y;
		let mut out_y = out_origin.1;
		while remaining > 0 {
			let rows = strip_rows.min(remaining);
			let strip_in_rect = Rect { x: in_rect.x, y: in_y, w: in_rect.w, h: rows };
			log::trace!("chain: strip at in_y={in_y} out_y={out_y}, {rows} rows, {remaining} remaining");

			self.stages[0].run(input, strip_in_rect, &intermediates[0], (0, 0))?;
			for i in 1..intermediates.len() {
				let stage_rect = Rect { x: 0, y: 0, w: in_rect.w, h: rows };
				self.stages[i].run(&intermediates[i - 1], stage_rect, &intermediates[i], (0, 0))?;
			}
			let last_in_rect = Rect { x: 0, y: 0, w: in_rect.w, h: rows };
			self.stages[self.stages.len() - 1].run(
				intermediates.last().unwrap(),
				last_in_rect,
				output,
				(out_origin.0, out_y),
			)?;

			remaining -= rows;
			in_y += rows;
			out_y += rows;
		}
		Ok(())
	}
}
