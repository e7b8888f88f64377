//! The common pixel-transform contract (§4.3).

use dcm_core::{Depth, Image, Palette};

use crate::error::TransformError;

/// A rectangular sub-region of an image, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
	/// Left edge.
	pub x: u32,
	/// Top edge.
	pub y: u32,
	/// Width.
	pub w: u32,
	/// Height.
	pub h: u32,
}

impl Rect {
	/// A rect covering the whole of `width`x`height`.
	pub fn whole(width: u32, height: u32) -> Self {
		Self { x: 0, y: 0, w: width, h: height }
	}

	fn fits_within(&self, width: u32, height: u32) -> bool {
		self.x.checked_add(self.w).is_some_and(|r| r <= width)
			&& self.y.checked_add(self.h).is_some_and(|b| b <= height)
	}
}

/// A polymorphic operator from one input image to one output image
/// (§3 "Transform").
///
/// Implementations hold only configuration (LUTs, descriptors); they never
/// own the images they process.
pub trait PixelTransform: std::fmt::Debug {
	/// The transform's required input color space (normalized).
	fn initial_color_space(&self) -> &str;

	/// The transform's required output color space (normalized).
	fn final_color_space(&self) -> &str;

	/// True when this transform is a no-op; such transforms are silently
	/// skipped when added to a [`crate::TransformsChain`].
	fn is_empty(&self) -> bool {
		false
	}

	/// The high-bit precondition this transform enforces between input and
	/// output. The default requires equality; the YBR_RCT encoder requires
	/// `output == input + 1`.
	fn check_high_bit(&self, input_high_bit: u32, output_high_bit: u32) -> bool {
		input_high_bit == output_high_bit
	}

	/// Chooses the shape of an output image for this transform, given the
	/// input's depth/color-space/high-bit/palette and a requested output
	/// size. The default keeps the input's depth and high bit and uses
	/// [`PixelTransform::final_color_space`].
	fn allocate_output_image(
		&self,
		in_depth: Depth,
		_in_color_space: &str,
		in_high_bit: u32,
		_in_palette: Option<&Palette>,
		out_w: u32,
		out_h: u32,
	) -> Result<Image, TransformError> {
		Ok(Image::new(out_w, out_h, self.final_color_space(), in_depth, in_high_bit, None)?)
	}

	/// Writes the transform's output for `in_rect` of `input` into `output`
	/// at `out_origin`.
	fn run(
		&self,
		input: &Image,
		in_rect: Rect,
		output: &Image,
		out_origin: (u32, u32),
	) -> Result<(), TransformError>;
}

/// Validates the common `run` preconditions shared by every transform
/// (§4.3): area bounds, color-space endpoints, and the high-bit rule.
pub fn validate_run(
	transform: &dyn PixelTransform,
	input: &Image,
	in_rect: Rect,
	output: &Image,
	out_origin: (u32, u32),
) -> Result<(), TransformError> {
	if !in_rect.fits_within(input.width(), input.height()) {
		return Err(TransformError::InvalidTransformArea {
			x: in_rect.x,
			y: in_rect.y,
			w: in_rect.w,
			h: in_rect.h,
			image_w: input.width(),
			image_h: input.height(),
		});
	}
	let out_rect = Rect { x: out_origin.0, y: out_origin.1, w: in_rect.w, h: in_rect.h };
	if !out_rect.fits_within(output.width(), output.height()) {
		return Err(TransformError::InvalidTransformArea {
			x: out_rect.x,
			y: out_rect.y,
			w: out_rect.w,
			h: out_rect.h,
			image_w: output.width(),
			image_h: output.height(),
		});
	}
	if input.color_space().as_str() != transform.initial_color_space() {
		return Err(TransformError::WrongColorSpace {
			expected: transform.initial_color_space().to_string(),
			actual: input.color_space().as_str().to_string(),
		});
	}
	if output.color_space().as_str() != transform.final_color_space() {
		return Err(TransformError::WrongColorSpace {
			expected: transform.final_color_space().to_string(),
			actual: output.color_space().as_str().to_string(),
		});
	}
	if !transform.check_high_bit(input.high_bit(), output.high_bit()) {
		return Err(TransformError::DifferentHighBit {
			input: input.high_bit(),
			output: output.high_bit(),
		});
	}
	Ok(())
}

/// Iterates `in_rect` of `input` row-major, calling `pixel_fn` with each
/// pixel's input channel samples (widened to `i64`) and a scratch buffer to
/// fill with that pixel's output channel samples, then writes the scratch
/// buffer into `output` at the corresponding position under `out_origin`.
///
/// This is the shared implementation of §4.3's "Sample layout for
/// iteration": the element-type dispatch happens once per sample inside
/// [`dcm_core::Image::read_handle`]/[`dcm_core::Image::write_handle`] (a
/// `match` over the six depths), rather than via 36 monomorphized inner
/// loops — alternative (b) of spec's element-type-polymorphism design note.
pub fn run_rows(
	input: &Image,
	in_rect: Rect,
	output: &Image,
	out_origin: (u32, u32),
	mut pixel_fn: impl FnMut(&[i64], &mut [i64]),
) {
	let in_channels = input.channels();
	let out_channels = output.channels();
	let reader = input.read_handle();
	let mut writer = output.write_handle();

	let mut in_samples = [0i64; 4];
	let mut out_samples = [0i64; 4];

	for row in 0..in_rect.h {
		let in_y = in_rect.y + row;
		let out_y = out_origin.1 + row;
		for col in 0..in_rect.w {
			let in_x = in_rect.x + col;
			let out_x = out_origin.0 + col;

			for c in 0..in_channels {
				in_samples[c] = reader.sample(input.element_index(in_x, in_y, c));
			}
			pixel_fn(&in_samples[..in_channels], &mut out_samples[..out_channels]);
			for c in 0..out_channels {
				writer.set_sample(output.element_index(out_x, out_y, c), out_samples[c]);
			}
		}
	}
	writer.commit();
}
