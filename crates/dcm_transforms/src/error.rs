//! Errors raised while allocating output images for, or running, a pixel
//! transform (§7).

use thiserror::Error;

/// Errors raised by [`crate::PixelTransform::run`],
/// [`crate::PixelTransform::allocate_output_image`], and
/// [`crate::BitmapRenderer::get_bitmap`].
#[derive(Debug, Error)]
pub enum TransformError {
	/// A transform's declared endpoint color space did not match the
	/// image passed to `run`.
	#[error("wrong color space: expected {expected}, got {actual}")]
	WrongColorSpace {
		/// The transform's declared color space.
		expected: String,
		/// The image's actual color space.
		actual: String,
	},

	/// A transform's `checkHighBit` precondition was violated.
	#[error("different high bit: input has {input}, output has {output}")]
	DifferentHighBit {
		/// The input image's high bit.
		input: u32,
		/// The output image's high bit.
		output: u32,
	},

	/// The high-bit transform was asked to rescale between two different
	/// color spaces.
	#[error("different color spaces: input is {input}, output is {output}")]
	DifferentColorSpaces {
		/// The input image's color space.
		input: String,
		/// The output image's color space.
		output: String,
	},

	/// A `run` or optimal-VOI rectangle fell outside the bounds of the
	/// image it was given against.
	#[error(
		"invalid transform area: rect ({x},{y},{w},{h}) does not fit in a {image_w}x{image_h} image"
	)]
	InvalidTransformArea {
		/// Rectangle x origin.
		x: u32,
		/// Rectangle y origin.
		y: u32,
		/// Rectangle width.
		w: u32,
		/// Rectangle height.
		h: u32,
		/// The image's actual width.
		image_w: u32,
		/// The image's actual height.
		image_h: u32,
	},

	/// Modality VOI/LUT was applied to a non-monochrome image.
	#[error("modality VOI error: image is not monochrome")]
	ModalityVoiError,

	/// The color-space registry found no one- or two-step conversion path.
	#[error("no transform available from {origin} to {destination}")]
	NoTransformAvailable {
		/// Normalized source color space.
		origin: String,
		/// Normalized destination color space.
		destination: String,
	},

	/// A pixel transform was invoked on a `PALETTE COLOR` image with no
	/// attached palette.
	#[error("missing palette on PALETTE COLOR image")]
	MissingPalette,

	/// Propagated from a collaborator stream; never raised internally.
	#[error(transparent)]
	Collaborator(#[from] Box<dyn std::error::Error + Send + Sync>),

	/// Propagated from an image-model error (e.g. allocating an output
	/// image with an invalid size).
	#[error(transparent)]
	Image(#[from] dcm_core::ImageError),
}
