//! Error types for the image/pixel data model.
//!
//! Transform-execution errors (wrong color space, mismatched high bit, …)
//! live in `dcm_transforms::error::TransformError` instead, since they are
//! raised by code that does not live in this crate.

use thiserror::Error;

/// Errors raised while constructing or querying the core data model:
/// [`crate::Image`], [`crate::Palette`], [`crate::Lut`], and
/// [`crate::Overlay`].
#[derive(Debug, Error)]
pub enum ImageError {
	/// An image was constructed with `width == 0` or `height == 0`.
	#[error("invalid image size: {width}x{height}")]
	InvalidImageSize {
		/// Requested width in pixels.
		width: u32,
		/// Requested height in pixels.
		height: u32,
	},

	/// A color-space name is not present in the static registry.
	#[error("unknown color space: {name}")]
	UnknownColorSpace {
		/// The raw (un-normalized) name that was rejected.
		name: String,
	},

	/// A depth value outside the six supported depths was requested.
	#[error("unknown depth: {0}")]
	UnknownDepth(u32),

	/// An overlay ROI statistic was requested on an overlay that does not
	/// carry one (only ROI-typed overlays carry `roi_area`/`roi_mean`/
	/// `roi_std_dev`).
	#[error("missing tag: {0}")]
	MissingTagError(&'static str),

	/// Signed sample data was observed in a buffer declared with an
	/// unsigned depth.
	#[error("corrupted file: signed sample data under declared unsigned depth")]
	CodecCorruptedFile,

	/// A [`crate::Palette`]'s three LUTs do not share the same `bits` and
	/// `size`.
	#[error("palette LUT mismatch: red is {red_bits}-bit/{red_size}, but {other} is {other_bits}-bit/{other_size}")]
	PaletteLutMismatch {
		/// Bit width of the red LUT.
		red_bits: u32,
		/// Entry count of the red LUT.
		red_size: usize,
		/// Which channel mismatched (`"green"` or `"blue"`).
		other: &'static str,
		/// Bit width of the mismatched channel's LUT.
		other_bits: u32,
		/// Entry count of the mismatched channel's LUT.
		other_size: usize,
	},

	/// An operation was canceled by an external collaborator (never raised
	/// internally).
	#[error("canceled")]
	Canceled,

	/// An external stream collaborator was closed mid-operation (never
	/// raised internally).
	#[error("closed")]
	Closed,
}
