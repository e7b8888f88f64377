//! External collaborator traits (§6).
//!
//! The core only specifies the narrow interfaces it needs from the dataset
//! parser, the codec layer, and byte streams; it ships no implementation of
//! any of them beyond the test doubles used in this crate's own tests. The
//! fourth collaborator, the diagnostic sink, is [`crate::MessageSink`].

use std::error::Error as StdError;

use crate::image::Image;
use crate::lut::Lut;
use crate::overlay::Overlay;
use crate::voi::VoiList;

/// Supplies decoded images, palettes, LUTs, VOI descriptions, overlays,
/// modality rescale parameters, and per-frame functional-group lookups.
pub trait DatasetSource {
	/// The error type this source's operations may fail with.
	type Error: StdError;

	/// The functional-group sub-dataset handle this source hands back from
	/// [`DatasetSource::functional_group`]. Left opaque to this trait: the
	/// core has no dataset-element model of its own (that lives in the
	/// dataset-parsing layer, out of scope here), so it only needs a handle
	/// it can pass back to the same source's other per-frame lookups.
	type FunctionalGroup;

	/// Decodes and returns the image for `frame` (0-based).
	fn frame_image(&self, frame: u32) -> Result<Image, Self::Error>;

	/// Returns the overlay bound to `frame`, if the dataset carries one.
	fn overlay(&self, frame: u32) -> Result<Option<Overlay>, Self::Error>;

	/// Returns the LUT stored under `tag`, if present.
	fn lut(&self, tag: u32) -> Result<Option<Lut>, Self::Error>;

	/// Returns the VOI window list applicable to `frame`.
	fn voi_list(&self, frame: u32) -> Result<VoiList, Self::Error>;

	/// Returns the functional-group sub-dataset that chooses `frame`'s
	/// per-frame imaging parameters, if the dataset carries per-frame
	/// functional groups at all.
	fn functional_group(&self, frame: u32) -> Result<Option<Self::FunctionalGroup>, Self::Error>;

	/// Returns the rescale slope/intercept applicable to `frame`.
	fn rescale(&self, frame: u32) -> Result<(f64, f64), Self::Error>;

	/// Returns the modality LUT applicable to `frame`, if present.
	fn modality_lut(&self, frame: u32) -> Result<Option<Lut>, Self::Error>;
}

/// Decodes an encoded image frame into an [`Image`] at a given transfer
/// syntax identifier. Encoding is out of scope for the core.
pub trait CodecFactory {
	/// The error type decoding may fail with.
	type Error: StdError;

	/// Decodes `data` (one frame's worth of encoded bytes) under
	/// `transfer_syntax_uid` into a decoded [`Image`].
	fn decode_frame(&self, data: &[u8], transfer_syntax_uid: &str) -> Result<Image, Self::Error>;
}

/// A sequential byte source.
pub trait ByteReader {
	/// The error type reads may fail with.
	type Error: StdError;

	/// Reads up to `buf.len()` bytes, returning the number actually read
	/// (0 at end of stream).
	fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

	/// Releases any resources held by the stream. Idempotent.
	fn terminate(&mut self) -> Result<(), Self::Error>;
}

/// A sequential byte sink.
pub trait ByteWriter {
	/// The error type writes may fail with.
	type Error: StdError;

	/// Writes all of `buf`.
	fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

	/// Releases any resources held by the stream. Idempotent.
	fn terminate(&mut self) -> Result<(), Self::Error>;
}
