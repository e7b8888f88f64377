//! Prelude module for `dcm_core`.
//!
//! ```
//! use dcm_core::prelude::*;
//!
//! let image = Image::new(4, 4, "MONOCHROME2", Depth::U8, 7, None).unwrap();
//! assert_eq!(image.channels(), 1);
//! ```

#[doc(inline)]
pub use crate::{
	ColorSpace, Depth, Image, ImageError, Lut, MessageSink, NullSink, Overlay, OverlayKind,
	Palette, ReadHandle, Severity, SinkSlot, VoiDescription, VoiFunction, VoiList, WriteHandle,
};
