//! Prelude module for `dcm_transforms`.
//!
//! ```
//! use dcm_transforms::prelude::*;
//!
//! let chain = TransformsChain::new();
//! assert!(chain.is_empty());
//! ```

#[doc(inline)]
pub use crate::{
	registry, BitmapRenderer, HighBitTransform, ModalityVoiLutTransform, PixelFormat,
	PixelTransform, Rect, TransformError, TransformsChain, VoiLutTransform,
};
