//! The transform catalog and execution engine that operate on
//! `dcm_core::Image`.
//!
//! This crate owns everything that has to name a concrete [`PixelTransform`]
//! implementation: the color-space conversions, the high-bit and VOI/LUT
//! rescales, the [`registry`] factory lookup, the [`TransformsChain`], and
//! the [`BitmapRenderer`].

pub mod bitmap;
pub mod chain;
pub mod error;
pub mod high_bit;
pub mod mono;
pub mod modality_voi;
pub mod palette_rgb;
pub mod prelude;
pub mod registry;
pub mod transform;
pub mod voi_lut;
pub mod ybr;

pub use bitmap::{BitmapRenderer, PixelFormat};
pub use chain::TransformsChain;
pub use error::TransformError;
pub use high_bit::HighBitTransform;
pub use modality_voi::ModalityVoiLutTransform;
pub use transform::{validate_run, PixelTransform, Rect};
pub use voi_lut::{optimal_voi, VoiLutTransform};
