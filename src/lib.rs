//! `dicom-pixelkit` is a library for decoding, transforming, and rendering the
//! pixel data carried by DICOM datasets.
//!
//! It covers the image model (§3), the color-space transform catalog and
//! execution engine, the VOI/LUT and Modality VOI/LUT rescaling transforms,
//! the transforms chain, and the bitmap renderer. Dataset parsing, file I/O,
//! network association, and codecs are external collaborators — see
//! [`dcm_core::collab`] for the narrow traits this crate expects of them.

pub use dcm_core;
pub use dcm_transforms;

#[doc(inline)]
pub use dcm_core::{
	Channels, ColorSpace, Depth, Image, ImageError, Lut, MessageSink, Overlay, OverlayKind,
	Palette, Severity, VoiDescription, VoiFunction, VoiList,
};

#[doc(inline)]
pub use dcm_transforms::{
	BitmapRenderer, HighBitTransform, ModalityVoiLutTransform, PixelFormat, PixelTransform, Rect,
	TransformError, TransformsChain, VoiLutTransform, optimal_voi, registry,
};
