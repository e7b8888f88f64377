//! Core image/pixel data model for `dicom-pixelkit`.
//!
//! This crate owns the types that do not need to know about the transform
//! machinery: [`Image`] and its read/write handlers, [`Lut`]/[`Palette`],
//! [`Overlay`], the VOI window descriptors, the static color-space
//! registry, the shared [`buffer::MemoryBuffer`], and the [`MessageSink`]
//! diagnostic channel. The transform catalog and execution engine that
//! operate on these types live in `dcm_transforms`.

pub mod buffer;
pub mod collab;
pub mod colorspace;
pub mod depth;
pub mod error;
pub mod image;
pub mod lut;
pub mod overlay;
pub mod palette;
pub mod prelude;
pub mod sink;
pub mod voi;

pub use colorspace::ColorSpace;
pub use depth::Depth;
pub use error::ImageError;
pub use image::{Image, ReadHandle, WriteHandle};
pub use lut::Lut;
pub use overlay::{Overlay, OverlayKind};
pub use palette::Palette;
pub use sink::{MessageSink, NullSink, Severity, SinkSlot};
pub use voi::{VoiDescription, VoiFunction, VoiList};

/// Number of interleaved channels a color space carries, re-exported at
/// crate root for callers that only need the count (not a full
/// [`ColorSpace`] handle).
pub type Channels = usize;
