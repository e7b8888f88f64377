//! End-to-end pipeline tests for `dicom-pixelkit`: exercises the public API
//! the way an external caller would, crossing the `dcm_core`/`dcm_transforms`
//! boundary through the root crate's re-exports.

mod bitmap;
mod chain;
mod colorspace;
mod voi;
