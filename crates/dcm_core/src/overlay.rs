//! Overlay bitplanes (§3): a 1-bit image bound to a range of frames of a
//! base image.

use crate::depth::Depth;
use crate::error::ImageError;
use crate::image::Image;

/// The two overlay kinds DICOM distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlayKind {
	/// A purely graphical annotation overlay.
	Graphic,
	/// A region-of-interest overlay, which may additionally carry
	/// `roi_area`/`roi_mean`/`roi_std_dev`.
	Roi,
}

/// A bitplane overlay attached to one or more frames of a base image.
#[derive(Debug)]
pub struct Overlay {
	kind: OverlayKind,
	first_frame: u32,
	origin_x: i32,
	origin_y: i32,
	roi_area: Option<f64>,
	roi_mean: Option<f64>,
	roi_std_dev: Option<f64>,
	subtype: String,
	label: String,
	description: String,
	frames: Vec<Image>,
}

impl Overlay {
	/// Creates an overlay of `frame_count` single-channel U8 images (high
	/// bit 0), each `width`x`height`, starting at `first_frame` (0-based).
	pub fn new(
		kind: OverlayKind,
		first_frame: u32,
		frame_count: u32,
		origin_x: i32,
		origin_y: i32,
		width: u32,
		height: u32,
	) -> Result<Self, ImageError> {
		let frame_count = frame_count.max(1);
		let mut frames = Vec::with_capacity(frame_count as usize);
		for _ in 0..frame_count {
			frames.push(Image::new(width, height, "MONOCHROME2", Depth::U8, 0, None)?);
		}
		Ok(Self {
			kind,
			first_frame,
			origin_x,
			origin_y,
			roi_area: None,
			roi_mean: None,
			roi_std_dev: None,
			subtype: String::new(),
			label: String::new(),
			description: String::new(),
			frames,
		})
	}

	/// Graphic or ROI.
	pub fn kind(&self) -> OverlayKind {
		self.kind
	}

	/// 0-based index of the first frame this overlay applies to.
	pub fn first_frame(&self) -> u32 {
		self.first_frame
	}

	/// Number of consecutive frames this overlay applies to.
	pub fn frame_count(&self) -> u32 {
		self.frames.len() as u32
	}

	/// 0-based horizontal offset into the base image.
	pub fn origin_x(&self) -> i32 {
		self.origin_x
	}

	/// 0-based vertical offset into the base image.
	pub fn origin_y(&self) -> i32 {
		self.origin_y
	}

	/// 1-based horizontal offset (`origin_x() + 1`).
	pub fn origin_x_1based(&self) -> i32 {
		self.origin_x + 1
	}

	/// 1-based vertical offset (`origin_y() + 1`).
	pub fn origin_y_1based(&self) -> i32 {
		self.origin_y + 1
	}

	/// The overlay subtype string.
	pub fn subtype(&self) -> &str {
		&self.subtype
	}

	/// Sets the overlay subtype string.
	pub fn set_subtype(&mut self, subtype: impl Into<String>) {
		self.subtype = subtype.into();
	}

	/// The overlay label string.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Sets the overlay label string.
	pub fn set_label(&mut self, label: impl Into<String>) {
		self.label = label.into();
	}

	/// The overlay description string.
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Sets the overlay description string.
	pub fn set_description(&mut self, description: impl Into<String>) {
		self.description = description.into();
	}

	/// Sets the ROI area statistic.
	pub fn set_roi_area(&mut self, value: f64) {
		self.roi_area = Some(value);
	}

	/// Sets the ROI mean statistic.
	pub fn set_roi_mean(&mut self, value: f64) {
		self.roi_mean = Some(value);
	}

	/// Sets the ROI standard deviation statistic.
	pub fn set_roi_std_dev(&mut self, value: f64) {
		self.roi_std_dev = Some(value);
	}

	/// The ROI area statistic, or [`ImageError::MissingTagError`] if unset.
	pub fn roi_area(&self) -> Result<f64, ImageError> {
		self.roi_area.ok_or(ImageError::MissingTagError("roi_area"))
	}

	/// The ROI mean statistic, or [`ImageError::MissingTagError`] if unset.
	pub fn roi_mean(&self) -> Result<f64, ImageError> {
		self.roi_mean.ok_or(ImageError::MissingTagError("roi_mean"))
	}

	/// The ROI standard deviation statistic, or
	/// [`ImageError::MissingTagError`] if unset.
	pub fn roi_std_dev(&self) -> Result<f64, ImageError> {
		self.roi_std_dev.ok_or(ImageError::MissingTagError("roi_std_dev"))
	}

	/// The per-frame bitplane images.
	pub fn frames(&self) -> &[Image] {
		&self.frames
	}

	/// Mutable access to the per-frame bitplane images.
	pub fn frames_mut(&mut self) -> &mut [Image] {
		&mut self.frames
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn frame_count_clamps_to_at_least_one() {
		let overlay = Overlay::new(OverlayKind::Graphic, 0, 0, 0, 0, 4, 4).unwrap();
		assert_eq!(overlay.frame_count(), 1);
	}

	#[test]
	fn one_based_accessors_add_one() {
		let overlay = Overlay::new(OverlayKind::Graphic, 2, 1, 10, 20, 4, 4).unwrap();
		assert_eq!(overlay.origin_x_1based(), 11);
		assert_eq!(overlay.origin_y_1based(), 21);
	}

	#[test]
	fn roi_stats_missing_by_default() {
		let overlay = Overlay::new(OverlayKind::Roi, 0, 1, 0, 0, 4, 4).unwrap();
		assert!(overlay.roi_area().is_err());

		let mut overlay = overlay;
		overlay.set_roi_area(12.5);
		assert_eq!(overlay.roi_area().unwrap(), 12.5);
	}

	#[test]
	fn frames_are_single_channel_u8() {
		let overlay = Overlay::new(OverlayKind::Graphic, 0, 3, 0, 0, 8, 6).unwrap();
		assert_eq!(overlay.frames().len(), 3);
		for frame in overlay.frames() {
			assert_eq!(frame.channels(), 1);
			assert_eq!(frame.depth(), Depth::U8);
			assert_eq!(frame.high_bit(), 0);
		}
	}
}
