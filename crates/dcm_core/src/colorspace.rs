//! Color-space name normalization and the static registry of recognized
//! spaces.
//!
//! The transform *factory* table (which pairs of spaces have a conversion)
//! lives in `dcm_transforms::registry`, since it has to name concrete
//! transform types this crate does not depend on. What lives here is the
//! static, name-only data: which names are known, how many channels they
//! carry, and the subsampling-suffix conventions DICOM attaches to chroma
//! spaces.

use crate::error::ImageError;

/// One entry of the static color-space table: `(normalized_name,
/// channel_count, can_subsample, is_monochrome)`.
struct Entry {
	name: &'static str,
	channels: usize,
	can_subsample: bool,
	is_monochrome: bool,
}

const REGISTRY: &[Entry] = &[
	Entry { name: "RGB", channels: 3, can_subsample: false, is_monochrome: false },
	Entry { name: "YBR_FULL", channels: 3, can_subsample: true, is_monochrome: false },
	Entry { name: "YBR_PARTIAL", channels: 3, can_subsample: true, is_monochrome: false },
	Entry { name: "YBR_RCT", channels: 3, can_subsample: true, is_monochrome: false },
	Entry { name: "YBR_ICT", channels: 3, can_subsample: true, is_monochrome: false },
	Entry { name: "PALETTE COLOR", channels: 1, can_subsample: false, is_monochrome: false },
	Entry { name: "CMYK", channels: 4, can_subsample: false, is_monochrome: false },
	Entry { name: "CMY", channels: 3, can_subsample: false, is_monochrome: false },
	Entry { name: "MONOCHROME2", channels: 1, can_subsample: false, is_monochrome: true },
	Entry { name: "MONOCHROME1", channels: 1, can_subsample: false, is_monochrome: true },
];

fn find(normalized: &str) -> Option<&'static Entry> {
	REGISTRY.iter().find(|e| e.name == normalized)
}

/// Strips a trailing DICOM subsampling suffix (`_422` or `_420`) and
/// upper-cases the remainder.
///
/// The suffix is located by the first occurrence of the substring `_42` in
/// `name`; everything from that point on is dropped. Names with no such
/// substring are upper-cased unchanged.
pub fn normalize(name: &str) -> String {
	let upper = name.to_ascii_uppercase();
	match upper.find("_42") {
		Some(idx) => upper[..idx].to_string(),
		None => upper,
	}
}

/// True when `name` carries a horizontal subsampling marker (`_422` or
/// `_420`), checked against the raw, un-normalized name.
pub fn is_subsampled_x(name: &str) -> bool {
	name.to_ascii_uppercase().contains("_42")
}

/// True when `name` carries the vertical subsampling marker (`_420`),
/// checked against the raw, un-normalized name.
pub fn is_subsampled_y(name: &str) -> bool {
	name.to_ascii_uppercase().contains("_420")
}

/// True when the normalized form of `name` is one of the `YBR_*` spaces,
/// which are the only spaces DICOM permits chroma subsampling on.
pub fn can_subsample(name: &str) -> bool {
	normalize(name).starts_with("YBR_")
}

/// Appends the appropriate subsampling suffix to `name` for the requested
/// `(sx, sy)` subsampling, or returns the normalized name unchanged if the
/// space cannot be subsampled.
pub fn make_subsampled(name: &str, sx: bool, sy: bool) -> String {
	let normalized = normalize(name);
	if !can_subsample(&normalized) {
		return normalized;
	}
	if sy {
		format!("{normalized}_420")
	} else if sx {
		format!("{normalized}_422")
	} else {
		normalized
	}
}

/// Number of interleaved channels carried by the normalized color space
/// `name`, or 0 if the space is not recognized.
pub fn channel_count(normalized_name: &str) -> usize {
	find(normalized_name).map_or(0, |e| e.channels)
}

/// True when the normalized color space `name` is one of the two
/// monochrome spaces.
pub fn is_monochrome(normalized_name: &str) -> bool {
	find(normalized_name).is_some_and(|e| e.is_monochrome)
}

/// Lightweight, validated handle on a normalized color-space name.
///
/// Construction fails with [`ImageError::UnknownColorSpace`] for anything
/// not in the static registry above.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorSpace(String);

impl ColorSpace {
	/// Normalizes `name` and validates it against the static registry.
	pub fn new(name: &str) -> Result<Self, ImageError> {
		let normalized = normalize(name);
		if channel_count(&normalized) == 0 {
			return Err(ImageError::UnknownColorSpace { name: name.to_string() });
		}
		Ok(Self(normalized))
	}

	/// The normalized name, e.g. `"MONOCHROME2"`.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Number of interleaved channels this space carries.
	pub fn channels(&self) -> usize {
		channel_count(&self.0)
	}

	/// True for `MONOCHROME1`/`MONOCHROME2`.
	pub fn is_monochrome(&self) -> bool {
		is_monochrome(&self.0)
	}
}

impl std::fmt::Display for ColorSpace {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
