//! The transform factory table and `get_transform` lookup (§4.2, §9
//! "Color-space registry as data, not inheritance").
//!
//! This module owns the `(source, destination) -> factory` table; the
//! pure name/channel-count registry it builds on lives in
//! `dcm_core::colorspace`.

use dcm_core::colorspace::normalize;

use crate::chain::TransformsChain;
use crate::error::TransformError;
use crate::mono::{MonochromeInversion, MonochromeToRgb, RgbToMonochrome2};
use crate::palette_rgb::PaletteToRgb;
use crate::transform::PixelTransform;
use crate::ybr::{RgbToYbrFullLike, RgbToYbrPartial, RgbToYbrRct, YbrFullLikeToRgb, YbrPartialToRgb, YbrRctToRgb};

type Factory = fn() -> Box<dyn PixelTransform>;

const DIRECT: &[(&str, &str, Factory)] = &[
	("MONOCHROME1", "MONOCHROME2", || Box::new(MonochromeInversion::mono1_to_mono2())),
	("MONOCHROME2", "MONOCHROME1", || Box::new(MonochromeInversion::mono2_to_mono1())),
	("MONOCHROME2", "RGB", || Box::new(MonochromeToRgb)),
	("RGB", "MONOCHROME2", || Box::new(RgbToMonochrome2)),
	("PALETTE COLOR", "RGB", || Box::new(PaletteToRgb)),
	("RGB", "YBR_FULL", || Box::new(RgbToYbrFullLike::ybr_full())),
	("YBR_FULL", "RGB", || Box::new(YbrFullLikeToRgb::ybr_full())),
	("RGB", "YBR_ICT", || Box::new(RgbToYbrFullLike::ybr_ict())),
	("YBR_ICT", "RGB", || Box::new(YbrFullLikeToRgb::ybr_ict())),
	("RGB", "YBR_RCT", || Box::new(RgbToYbrRct)),
	("YBR_RCT", "RGB", || Box::new(YbrRctToRgb)),
	("RGB", "YBR_PARTIAL", || Box::new(RgbToYbrPartial)),
	("YBR_PARTIAL", "RGB", || Box::new(YbrPartialToRgb)),
	("MONOCHROME2", "YBR_FULL", || chain_of(&[("MONOCHROME2", "RGB"), ("RGB", "YBR_FULL")])),
	("YBR_FULL", "MONOCHROME2", || chain_of(&[("YBR_FULL", "RGB"), ("RGB", "MONOCHROME2")])),
	("MONOCHROME2", "YBR_ICT", || chain_of(&[("MONOCHROME2", "RGB"), ("RGB", "YBR_ICT")])),
	("YBR_ICT", "MONOCHROME2", || chain_of(&[("YBR_ICT", "RGB"), ("RGB", "MONOCHROME2")])),
];

/// The two intermediates the two-step fallback is allowed to route
/// through.
const BRIDGES: &[&str] = &["RGB", "MONOCHROME2"];

fn find_direct(src: &str, dst: &str) -> Option<Factory> {
	DIRECT.iter().find(|(s, d, _)| *s == src && *d == dst).map(|(_, _, f)| *f)
}

fn chain_of(pairs: &[(&str, &str)]) -> Box<dyn PixelTransform> {
	let mut chain = TransformsChain::new();
	for (src, dst) in pairs {
		let factory = find_direct(src, dst).expect("internal composite factory references a direct pair");
		chain.add(factory());
	}
	Box::new(chain)
}

/// Looks up (or synthesizes) a transform from `src` to `dst`, both
/// normalized first.
///
/// 1. If the normalized endpoints are equal, returns an empty
///    [`TransformsChain`] (its `is_empty()` is `true`).
/// 2. A direct factory, if one is registered.
/// 3. A two-step chain through [`BRIDGES`], if one exists.
/// 4. [`TransformError::NoTransformAvailable`] otherwise.
pub fn get_transform(src: &str, dst: &str) -> Result<Box<dyn PixelTransform>, TransformError> {
	let src = normalize(src);
	let dst = normalize(dst);

	if src == dst {
		return Ok(Box::new(TransformsChain::new()));
	}
	if let Some(factory) = find_direct(&src, &dst) {
		return Ok(factory());
	}
	for bridge in BRIDGES {
		if *bridge == src || *bridge == dst {
			continue;
		}
		if let (Some(first), Some(second)) = (find_direct(&src, bridge), find_direct(bridge, &dst)) {
			log::trace!("registry: no direct {src} -> {dst}, routing through bridge {bridge}");
			let mut chain = TransformsChain::new();
			chain.add(first());
			chain.add(second());
			return Ok(Box::new(chain));
		}
	}
	log::warn!("registry: no transform available from {src} to {dst}");
	Err(TransformError::NoTransformAvailable { origin: src, destination: dst })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_is_empty() {
		let t = get_transform("RGB", "RGB").unwrap();
		assert!(t.is_empty());
	}

	#[test]
	fn direct_pair_resolves() {
		let t = get_transform("MONOCHROME2", "RGB").unwrap();
		assert!(!t.is_empty());
	}

	#[test]
	fn two_step_bridge_resolves() {
		// CMYK has no registered path at all, even via a bridge.
		assert!(get_transform("CMYK", "MONOCHROME2").is_err());
		// YBR_PARTIAL -> MONOCHROME2 has no direct factory but is reachable
		// through RGB.
		let t = get_transform("YBR_PARTIAL", "MONOCHROME2").unwrap();
		assert!(!t.is_empty());
	}

	#[test]
	fn registry_idempotence() {
		assert_eq!(normalize(&normalize("ybr_full_422")), normalize("ybr_full_422"));
		assert!(get_transform("RGB", "RGB").unwrap().is_empty());
	}
}
