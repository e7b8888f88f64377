use dicom_pixelkit::{registry, Depth, Image, Rect};

#[test]
fn rgb_to_ybr_rct_round_trips_losslessly() {
	let input = Image::new(4, 4, "RGB", Depth::U8, 7, None).unwrap();
	{
		let mut w = input.write_handle();
		for i in 0..input.element_count() {
			w.set_sample(i, ((i * 37) % 256) as i64);
		}
		w.commit();
	}

	let to_ybr = registry::get_transform("RGB", "YBR_RCT").unwrap();
	let ybr = to_ybr.allocate_output_image(input.depth(), "RGB", input.high_bit(), None, 4, 4).unwrap();
	to_ybr.run(&input, Rect::whole(4, 4), &ybr, (0, 0)).unwrap();

	let to_rgb = registry::get_transform("YBR_RCT", "RGB").unwrap();
	let back = to_rgb.allocate_output_image(ybr.depth(), "YBR_RCT", ybr.high_bit(), None, 4, 4).unwrap();
	to_rgb.run(&ybr, Rect::whole(4, 4), &back, (0, 0)).unwrap();

	let (a, b) = (input.read_handle(), back.read_handle());
	for i in 0..input.element_count() {
		assert_eq!(a.sample(i), b.sample(i));
	}
}

#[test]
fn two_step_bridge_converts_ybr_partial_to_monochrome() {
	let input = Image::new(2, 2, "YBR_PARTIAL", Depth::U8, 7, None).unwrap();
	{
		let mut w = input.write_handle();
		for i in 0..input.element_count() {
			w.set_sample(i, 100);
		}
		w.commit();
	}

	let transform = registry::get_transform("YBR_PARTIAL", "MONOCHROME2").unwrap();
	let out = transform.allocate_output_image(input.depth(), "YBR_PARTIAL", input.high_bit(), None, 2, 2).unwrap();
	transform.run(&input, Rect::whole(2, 2), &out, (0, 0)).unwrap();

	assert_eq!(out.color_space().as_str(), "MONOCHROME2");
}

#[test]
fn unresolvable_pair_reports_no_transform_available() {
	let err = registry::get_transform("CMYK", "MONOCHROME1").unwrap_err();
	assert!(matches!(err, dicom_pixelkit::TransformError::NoTransformAvailable { .. }));
}
