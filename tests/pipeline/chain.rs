use dicom_pixelkit::{registry, Depth, Image, PixelTransform, Rect, TransformsChain};

#[test]
fn composed_chain_matches_individually_run_stages() {
	let input = Image::new(3, 5, "MONOCHROME1", Depth::U8, 7, None).unwrap();
	{
		let mut w = input.write_handle();
		for i in 0..input.element_count() {
			w.set_sample(i, (i * 17 % 256) as i64);
		}
		w.commit();
	}

	let mut chain = TransformsChain::new();
	chain.add(registry::get_transform("MONOCHROME1", "MONOCHROME2").unwrap());
	chain.add(registry::get_transform("MONOCHROME2", "RGB").unwrap());
	assert_eq!(chain.len(), 2);

	let via_chain =
		chain.allocate_output_image(input.depth(), "MONOCHROME1", input.high_bit(), None, 3, 5).unwrap();
	chain.run(&input, Rect::whole(3, 5), &via_chain, (0, 0)).unwrap();

	let to_mono2 = registry::get_transform("MONOCHROME1", "MONOCHROME2").unwrap();
	let mono2 = to_mono2.allocate_output_image(input.depth(), "MONOCHROME1", input.high_bit(), None, 3, 5).unwrap();
	to_mono2.run(&input, Rect::whole(3, 5), &mono2, (0, 0)).unwrap();

	let to_rgb = registry::get_transform("MONOCHROME2", "RGB").unwrap();
	let rgb = to_rgb.allocate_output_image(mono2.depth(), "MONOCHROME2", mono2.high_bit(), None, 3, 5).unwrap();
	to_rgb.run(&mono2, Rect::whole(3, 5), &rgb, (0, 0)).unwrap();

	let (a, b) = (via_chain.read_handle(), rgb.read_handle());
	for i in 0..rgb.element_count() {
		assert_eq!(a.sample(i), b.sample(i));
	}
}

#[test]
fn empty_chain_is_a_no_op_identity() {
	let chain = TransformsChain::new();
	assert!(chain.is_empty());
	assert_eq!(chain.len(), 0);
}
