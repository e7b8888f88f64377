use dicom_pixelkit::{optimal_voi, Depth, Image, ModalityVoiLutTransform, PixelTransform, Rect, VoiFunction, VoiLutTransform};

#[test]
fn modality_rescale_then_optimal_voi_spans_full_output_range() {
	let input = Image::new(3, 1, "MONOCHROME2", Depth::U16, 15, None).unwrap();
	{
		let mut w = input.write_handle();
		w.set_sample(0, 10);
		w.set_sample(1, 20);
		w.set_sample(2, 30);
		w.commit();
	}

	let modality = ModalityVoiLutTransform::new(2.0, -5.0, None);
	let rescaled =
		modality.allocate_output_image(input.depth(), "MONOCHROME2", input.high_bit(), None, 3, 1).unwrap();
	modality.run(&input, Rect::whole(3, 1), &rescaled, (0, 0)).unwrap();

	{
		let r = rescaled.read_handle();
		assert_eq!(r.sample(0), 15); // 10*2 - 5
		assert_eq!(r.sample(1), 35);
		assert_eq!(r.sample(2), 55);
	}

	let description = optimal_voi(&rescaled, Rect::whole(3, 1)).unwrap();
	assert_eq!(description.function, VoiFunction::Linear);

	let window = VoiLutTransform::from_window(description.center, description.width, description.function);
	let displayed =
		window.allocate_output_image(rescaled.depth(), "MONOCHROME2", rescaled.high_bit(), None, 3, 1).unwrap();
	window.run(&rescaled, Rect::whole(3, 1), &displayed, (0, 0)).unwrap();

	let reader = displayed.read_handle();
	let out_min = reader.sample(0).min(reader.sample(1)).min(reader.sample(2));
	let out_max = reader.sample(0).max(reader.sample(1)).max(reader.sample(2));
	assert_eq!(out_min, 0);
	assert!(out_max > out_min);
}
