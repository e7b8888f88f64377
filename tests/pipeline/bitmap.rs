use dicom_pixelkit::{BitmapRenderer, Depth, Image, PixelFormat};

#[test]
fn palette_image_renders_to_rgba_with_opaque_alpha() {
	use dicom_pixelkit::{Lut, Palette};

	let red = Lut::from_entries(8, 0, vec![0, 255]);
	let green = Lut::from_entries(8, 0, vec![255, 0]);
	let blue = Lut::from_entries(8, 0, vec![0, 255]);
	let palette = Palette::from_luts(red, green, blue).unwrap();

	let image = Image::new(2, 1, "PALETTE COLOR", Depth::U8, 7, Some(palette)).unwrap();
	{
		let mut w = image.write_handle();
		w.set_sample(0, 0);
		w.set_sample(1, 255);
		w.commit();
	}

	let renderer = BitmapRenderer::new();
	let required = renderer.get_bitmap(&image, PixelFormat::Rgba, 1, None).unwrap();
	assert_eq!(required, 8);

	let mut buf = vec![0u8; required];
	renderer.get_bitmap(&image, PixelFormat::Rgba, 1, Some(&mut buf)).unwrap();
	assert_eq!(buf[3], 0xFF);
	assert_eq!(buf[7], 0xFF);
	assert_eq!(&buf[0..3], &[0, 255, 0]);
	assert_eq!(&buf[4..7], &[255, 0, 255]);
}

#[test]
fn already_display_ready_image_passes_through_unchanged() {
	let image = Image::new(2, 2, "RGB", Depth::U8, 7, None).unwrap();
	{
		let mut w = image.write_handle();
		for i in 0..image.element_count() {
			w.set_sample(i, i as i64);
		}
		w.commit();
	}

	let renderer = BitmapRenderer::new();
	let required = renderer.get_bitmap(&image, PixelFormat::Rgb, 1, None).unwrap();
	let mut buf = vec![0u8; required];
	renderer.get_bitmap(&image, PixelFormat::Rgb, 1, Some(&mut buf)).unwrap();
	let expected: Vec<u8> = (0..image.element_count() as u8).collect();
	assert_eq!(buf, expected);
}
