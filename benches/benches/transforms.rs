//! Benchmark suite for the color-space, chain, and bitmap-rendering hot paths.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dcm_benches::sizes;
use dcm_core::{Depth, Image};
use dcm_transforms::registry::get_transform;
use dcm_transforms::{BitmapRenderer, PixelFormat, PixelTransform, Rect, VoiLutTransform};

fn bench_color_space_transforms(c: &mut Criterion) {
	let mut group = c.benchmark_group("colorspace_convert");

	for (name, size) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM)] {
		let (w, h) = size;
		let input = dcm_benches::rgb_image(w, h, 1);
		group.throughput(Throughput::Elements((w * h) as u64));

		for (src, dst) in [("RGB", "YBR_FULL"), ("RGB", "YBR_RCT"), ("RGB", "MONOCHROME2")] {
			let transform = get_transform(src, dst).unwrap();
			let output =
				transform.allocate_output_image(input.depth(), src, input.high_bit(), None, w, h).unwrap();
			group.bench_with_input(BenchmarkId::new(format!("{src}_to_{dst}"), name), &input, |b, input| {
				b.iter(|| {
					transform.run(black_box(input), Rect::whole(w, h), &output, (0, 0)).unwrap();
				});
			});
		}
	}

	group.finish();
}

fn bench_round_trip_chain(c: &mut Criterion) {
	let mut group = c.benchmark_group("colorspace_round_trip");
	let (w, h) = sizes::MEDIUM;
	let input = dcm_benches::rgb_image(w, h, 2);

	let to_ybr = get_transform("RGB", "YBR_FULL").unwrap();
	let ybr = to_ybr.allocate_output_image(input.depth(), "RGB", input.high_bit(), None, w, h).unwrap();
	to_ybr.run(&input, Rect::whole(w, h), &ybr, (0, 0)).unwrap();

	let to_rgb = get_transform("YBR_FULL", "RGB").unwrap();
	let back = to_rgb.allocate_output_image(ybr.depth(), "YBR_FULL", ybr.high_bit(), None, w, h).unwrap();

	group.throughput(Throughput::Elements((w * h) as u64));
	group.bench_function("ybr_full_round_trip", |b| {
		b.iter(|| {
			to_rgb.run(black_box(&ybr), Rect::whole(w, h), &back, (0, 0)).unwrap();
		});
	});
	group.finish();
}

fn bench_voi_window(c: &mut Criterion) {
	let mut group = c.benchmark_group("voi_window");
	let (w, h) = sizes::MEDIUM;
	let input = dcm_benches::monochrome_image(w, h, Depth::U16, 15, 3);
	let transform = VoiLutTransform::from_window(2048.0, 4096.0, dcm_core::VoiFunction::Linear);
	let output =
		transform.allocate_output_image(input.depth(), "MONOCHROME2", input.high_bit(), None, w, h).unwrap();

	group.throughput(Throughput::Elements((w * h) as u64));
	group.bench_function("linear_window_u16", |b| {
		b.iter(|| {
			transform.run(black_box(&input), Rect::whole(w, h), &output, (0, 0)).unwrap();
		});
	});
	group.finish();
}

fn bench_bitmap_render(c: &mut Criterion) {
	let mut group = c.benchmark_group("bitmap_render");
	let (w, h) = sizes::MEDIUM;
	let rgb = dcm_benches::rgb_image(w, h, 4);
	let renderer = BitmapRenderer::new();
	let required = renderer.get_bitmap(&rgb, PixelFormat::Bgra, 4, None).unwrap();
	let mut buffer = vec![0u8; required];

	group.throughput(Throughput::Bytes(required as u64));
	group.bench_function("rgb_to_bgra", |b| {
		b.iter(|| {
			renderer.get_bitmap(black_box(&rgb), PixelFormat::Bgra, 4, Some(&mut buffer)).unwrap();
		});
	});
	group.finish();
}

fn bench_full_display_pipeline(c: &mut Criterion) {
	let mut group = c.benchmark_group("bitmap_render_from_monochrome");
	let (w, h) = sizes::MEDIUM;
	let mono: Image = dcm_benches::monochrome_image(w, h, Depth::U16, 15, 5);
	let renderer = BitmapRenderer::new();
	let required = renderer.get_bitmap(&mono, PixelFormat::Rgb, 1, None).unwrap();
	let mut buffer = vec![0u8; required];

	group.throughput(Throughput::Bytes(required as u64));
	group.bench_function("monochrome16_to_rgb8", |b| {
		b.iter(|| {
			renderer.get_bitmap(black_box(&mono), PixelFormat::Rgb, 1, Some(&mut buffer)).unwrap();
		});
	});
	group.finish();
}

criterion_group!(
	benches,
	bench_color_space_transforms,
	bench_round_trip_chain,
	bench_voi_window,
	bench_bitmap_render,
	bench_full_display_pipeline,
);
criterion_main!(benches);
