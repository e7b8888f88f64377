//! Pixel pipeline render demo
//!
//! A command-line tool that exercises the full decode-to-display path: it
//! builds a synthetic monochrome or RGB `Image`, optionally applies a
//! VOI/LUT window, runs it through [`BitmapRenderer`], and writes the
//! result as a PNG.
//!
//! # Usage
//!
//! ```bash
//! # Render a synthetic 16-bit monochrome gradient with a narrow window
//! cargo run -p render_demo -- gradient --width 256 --height 256 \
//!     --window-center 2048 --window-width 1024 -o gradient.png
//!
//! # Render a synthetic RGB test pattern, no color transform needed
//! cargo run -p render_demo -- rgb-pattern --width 256 --height 256 -o pattern.png
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dcm_core::{Depth, Image, VoiFunction};
use dcm_transforms::{BitmapRenderer, PixelFormat, TransformsChain, VoiLutTransform};
use image::{ImageBuffer, Rgb};

#[derive(Parser)]
#[command(name = "render_demo")]
#[command(author = "dicom-pixelkit project")]
#[command(version)]
#[command(about = "Renders synthetic pixel data through the display pipeline to a PNG", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Render a 16-bit monochrome gradient through an optional VOI window.
	Gradient {
		#[arg(long, default_value_t = 256)]
		width: u32,
		#[arg(long, default_value_t = 256)]
		height: u32,
		/// VOI window center; omit to use the raw full-range values.
		#[arg(long)]
		window_center: Option<f64>,
		/// VOI window width; required alongside `--window-center`.
		#[arg(long)]
		window_width: Option<f64>,
		#[arg(short, long, value_name = "OUTPUT_PNG")]
		output: PathBuf,
	},
	/// Render a synthetic RGB checkerboard test pattern.
	RgbPattern {
		#[arg(long, default_value_t = 256)]
		width: u32,
		#[arg(long, default_value_t = 256)]
		height: u32,
		#[arg(short, long, value_name = "OUTPUT_PNG")]
		output: PathBuf,
	},
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	match cli.command {
		Commands::Gradient { width, height, window_center, window_width, output } => {
			render_gradient(width, height, window_center, window_width, &output)
		}
		Commands::RgbPattern { width, height, output } => render_rgb_pattern(width, height, &output),
	}
}

fn render_gradient(
	width: u32,
	height: u32,
	window_center: Option<f64>,
	window_width: Option<f64>,
	output: &PathBuf,
) -> Result<()> {
	let image = Image::new(width, height, "MONOCHROME2", Depth::U16, 15, None).context("building gradient image")?;
	{
		let mut writer = image.write_handle();
		for y in 0..height {
			for x in 0..width {
				let value = ((x as u64 * 65535) / width.max(1) as u64) as i64;
				writer.set_sample(image.element_index(x, y, 0), value);
			}
		}
		writer.commit();
	}

	let renderer = match (window_center, window_width) {
		(Some(center), Some(width)) => {
			let mut chain = TransformsChain::new();
			chain.add(Box::new(VoiLutTransform::from_window(center, width, VoiFunction::Linear)));
			BitmapRenderer::with_chain(chain)
		}
		_ => BitmapRenderer::new(),
	};

	write_png(&renderer, &image, output)
}

fn render_rgb_pattern(width: u32, height: u32, output: &PathBuf) -> Result<()> {
	let image = Image::new(width, height, "RGB", Depth::U8, 7, None).context("building RGB pattern image")?;
	{
		let mut writer = image.write_handle();
		for y in 0..height {
			for x in 0..width {
				let on = ((x / 16) + (y / 16)) % 2 == 0;
				let (r, g, b) = if on { (220, 60, 60) } else { (40, 40, 200) };
				writer.set_sample(image.element_index(x, y, 0), r);
				writer.set_sample(image.element_index(x, y, 1), g);
				writer.set_sample(image.element_index(x, y, 2), b);
			}
		}
		writer.commit();
	}

	write_png(&BitmapRenderer::new(), &image, output)
}

fn write_png(renderer: &BitmapRenderer, image: &Image, output: &PathBuf) -> Result<()> {
	let required = renderer.get_bitmap(image, PixelFormat::Rgb, 1, None).context("sizing bitmap buffer")?;
	let mut buffer = vec![0u8; required];
	renderer.get_bitmap(image, PixelFormat::Rgb, 1, Some(&mut buffer)).context("rendering bitmap")?;

	let png: ImageBuffer<Rgb<u8>, _> =
		ImageBuffer::from_raw(image.width(), image.height(), buffer).context("bitmap buffer has unexpected length")?;
	png.save(output).with_context(|| format!("writing {}", output.display()))?;
	log::info!("wrote {}x{} PNG to {}", image.width(), image.height(), output.display());
	Ok(())
}
