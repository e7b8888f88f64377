//! The decoded raster image (§3) and its reading/writing handlers (§4.1).

use std::cell::RefCell;
use std::sync::Arc;

use crate::buffer::MemoryBuffer;
use crate::colorspace::ColorSpace;
use crate::depth::Depth;
use crate::error::ImageError;
use crate::palette::Palette;

fn read_sample(bytes: &[u8], depth: Depth, index: usize) -> i64 {
	let w = depth.byte_width();
	let off = index * w;
	match depth {
		Depth::U8 => bytes[off] as i64,
		Depth::S8 => bytes[off] as i8 as i64,
		Depth::U16 => u16::from_le_bytes([bytes[off], bytes[off + 1]]) as i64,
		Depth::S16 => i16::from_le_bytes([bytes[off], bytes[off + 1]]) as i64,
		Depth::U32 => {
			u32::from_le_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]]) as i64
		}
		Depth::S32 => {
			i32::from_le_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]]) as i64
		}
	}
}

fn write_sample(bytes: &mut [u8], depth: Depth, index: usize, value: i64) {
	let w = depth.byte_width();
	let off = index * w;
	match depth {
		Depth::U8 => bytes[off] = value as u8,
		Depth::S8 => bytes[off] = value as i8 as u8,
		Depth::U16 => bytes[off..off + 2].copy_from_slice(&(value as u16).to_le_bytes()),
		Depth::S16 => bytes[off..off + 2].copy_from_slice(&(value as i16).to_le_bytes()),
		Depth::U32 => bytes[off..off + 4].copy_from_slice(&(value as u32).to_le_bytes()),
		Depth::S32 => bytes[off..off + 4].copy_from_slice(&(value as i32).to_le_bytes()),
	}
}

/// A read-only snapshot of an image's pixel buffer, typed by the image's
/// [`Depth`].
///
/// Multiple read handles may coexist with no coordination (§5): each holds
/// its own clone of the buffer's `Arc`, so a concurrent writer committing a
/// new buffer never mutates what an existing reader sees.
#[derive(Debug, Clone)]
pub struct ReadHandle {
	buffer: Arc<MemoryBuffer>,
	depth: Depth,
}

impl ReadHandle {
	/// The element type samples are stored as.
	pub fn depth(&self) -> Depth {
		self.depth
	}

	/// Reads the sample at flat element `index` (i.e. `(y * width + x) *
	/// channels + channel`).
	pub fn sample(&self, index: usize) -> i64 {
		read_sample(self.buffer.as_slice(), self.depth, index)
	}

	/// Borrows the handle's underlying bytes directly, for callers that
	/// want to bulk-copy rather than go sample by sample.
	pub fn as_bytes(&self) -> &[u8] {
		self.buffer.as_slice()
	}
}

/// An exclusive, writable pixel buffer that replaces the owning image's
/// buffer when [`WriteHandle::commit`] is called.
///
/// Dropping a handle without committing discards the write, leaving the
/// image's previously-committed buffer (if any) untouched.
pub struct WriteHandle<'a> {
	image: &'a Image,
	buffer: MemoryBuffer,
	depth: Depth,
	committed: bool,
}

impl WriteHandle<'_> {
	/// The element type samples must be written as.
	pub fn depth(&self) -> Depth {
		self.depth
	}

	/// Writes `value` at flat element `index`.
	pub fn set_sample(&mut self, index: usize, value: i64) {
		write_sample(self.buffer.as_mut_slice(), self.depth, index, value);
	}

	/// Atomically replaces the image's pixel buffer with this handle's
	/// buffer.
	pub fn commit(mut self) {
		self.committed = true;
		*self.image.buffer.borrow_mut() = Some(Arc::new(std::mem::take(&mut self.buffer)));
	}
}

/// A decoded raster: a pixel buffer plus the metadata needed to interpret
/// it (§3).
#[derive(Debug)]
pub struct Image {
	width: u32,
	height: u32,
	color_space: ColorSpace,
	depth: Depth,
	high_bit: u32,
	palette: Option<Palette>,
	buffer: RefCell<Option<Arc<MemoryBuffer>>>,
}

impl Image {
	/// Constructs a new image. `width`/`height` must both be at least 1;
	/// `high_bit` is clamped to `depth`'s native high bit if it exceeds it.
	/// `palette` is dropped unless `color_space` normalizes to `"PALETTE
	/// COLOR"`.
	pub fn new(
		width: u32,
		height: u32,
		color_space: &str,
		depth: Depth,
		high_bit: u32,
		palette: Option<Palette>,
	) -> Result<Self, ImageError> {
		if width == 0 || height == 0 {
			return Err(ImageError::InvalidImageSize { width, height });
		}
		let color_space = ColorSpace::new(color_space)?;
		let high_bit = high_bit.min(depth.native_high_bit());
		let palette = if color_space.as_str() == "PALETTE COLOR" { palette } else { None };

		Ok(Self { width, height, color_space, depth, high_bit, palette, buffer: RefCell::new(None) })
	}

	/// Width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// The image's normalized color space.
	pub fn color_space(&self) -> &ColorSpace {
		&self.color_space
	}

	/// Number of interleaved channels, derived from the color space.
	pub fn channels(&self) -> usize {
		self.color_space.channels()
	}

	/// The element storage type of each sample.
	pub fn depth(&self) -> Depth {
		self.depth
	}

	/// Index of the most significant meaningful bit of each sample,
	/// clamped to `depth`'s native width at construction.
	pub fn high_bit(&self) -> u32 {
		self.high_bit
	}

	/// Whether samples are two's-complement signed, derived from `depth`.
	pub fn signed_samples(&self) -> bool {
		self.depth.is_signed()
	}

	/// The image's palette, non-null only for `PALETTE COLOR` images.
	pub fn palette(&self) -> Option<&Palette> {
		self.palette.as_ref()
	}

	/// Total number of interleaved elements (`width * height * channels`).
	pub fn element_count(&self) -> usize {
		self.width as usize * self.height as usize * self.channels()
	}

	/// Size in bytes the backing buffer occupies once materialized.
	pub fn byte_len(&self) -> usize {
		self.element_count() * self.depth.byte_width()
	}

	/// Flat element index of channel `channel` at pixel `(x, y)`.
	pub fn element_index(&self, x: u32, y: u32, channel: usize) -> usize {
		(y as usize * self.width as usize + x as usize) * self.channels() + channel
	}

	/// A read-only snapshot of the current pixel buffer. An image that was
	/// never written reads as all zero.
	pub fn read_handle(&self) -> ReadHandle {
		let buffer = match &*self.buffer.borrow() {
			Some(buf) => Arc::clone(buf),
			None => Arc::new(MemoryBuffer::allocate(self.byte_len())),
		};
		ReadHandle { buffer, depth: self.depth }
	}

	/// An exclusive writer over a copy of the current pixel buffer (or a
	/// fresh zero-filled buffer on first write). Call [`WriteHandle::commit`]
	/// to publish the writes.
	pub fn write_handle(&self) -> WriteHandle<'_> {
		let buffer = match &*self.buffer.borrow() {
			Some(buf) => (**buf).clone(),
			None => MemoryBuffer::allocate(self.byte_len()),
		};
		WriteHandle { image: self, buffer, depth: self.depth, committed: false }
	}

	/// True once at least one write handle has been committed.
	pub fn is_materialized(&self) -> bool {
		self.buffer.borrow().is_some()
	}
}
