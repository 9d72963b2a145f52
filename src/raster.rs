use std::fmt;

use image::{Rgba, RgbaImage};

/// Bytes used by one pixel of a [`RasterImage`].
pub const BYTES_PER_PIXEL: usize = 4;

/// Bits per pixel of a [`RasterImage`].
pub const BIT_DEPTH: u8 = 32;

const PLACEHOLDER_INK: Rgba<u8> = Rgba([255, 0, 255, 255]);
const PLACEHOLDER_PAPER: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A decoded RGBA8 bitmap.
///
/// Images handed out by the cache are owned by it; callers only ever see a
/// borrow. Theme providers own the images they expose.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
	pixels: RgbaImage,
}

impl RasterImage {
	/// A fully transparent image.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			pixels: RgbaImage::new(width, height),
		}
	}

	/// An image with every pixel set to `color`.
	pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
		Self {
			pixels: RgbaImage::from_pixel(width, height, color),
		}
	}

	/// Wrap an existing RGBA buffer.
	pub fn from_rgba(pixels: RgbaImage) -> Self {
		Self {
			pixels,
		}
	}

	/// Build from raw RGBA bytes. Returns `None` if `data` is not
	/// `width * height * 4` bytes long.
	pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
		RgbaImage::from_raw(width, height, data).map(Self::from_rgba)
	}

	/// The "missing asset" image: a magenta and black checkerboard.
	pub fn placeholder(size: u32) -> Self {
		let cell = (size / 4).max(1);
		let pixels = RgbaImage::from_fn(size, size, |x, y| {
			if ((x / cell) + (y / cell)) % 2 == 0 {
				PLACEHOLDER_INK
			} else {
				PLACEHOLDER_PAPER
			}
		});
		Self {
			pixels,
		}
	}

	pub fn width(&self) -> u32 {
		self.pixels.width()
	}

	pub fn height(&self) -> u32 {
		self.pixels.height()
	}

	pub fn dimensions(&self) -> (u32, u32) {
		self.pixels.dimensions()
	}

	pub fn bit_depth(&self) -> u8 {
		BIT_DEPTH
	}

	/// Declared memory cost: width × height × bytes-per-pixel.
	pub fn byte_size(&self) -> usize {
		self.width() as usize * self.height() as usize * BYTES_PER_PIXEL
	}

	/// Colour of one pixel, or `None` outside the image.
	pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
		self.pixels.get_pixel_checked(x, y).copied()
	}

	pub fn pixels(&self) -> &RgbaImage {
		&self.pixels
	}

	pub fn pixels_mut(&mut self) -> &mut RgbaImage {
		&mut self.pixels
	}

	/// Raw RGBA bytes, row-major.
	pub fn as_bytes(&self) -> &[u8] {
		self.pixels.as_raw()
	}

	pub fn into_rgba(self) -> RgbaImage {
		self.pixels
	}
}

impl fmt::Debug for RasterImage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RasterImage")
			.field("width", &self.width())
			.field("height", &self.height())
			.field("bit_depth", &BIT_DEPTH)
			.finish()
	}
}
