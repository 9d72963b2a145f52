//! Pixel transforms used by the generators.
//!
//! Every function leaves its inputs untouched and returns a new image, except
//! the compositing helpers [`blit`] and [`draw_grid`] which draw onto a canvas
//! the caller owns.

use image::{Rgb, Rgba, RgbaImage, imageops};

use crate::error::{ImageError, Result};
use crate::raster::RasterImage;

/// Grey forced onto alternate 2×2 blocks by [`grey_out`].
pub const GREY_OUT_SHADE: u8 = 0x58;

/// Disc diameter of [`circle_overlay`], relative to the shorter image side.
pub const CIRCLE_DIAMETER_RATIO: f32 = 0.9;

/// Disc colour of [`circle_overlay`] when it is not coloured.
pub const NEUTRAL_CIRCLE: Rgb<u8> = Rgb([128, 128, 128]);

/// Tint the masked region of `image` with `color`.
///
/// Where the mask's alpha is non-zero each RGB channel is multiplied by the
/// matching channel of `color` normalised to `0.0..=1.0`; other pixels are
/// copied. Alpha is never changed.
pub fn apply_player_mask(image: &RasterImage, mask: &RasterImage, color: Rgb<u8>) -> Result<RasterImage> {
	if image.dimensions() != mask.dimensions() {
		return Err(ImageError::DimensionMismatch {
			image: image.dimensions(),
			mask: mask.dimensions(),
		});
	}

	let mut out = image.pixels().clone();
	for (px, m) in out.pixels_mut().zip(mask.pixels().pixels()) {
		if m[3] == 0 {
			continue;
		}
		for c in 0..3 {
			px[c] = (u16::from(px[c]) * u16::from(color[c]) / 255) as u8;
		}
	}
	Ok(RasterImage::from_rgba(out))
}

/// Desaturate `image` for "already moved" units.
///
/// Opaque pixels become the grey of their brightest channel, except on
/// alternating 2×2 blocks which take [`GREY_OUT_SHADE`]. Apply at most once
/// per generated image.
pub fn grey_out(image: &RasterImage) -> RasterImage {
	let mut out = image.pixels().clone();
	for (x, y, px) in out.enumerate_pixels_mut() {
		if px[3] == 0 {
			continue;
		}
		let value = if (x / 2 + y / 2) % 2 == 0 {
			GREY_OUT_SHADE
		} else {
			px[0].max(px[1]).max(px[2])
		};
		px[0] = value;
		px[1] = value;
		px[2] = value;
	}
	RasterImage::from_rgba(out)
}

/// Draw a bevelled disc behind the subject of `image`.
///
/// The disc is centred, its diameter is [`CIRCLE_DIAMETER_RATIO`] of the
/// shorter side, and it is lit from the top left. The original image is then
/// drawn over it so the disc reads as a backdrop.
pub fn circle_overlay(image: &RasterImage, color: Rgb<u8>, coloured: bool) -> RasterImage {
	let (width, height) = image.dimensions();
	let base = if coloured {
		color
	} else {
		NEUTRAL_CIRCLE
	};
	let light = shade(base, 1.4);
	let dark = shade(base, 0.6);

	let radius = width.min(height) as f32 * CIRCLE_DIAMETER_RATIO / 2.0;
	let bevel = (radius * 0.15).max(1.0);
	let cx = width as f32 / 2.0;
	let cy = height as f32 / 2.0;

	let mut canvas = RgbaImage::new(width, height);
	for (x, y, px) in canvas.enumerate_pixels_mut() {
		let dx = x as f32 + 0.5 - cx;
		let dy = y as f32 + 0.5 - cy;
		let distance = (dx * dx + dy * dy).sqrt();
		if distance > radius {
			continue;
		}
		let tone = if distance <= radius - bevel {
			base
		} else if dx + dy < 0.0 {
			light
		} else {
			dark
		};
		*px = Rgba([tone[0], tone[1], tone[2], 255]);
	}

	let mut out = RasterImage::from_rgba(canvas);
	blit(&mut out, image, 0, 0);
	out
}

/// Alpha-composite `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Offsets may be negative or run past the edge; the overlap is clipped.
pub fn blit(dst: &mut RasterImage, src: &RasterImage, x: i64, y: i64) {
	let (dst_width, dst_height) = dst.dimensions();
	let (src_width, src_height) = src.dimensions();
	let left = x.max(0);
	let top = y.max(0);
	let right = (x + i64::from(src_width)).min(i64::from(dst_width));
	let bottom = (y + i64::from(src_height)).min(i64::from(dst_height));

	let canvas = dst.pixels_mut();
	let source = src.pixels();
	for dy in top..bottom {
		for dx in left..right {
			let px = source.get_pixel((dx - x) as u32, (dy - y) as u32);
			source_over(canvas.get_pixel_mut(dx as u32, dy as u32), px);
		}
	}
}

/// Cut cell `(col, row)` out of a building image laid out on a grid of
/// `size`-pixel cells.
///
/// Cells reaching past the image edge are clipped; a cell entirely outside
/// it comes back empty.
pub fn crop_cell(image: &RasterImage, col: u32, row: u32, size: u32) -> RasterImage {
	let x = col.saturating_mul(size);
	let y = row.saturating_mul(size);
	let view = imageops::crop_imm(image.pixels(), x, y, size, size);
	RasterImage::from_rgba(view.to_image())
}

/// Blend a 1px rectangle along the border of `image`.
pub fn draw_grid(image: &mut RasterImage, color: Rgba<u8>) {
	let (width, height) = image.dimensions();
	if width == 0 || height == 0 {
		return;
	}
	let mut border = Vec::with_capacity(2 * (width + height) as usize);
	for x in 0..width {
		border.push((x, 0));
		if height > 1 {
			border.push((x, height - 1));
		}
	}
	for y in 1..height.saturating_sub(1) {
		border.push((0, y));
		if width > 1 {
			border.push((width - 1, y));
		}
	}

	let pixels = image.pixels_mut();
	for (x, y) in border {
		source_over(pixels.get_pixel_mut(x, y), &color);
	}
}

/// Porter-Duff "over" in integer arithmetic. An opaque destination stays
/// exactly opaque.
fn source_over(dst: &mut Rgba<u8>, src: &Rgba<u8>) {
	let src_alpha = u32::from(src[3]);
	match src_alpha {
		0 => return,
		255 => {
			*dst = *src;
			return;
		}
		_ => {}
	}

	// Both weights are scaled by 255.
	let src_weight = src_alpha * 255;
	let dst_weight = u32::from(dst[3]) * (255 - src_alpha);
	let total = src_weight + dst_weight;
	for c in 0..3 {
		let mixed = u32::from(src[c]) * src_weight + u32::from(dst[c]) * dst_weight;
		dst[c] = ((mixed + total / 2) / total) as u8;
	}
	dst[3] = ((total + 127) / 255) as u8;
}

fn shade(color: Rgb<u8>, factor: f32) -> Rgb<u8> {
	Rgb(color.0.map(|c| (f32::from(c) * factor).round().clamp(0.0, 255.0) as u8))
}

#[cfg(test)]
mod tests {
	use super::*;

	const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
	const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

	fn half_mask(width: u32, height: u32) -> RasterImage {
		// Left half masked.
		RasterImage::from_rgba(RgbaImage::from_fn(width, height, |x, _| {
			if x < width / 2 {
				Rgba([0, 0, 0, 255])
			} else {
				Rgba([0, 0, 0, 0])
			}
		}))
	}

	#[test]
	fn test_mask_tints_only_masked_pixels() {
		let image = RasterImage::filled(4, 2, WHITE);
		let out = apply_player_mask(&image, &half_mask(4, 2), Rgb([0, 128, 255])).expect("same size");

		assert_eq!(out.pixel(0, 0), Some(Rgba([0, 128, 255, 255])));
		assert_eq!(out.pixel(1, 1), Some(Rgba([0, 128, 255, 255])));
		assert_eq!(out.pixel(2, 0), Some(WHITE));
		assert_eq!(out.pixel(3, 1), Some(WHITE));
	}

	#[test]
	fn test_mask_multiplies_channels() {
		let image = RasterImage::filled(1, 1, Rgba([200, 100, 50, 77]));
		let mask = RasterImage::filled(1, 1, Rgba([0, 0, 0, 1]));
		let out = apply_player_mask(&image, &mask, Rgb([255, 0, 127])).expect("same size");

		assert_eq!(out.pixel(0, 0), Some(Rgba([200, 0, 24, 77])));
	}

	#[test]
	fn test_mask_dimension_mismatch() {
		let image = RasterImage::filled(4, 4, WHITE);
		let mask = half_mask(4, 2);
		let image_before = image.clone();
		let mask_before = mask.clone();

		let result = apply_player_mask(&image, &mask, Rgb([1, 2, 3]));

		assert_eq!(
			result,
			Err(ImageError::DimensionMismatch {
				image: (4, 4),
				mask: (4, 2),
			})
		);
		assert_eq!(image, image_before);
		assert_eq!(mask, mask_before);
	}

	#[test]
	fn test_grey_out_checkerboard() {
		let image = RasterImage::filled(4, 4, Rgba([10, 200, 30, 255]));
		let out = grey_out(&image);

		// Block (0,0) is forced to the shade, block (1,0) keeps max(R,G,B).
		assert_eq!(out.pixel(0, 0), Some(Rgba([GREY_OUT_SHADE, GREY_OUT_SHADE, GREY_OUT_SHADE, 255])));
		assert_eq!(out.pixel(1, 1), Some(Rgba([GREY_OUT_SHADE, GREY_OUT_SHADE, GREY_OUT_SHADE, 255])));
		assert_eq!(out.pixel(2, 0), Some(Rgba([200, 200, 200, 255])));
		assert_eq!(out.pixel(0, 2), Some(Rgba([200, 200, 200, 255])));
		assert_eq!(out.pixel(2, 2), Some(Rgba([GREY_OUT_SHADE, GREY_OUT_SHADE, GREY_OUT_SHADE, 255])));
	}

	#[test]
	fn test_grey_out_keeps_transparent_and_alpha() {
		let mut image = RasterImage::filled(4, 4, Rgba([90, 10, 10, 128]));
		image.pixels_mut().put_pixel(2, 0, Rgba([1, 2, 3, 0]));
		let out = grey_out(&image);

		assert_eq!(out.pixel(2, 0), Some(Rgba([1, 2, 3, 0])));
		assert_eq!(out.pixel(3, 0), Some(Rgba([90, 90, 90, 128])));
		assert!(out.pixels().pixels().all(|p| p[3] == 128 || p[3] == 0));
	}

	#[test]
	fn test_circle_sits_behind_subject() {
		let mut image = RasterImage::new(20, 20);
		image.pixels_mut().put_pixel(10, 10, RED);

		let out = circle_overlay(&image, Rgb([0, 0, 200]), true);

		// Subject stays on top.
		assert_eq!(out.pixel(10, 10), Some(RED));
		// Inside the disc, away from the bevel, the plain colour shows through.
		assert_eq!(out.pixel(8, 10), Some(Rgba([0, 0, 200, 255])));
		// Corners are outside the disc.
		assert_eq!(out.pixel(0, 0), Some(Rgba([0, 0, 0, 0])));
		assert_eq!(out.pixel(19, 19), Some(Rgba([0, 0, 0, 0])));
	}

	#[test]
	fn test_circle_bevel_is_two_tone() {
		let image = RasterImage::new(40, 40);
		let out = circle_overlay(&image, Rgb([100, 100, 100]), true);

		// Radius 18 around (20, 20): the upper-left rim is lit, the lower-right is shaded.
		let upper_left = out.pixel(8, 8).expect("in bounds");
		let lower_right = out.pixel(31, 31).expect("in bounds");
		assert_eq!(upper_left, Rgba([140, 140, 140, 255]));
		assert_eq!(lower_right, Rgba([60, 60, 60, 255]));
	}

	#[test]
	fn test_circle_neutral_ignores_color() {
		let image = RasterImage::new(20, 20);
		let out = circle_overlay(&image, Rgb([255, 0, 0]), false);
		assert_eq!(out.pixel(10, 10), Some(Rgba([128, 128, 128, 255])));
	}

	#[test]
	fn test_blit_clips_negative_offset() {
		let mut canvas = RasterImage::new(4, 4);
		let src = RasterImage::filled(4, 4, RED);
		blit(&mut canvas, &src, -2, -2);

		assert_eq!(canvas.pixel(0, 0), Some(RED));
		assert_eq!(canvas.pixel(1, 1), Some(RED));
		assert_eq!(canvas.pixel(2, 2), Some(Rgba([0, 0, 0, 0])));
	}

	#[test]
	fn test_crop_cell_picks_footprint_cell() {
		let building = RasterImage::from_rgba(RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255])));

		let cell = crop_cell(&building, 1, 1, 2);
		assert_eq!(cell.dimensions(), (2, 2));
		assert_eq!(cell.pixel(0, 0), Some(Rgba([2, 2, 0, 255])));
		assert_eq!(cell.pixel(1, 1), Some(Rgba([3, 3, 0, 255])));

		let outside = crop_cell(&building, 5, 0, 2);
		assert_eq!(outside.byte_size(), 0);
	}

	#[test]
	fn test_draw_grid_outline() {
		let mut canvas = RasterImage::new(5, 5);
		draw_grid(&mut canvas, WHITE);

		assert_eq!(canvas.pixel(0, 3), Some(WHITE));
		assert_eq!(canvas.pixel(4, 4), Some(WHITE));
		assert_eq!(canvas.pixel(2, 0), Some(WHITE));
		assert_eq!(canvas.pixel(2, 2), Some(Rgba([0, 0, 0, 0])));
	}

	#[test]
	fn test_draw_grid_blends_each_pixel_once() {
		let mut canvas = RasterImage::filled(3, 3, RED);
		draw_grid(&mut canvas, Rgba([0, 0, 0, 128]));

		let corner = canvas.pixel(0, 0).expect("in bounds");
		let edge = canvas.pixel(1, 0).expect("in bounds");
		assert_eq!(corner, edge);
		assert!(corner[0] < 255);
		assert_eq!(corner[3], 255);
		assert_eq!(canvas.pixel(1, 1), Some(RED));
	}

	#[test]
	fn test_opaque_canvas_stays_opaque_for_every_alpha() {
		for alpha in 0..=255u8 {
			let color = Rgba([0, 0, 255, alpha]);

			let mut gridded = RasterImage::filled(3, 3, RED);
			draw_grid(&mut gridded, color);
			assert!(gridded.pixels().pixels().all(|p| p[3] == 255), "grid alpha {alpha}");

			let mut blitted = RasterImage::filled(3, 3, RED);
			blit(&mut blitted, &RasterImage::filled(2, 2, color), 1, 1);
			assert!(blitted.pixels().pixels().all(|p| p[3] == 255), "blit alpha {alpha}");
		}
	}

	#[test]
	fn test_blit_mixes_translucent_pixels() {
		let mut canvas = RasterImage::filled(1, 1, RED);
		blit(&mut canvas, &RasterImage::filled(1, 1, Rgba([0, 0, 255, 128])), 0, 0);
		assert_eq!(canvas.pixel(0, 0), Some(Rgba([127, 0, 128, 255])));

		// Over a transparent canvas the source is kept as is.
		let mut clear = RasterImage::new(1, 1);
		blit(&mut clear, &RasterImage::filled(1, 1, Rgba([10, 20, 30, 77])), 0, 0);
		assert_eq!(clear.pixel(0, 0), Some(Rgba([10, 20, 30, 77])));

		// A fully transparent source leaves the canvas alone.
		let mut canvas = RasterImage::filled(1, 1, RED);
		blit(&mut canvas, &RasterImage::new(1, 1), 0, 0);
		assert_eq!(canvas.pixel(0, 0), Some(RED));
	}

	#[test]
	fn test_blit_clips_past_far_edge() {
		let mut canvas = RasterImage::new(4, 4);
		blit(&mut canvas, &RasterImage::filled(4, 4, RED), 3, 3);
		assert_eq!(canvas.pixel(3, 3), Some(RED));
		assert_eq!(canvas.pixel(2, 2), Some(Rgba([0, 0, 0, 0])));

		blit(&mut canvas, &RasterImage::filled(4, 4, WHITE), 9, -9);
		assert_eq!(canvas.pixel(3, 3), Some(RED));
	}
}
