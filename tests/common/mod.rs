#![allow(dead_code)]

use image::{Rgb, Rgba};
use tilecache::{Asset, MemoryTheme, RasterImage, Sprite};

pub const TILE: u32 = 4;

pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const CYAN: Rgba<u8> = Rgba([0, 255, 255, 255]);
pub const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
pub const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);
pub const ORANGE: Rgba<u8> = Rgba([255, 128, 0, 255]);
pub const PURPLE: Rgba<u8> = Rgba([128, 0, 128, 255]);
pub const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);
pub const TEAL: Rgba<u8> = Rgba([0, 128, 128, 255]);
pub const BROWN: Rgba<u8> = Rgba([128, 64, 0, 255]);

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// A `TILE`-sized transparent image with the given pixels set.
pub fn sparse(points: &[(u32, u32)], color: Rgba<u8>) -> RasterImage {
	let mut image = RasterImage::new(TILE, TILE);
	for &(x, y) in points {
		image.pixels_mut().put_pixel(x, y, color);
	}
	image
}

/// A small theme where every layer of a tile has a distinct colour and
/// covers only some pixels.
pub fn layered_theme() -> MemoryTheme {
	MemoryTheme::new(TILE)
		.with_player_color(1, Rgb([255, 255, 255]))
		.with_image(
			Asset::TileStyle {
				tileset: 0,
				style: 0,
			},
			RasterImage::filled(TILE, TILE, GREEN),
		)
		.with_image(
			Asset::Road {
				tileset: 0,
				road_type: 0,
			},
			sparse(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3), (1, 3)], BLUE),
		)
		.with_image(
			Asset::Standard {
				armyset: 0,
			},
			sparse(&[(1, 1)], YELLOW),
		)
		.with_image(
			Asset::Bag {
				armyset: 0,
			},
			RasterImage::filled(1, 1, WHITE),
		)
		.with_image(
			Asset::Flag {
				tileset: 0,
				size: 3,
			},
			sparse(&[(0, 0), (1, 0)], CYAN),
		)
		.with_image(
			Asset::Army {
				armyset: 0,
				army_type: 0,
			},
			sparse(&[(0, 0)], RED),
		)
		.with_image(
			Asset::Ship {
				armyset: 0,
			},
			sparse(&[(2, 0)], RED),
		)
		.with_image(
			Asset::Tower {
				cityset: 0,
			},
			sparse(&[(3, 0)], RED),
		)
		.with_image(
			Asset::Fog {
				tileset: 0,
				fog_type: 1,
			},
			sparse(&[(0, 3)], BLACK),
		)
		.with_image(
			Asset::Fog {
				tileset: 0,
				fog_type: 16,
			},
			RasterImage::filled(TILE, TILE, BLACK),
		)
		.with_sprite(
			Asset::City {
				cityset: 0,
			},
			Sprite::new(city_footprint()),
		)
		.with_image(
			Asset::RazedCity {
				cityset: 0,
			},
			RasterImage::filled(TILE, TILE, MAGENTA),
		)
		.with_image(
			Asset::Ruin {
				cityset: 0,
				ruin_type: 0,
			},
			RasterImage::filled(TILE, TILE, ORANGE),
		)
		.with_image(
			Asset::Temple {
				cityset: 0,
				temple_type: 0,
			},
			RasterImage::filled(TILE, TILE, PURPLE),
		)
		.with_image(
			Asset::Signpost {
				cityset: 0,
			},
			RasterImage::filled(TILE, TILE, GREY),
		)
		.with_image(
			Asset::Port {
				cityset: 0,
			},
			RasterImage::filled(TILE, TILE, TEAL),
		)
		.with_image(
			Asset::Bridge {
				tileset: 0,
				bridge_type: 0,
			},
			RasterImage::filled(TILE, TILE, BROWN),
		)
}

/// A 2×2 cell city: one colour per quadrant.
pub fn city_footprint() -> RasterImage {
	let mut image = RasterImage::new(2 * TILE, 2 * TILE);
	for (x, y, px) in image.pixels_mut().enumerate_pixels_mut() {
		*px = match (x / TILE, y / TILE) {
			(0, 0) => RED,
			(1, 0) => BLUE,
			(0, 1) => YELLOW,
			_ => WHITE,
		};
	}
	image
}
