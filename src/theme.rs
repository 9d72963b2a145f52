//! Theme providers: the read-only sources of raw, already decoded images.
//!
//! A provider stands in for the loaded tileset, cityset, armysets and
//! shieldset of a scenario, plus the game-wide pictures (cursors, icons).
//! The cache never decodes files; it only asks a provider for sprites and
//! transforms copies of them.

use std::collections::HashMap;
use std::sync::Arc;

use image::Rgb;

use crate::error::{ImageError, Result};
use crate::keys::{PlayerId, SetId, ShieldSize};
use crate::raster::RasterImage;

/// Tile size used when a provider does not know a tileset.
pub const DEFAULT_TILE_SIZE: u32 = 40;

/// Colour of the neutral player when a provider has none configured.
pub const NEUTRAL_COLOR: Rgb<u8> = Rgb([160, 160, 160]);

/// Identifies one raw image inside the active theme sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
	TileStyle {
		tileset: SetId,
		style: u32,
	},
	Road {
		tileset: SetId,
		road_type: u32,
	},
	Bridge {
		tileset: SetId,
		bridge_type: u32,
	},
	Fog {
		tileset: SetId,
		fog_type: u8,
	},
	Flag {
		tileset: SetId,
		size: u8,
	},
	Selector {
		tileset: SetId,
		frame: u32,
		large: bool,
	},
	Explosion {
		tileset: SetId,
	},
	City {
		cityset: SetId,
	},
	RazedCity {
		cityset: SetId,
	},
	Tower {
		cityset: SetId,
	},
	Ruin {
		cityset: SetId,
		ruin_type: u32,
	},
	Temple {
		cityset: SetId,
		temple_type: u32,
	},
	Signpost {
		cityset: SetId,
	},
	Port {
		cityset: SetId,
	},
	Army {
		armyset: SetId,
		army_type: u32,
	},
	Ship {
		armyset: SetId,
	},
	Standard {
		armyset: SetId,
	},
	Bag {
		armyset: SetId,
	},
	Shield {
		shieldset: SetId,
		size: ShieldSize,
	},
	Cursor(u32),
	MoveBonus(u32),
	ProductionShield {
		kind: u32,
		active: bool,
	},
	Diplomacy {
		state: u32,
		large: bool,
	},
	NewLevel {
		female: bool,
	},
	Medal {
		kind: u32,
		large: bool,
	},
	/// The designated "missing asset" image, if the theme ships one.
	Placeholder,
}

/// A raw theme image with its optional player-colour mask.
///
/// Where the mask's alpha is non-zero the image is tinted with the owning
/// player's colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
	pub image: RasterImage,
	pub mask: Option<RasterImage>,
}

impl Sprite {
	pub fn new(image: RasterImage) -> Self {
		Self {
			image,
			mask: None,
		}
	}

	pub fn with_mask(image: RasterImage, mask: RasterImage) -> Self {
		Self {
			image,
			mask: Some(mask),
		}
	}
}

/// Source of raw images for the active theme sets.
pub trait ThemeProvider {
	/// The raw sprite for `asset`, or `None` if the theme lacks it.
	fn raw_image(&self, asset: &Asset) -> Option<&Sprite>;

	/// Edge length in pixels of a map tile in `tileset`.
	fn tile_size(&self, tileset: SetId) -> u32;

	/// Colour used to tint `player`'s masked sprites.
	fn player_color(&self, player: PlayerId) -> Rgb<u8>;

	/// Like [`raw_image`](Self::raw_image) but reports a miss as an error.
	fn sprite(&self, asset: &Asset) -> Result<&Sprite> {
		self.raw_image(asset).ok_or(ImageError::AssetMissing {
			asset: *asset,
		})
	}
}

impl<T: ThemeProvider + ?Sized> ThemeProvider for &T {
	fn raw_image(&self, asset: &Asset) -> Option<&Sprite> {
		(**self).raw_image(asset)
	}

	fn tile_size(&self, tileset: SetId) -> u32 {
		(**self).tile_size(tileset)
	}

	fn player_color(&self, player: PlayerId) -> Rgb<u8> {
		(**self).player_color(player)
	}
}

impl<T: ThemeProvider + ?Sized> ThemeProvider for Box<T> {
	fn raw_image(&self, asset: &Asset) -> Option<&Sprite> {
		(**self).raw_image(asset)
	}

	fn tile_size(&self, tileset: SetId) -> u32 {
		(**self).tile_size(tileset)
	}

	fn player_color(&self, player: PlayerId) -> Rgb<u8> {
		(**self).player_color(player)
	}
}

impl<T: ThemeProvider + ?Sized> ThemeProvider for Arc<T> {
	fn raw_image(&self, asset: &Asset) -> Option<&Sprite> {
		(**self).raw_image(asset)
	}

	fn tile_size(&self, tileset: SetId) -> u32 {
		(**self).tile_size(tileset)
	}

	fn player_color(&self, player: PlayerId) -> Rgb<u8> {
		(**self).player_color(player)
	}
}

/// A theme held entirely in memory.
///
/// Hosts that load their sets elsewhere can register the decoded sprites
/// here; it is also what the tests and benches render with.
#[derive(Debug, Clone)]
pub struct MemoryTheme {
	sprites: HashMap<Asset, Sprite>,
	tile_sizes: HashMap<SetId, u32>,
	default_tile_size: u32,
	colors: HashMap<PlayerId, Rgb<u8>>,
}

impl Default for MemoryTheme {
	fn default() -> Self {
		Self::new(DEFAULT_TILE_SIZE)
	}
}

impl MemoryTheme {
	/// An empty theme whose tilesets default to `tile_size`.
	pub fn new(tile_size: u32) -> Self {
		Self {
			sprites: HashMap::new(),
			tile_sizes: HashMap::new(),
			default_tile_size: tile_size,
			colors: HashMap::new(),
		}
	}

	/// Register a sprite, replacing any previous one for `asset`.
	pub fn insert(&mut self, asset: Asset, sprite: Sprite) -> Option<Sprite> {
		self.sprites.insert(asset, sprite)
	}

	pub fn remove(&mut self, asset: &Asset) -> Option<Sprite> {
		self.sprites.remove(asset)
	}

	pub fn with_sprite(mut self, asset: Asset, sprite: Sprite) -> Self {
		self.insert(asset, sprite);
		self
	}

	pub fn with_image(self, asset: Asset, image: RasterImage) -> Self {
		self.with_sprite(asset, Sprite::new(image))
	}

	pub fn with_tile_size(mut self, tileset: SetId, size: u32) -> Self {
		self.tile_sizes.insert(tileset, size);
		self
	}

	pub fn with_player_color(mut self, player: PlayerId, color: Rgb<u8>) -> Self {
		self.colors.insert(player, color);
		self
	}

	pub fn len(&self) -> usize {
		self.sprites.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sprites.is_empty()
	}
}

impl ThemeProvider for MemoryTheme {
	fn raw_image(&self, asset: &Asset) -> Option<&Sprite> {
		self.sprites.get(asset)
	}

	fn tile_size(&self, tileset: SetId) -> u32 {
		self.tile_sizes.get(&tileset).copied().unwrap_or(self.default_tile_size)
	}

	fn player_color(&self, player: PlayerId) -> Rgb<u8> {
		self.colors.get(&player).copied().unwrap_or(NEUTRAL_COLOR)
	}
}
