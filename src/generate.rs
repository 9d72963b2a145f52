//! How each category's image is produced from the theme.
//!
//! Generation never fails. A missing asset becomes the placeholder and a
//! mask that does not fit its image is skipped, both with a warning.

use image::{Rgba, RgbaImage};
use tracing::warn;

use crate::compositor::{self, TileDescriptor};
use crate::facade::ImageCache;
use crate::keys::{
	ArmyPic, BagPic, BridgePic, CircledArmyPic, CityPic, CursorPic, DefaultTileStylePic, DiplomacyPic, ExplosionPic,
	FlagPic, FogPic, MEDAL_KINDS, MedalPic, MoveBonusPic, NewLevelPic, PlantedStandardPic, PlayerId, PortPic,
	ProductionShieldPic, RoadPic, RuinPic, SelectorPic, ShieldPic, ShipPic, SignpostPic, TemplePic, TowerPic,
};
use crate::raster::RasterImage;
use crate::theme::{Asset, DEFAULT_TILE_SIZE, ThemeProvider};
use crate::traits::CacheKey;
use crate::transform::{NEUTRAL_CIRCLE, apply_player_mask, blit, circle_overlay, grey_out};

/// Edge length of the built-in placeholder.
pub const PLACEHOLDER_SIZE: u32 = DEFAULT_TILE_SIZE;

/// Produces the image a key stands for.
///
/// Generation may request images of other categories through `cache`, but
/// never of its own key.
pub trait Generate: CacheKey {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage;
}

/// The theme's placeholder picture, or the built-in checkerboard.
pub(crate) fn placeholder<T: ThemeProvider + ?Sized>(theme: &T) -> RasterImage {
	match theme.raw_image(&Asset::Placeholder) {
		Some(sprite) => sprite.image.clone(),
		None => RasterImage::placeholder(PLACEHOLDER_SIZE),
	}
}

/// A copy of `asset` as the theme ships it.
pub(crate) fn plain<T: ThemeProvider + ?Sized>(theme: &T, asset: Asset) -> RasterImage {
	match theme.sprite(&asset) {
		Ok(sprite) => sprite.image.clone(),
		Err(err) => {
			warn!(%err, "substituting placeholder");
			placeholder(theme)
		}
	}
}

/// `asset` tinted with `player`'s colour wherever its mask is set.
pub(crate) fn masked<T: ThemeProvider + ?Sized>(theme: &T, asset: Asset, player: PlayerId) -> RasterImage {
	let sprite = match theme.sprite(&asset) {
		Ok(sprite) => sprite,
		Err(err) => {
			warn!(%err, "substituting placeholder");
			return placeholder(theme);
		}
	};
	let Some(mask) = &sprite.mask else {
		return sprite.image.clone();
	};
	match apply_player_mask(&sprite.image, mask, theme.player_color(player)) {
		Ok(image) => image,
		Err(err) => {
			warn!(?asset, %err, "keeping unmasked image");
			sprite.image.clone()
		}
	}
}

impl Generate for ArmyPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Army {
			armyset: self.armyset,
			army_type: self.army_type,
		};
		let mut image = masked(cache.theme(), asset, self.player);
		if self.greyed {
			image = grey_out(&image);
		}

		// Medals sit along the bottom edge, one slot per kind.
		let slot = i64::from(image.width()) / MEDAL_KINDS as i64;
		let bottom = i64::from(image.height());
		for (kind, _) in self.medals.iter().enumerate().filter(|(_, earned)| **earned) {
			let medal = cache.pic(MedalPic {
				kind: kind as u32,
				large: false,
			});
			blit(&mut image, medal, kind as i64 * slot, bottom - i64::from(medal.height()));
		}
		image
	}
}

impl Generate for CircledArmyPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let color = match self.circle {
			Some(player) => cache.theme().player_color(player),
			None => NEUTRAL_CIRCLE,
		};
		circle_overlay(cache.pic(self.army), color, self.circle.is_some())
	}
}

impl Generate for CityPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = if self.razed {
			Asset::RazedCity {
				cityset: self.cityset,
			}
		} else {
			Asset::City {
				cityset: self.cityset,
			}
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for TowerPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Tower {
			cityset: self.cityset,
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for ShipPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Ship {
			armyset: self.armyset,
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for PlantedStandardPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Standard {
			armyset: self.armyset,
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for TemplePic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Temple {
			cityset: self.cityset,
			temple_type: self.temple_type,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for RuinPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Ruin {
			cityset: self.cityset,
			ruin_type: self.ruin_type,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for DiplomacyPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Diplomacy {
			state: self.state,
			large: self.large,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for PortPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Port {
			cityset: self.cityset,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for SignpostPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Signpost {
			cityset: self.cityset,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for BagPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Bag {
			armyset: self.armyset,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for ExplosionPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Explosion {
			tileset: self.tileset,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for NewLevelPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::NewLevel {
			female: self.female,
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for MedalPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Medal {
			kind: self.kind,
			large: self.large,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for CursorPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		plain(cache.theme(), Asset::Cursor(self.cursor))
	}
}

impl Generate for MoveBonusPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		plain(cache.theme(), Asset::MoveBonus(self.bonus))
	}
}

impl Generate for ProductionShieldPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::ProductionShield {
			kind: self.kind,
			active: self.active,
		};
		plain(cache.theme(), asset)
	}
}

/// Base colours of the procedural terrain, by `terrain % 8`.
const TERRAIN_PALETTE: [[u8; 3]; 8] = [
	[40, 80, 160],   // water
	[70, 140, 50],   // grass
	[120, 110, 60],  // swamp
	[30, 90, 30],    // forest
	[140, 120, 80],  // hills
	[150, 150, 150], // mountains
	[220, 200, 130], // sand
	[230, 230, 240], // snow
];

impl Generate for DefaultTileStylePic {
	fn generate<T: ThemeProvider>(&self, _cache: &mut ImageCache<T>) -> RasterImage {
		let [r, g, b] = TERRAIN_PALETTE[(self.terrain % 8) as usize];
		let base = Rgba([r, g, b, 255]);
		let darker = Rgba([r / 4 * 3, g / 4 * 3, b / 4 * 3, 255]);
		let size = self.tile_size;
		// A darker border and diagonal stripes every fourth pixel.
		let pixels = RgbaImage::from_fn(size, size, |x, y| {
			let border = x == 0 || y == 0 || x + 1 == size || y + 1 == size;
			if border || (x + y) % 4 == 0 {
				darker
			} else {
				base
			}
		});
		RasterImage::from_rgba(pixels)
	}
}

impl Generate for RoadPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Road {
			tileset: self.tileset,
			road_type: self.road_type,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for BridgePic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Bridge {
			tileset: self.tileset,
			bridge_type: self.bridge_type,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for FogPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Fog {
			tileset: self.tileset,
			fog_type: self.fog_type,
		};
		plain(cache.theme(), asset)
	}
}

impl Generate for FlagPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Flag {
			tileset: self.tileset,
			size: self.size,
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for SelectorPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Selector {
			tileset: self.tileset,
			frame: self.frame,
			large: self.large,
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for ShieldPic {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		let asset = Asset::Shield {
			shieldset: self.shieldset,
			size: self.size,
		};
		masked(cache.theme(), asset, self.player)
	}
}

impl Generate for TileDescriptor {
	fn generate<T: ThemeProvider>(&self, cache: &mut ImageCache<T>) -> RasterImage {
		compositor::compose(cache, self)
	}
}
