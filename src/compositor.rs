//! Map tile composition.
//!
//! A [`TileDescriptor`] says everything that is visible on one map cell.
//! [`compose`] turns it into a single image by drawing up to seven layers
//! in a fixed order, fetching each layer through the cache so that the
//! pieces are shared between tiles:
//!
//! 1. terrain style
//! 2. building, cut to this cell of its footprint
//! 3. planted standard
//! 4. item bag, bottom right
//! 5. occupying stack: a tower, or a flag with a ship or the lead army
//! 6. grid outline
//! 7. fog
//!
//! Composed tiles are cached as [`Category::Tile`](crate::Category::Tile);
//! changing the layer order changes every cached tile.

use image::Rgba;

use crate::facade::ImageCache;
use crate::generate::Generate;
use crate::keys::{
	ArmyPic, BagPic, BridgePic, CityPic, DefaultTileStylePic, FlagPic, FogPic, MAX_STACK_SIZE, PlantedStandardPic,
	PlayerId, PortPic, RoadPic, RuinPic, SetId, ShipPic, SignpostPic, TemplePic, TowerPic,
};
use crate::raster::RasterImage;
use crate::theme::{Asset, ThemeProvider};
use crate::transform::{blit, crop_cell, draw_grid};

/// Fog level that hides the tile completely.
pub const FOG_FULLY_OBSCURED: u8 = 16;

/// Colour of the grid outline.
pub const GRID_COLOR: Rgba<u8> = Rgba([0, 0, 0, 96]);

/// Theme sets a tile is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThemeSets {
	pub tileset: SetId,
	pub cityset: SetId,
	pub shieldset: SetId,
	pub armyset: SetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildingKind {
	City {
		razed: bool,
	},
	Ruin,
	Temple,
	Signpost,
	Road,
	Port,
	Bridge,
}

/// A building covering this cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Building {
	pub kind: BuildingKind,
	/// Ruin, temple, road or bridge type; ignored by the other kinds.
	pub subtype: u32,
	pub owner: PlayerId,
	/// `(column, row)` of this cell inside the building's footprint.
	pub cell: (u8, u8),
}

/// What a renderer needs to know about the stack standing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackSummary {
	/// Number of armies in the stack.
	pub size: u8,
	pub owner: PlayerId,
	pub has_tower: bool,
	pub has_ship: bool,
	/// Army type drawn for the stack.
	pub lead_army_type: u32,
	pub armyset: SetId,
}

/// A hero's standard planted on the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Standard {
	pub owner: PlayerId,
	pub armyset: SetId,
}

/// Everything visible on one map cell. Also the key of the tile cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileDescriptor {
	pub sets: ThemeSets,
	/// Terrain kind, used for the procedural fallback.
	pub terrain: u32,
	/// Terrain style picture within the tileset.
	pub style: u32,
	/// 0 for no fog, up to [`FOG_FULLY_OBSCURED`].
	pub fog: u8,
	pub building: Option<Building>,
	pub stack: Option<StackSummary>,
	pub has_bag: bool,
	pub standard: Option<Standard>,
	pub grid: bool,
}

impl TileDescriptor {
	/// A bare terrain tile: no fog, nothing on it, no grid.
	pub fn new(sets: ThemeSets, terrain: u32, style: u32) -> Self {
		Self {
			sets,
			terrain,
			style,
			fog: 0,
			building: None,
			stack: None,
			has_bag: false,
			standard: None,
			grid: false,
		}
	}

	pub fn is_fully_obscured(&self) -> bool {
		self.fog >= FOG_FULLY_OBSCURED
	}
}

/// Render `tile` layer by layer.
///
/// A fully obscured tile is a copy of the fog picture; none of the other
/// layers are requested.
pub fn compose<T: ThemeProvider>(cache: &mut ImageCache<T>, tile: &TileDescriptor) -> RasterImage {
	let sets = tile.sets;
	if tile.is_fully_obscured() {
		return cache.pic(fog(sets, tile.fog)).clone();
	}

	let size = cache.theme().tile_size(sets.tileset);
	let mut canvas = RasterImage::new(size, size);

	let style = Asset::TileStyle {
		tileset: sets.tileset,
		style: tile.style,
	};
	if let Some(sprite) = cache.theme().raw_image(&style) {
		blit(&mut canvas, &sprite.image, 0, 0);
	} else {
		let fallback = DefaultTileStylePic {
			terrain: tile.terrain,
			tile_size: size,
		};
		blit(&mut canvas, cache.pic(fallback), 0, 0);
	}

	if let Some(building) = &tile.building {
		draw_building(cache, &mut canvas, sets, building, size);
	}

	if let Some(standard) = &tile.standard {
		let pic = PlantedStandardPic {
			armyset: standard.armyset,
			player: standard.owner,
		};
		blit(&mut canvas, cache.pic(pic), 0, 0);
	}

	if tile.has_bag {
		let bag = cache.pic(BagPic {
			armyset: sets.armyset,
		});
		let x = i64::from(size) - i64::from(bag.width());
		let y = i64::from(size) - i64::from(bag.height());
		blit(&mut canvas, bag, x, y);
	}

	if let Some(stack) = &tile.stack {
		draw_stack(cache, &mut canvas, sets, stack);
	}

	if tile.grid {
		draw_grid(&mut canvas, GRID_COLOR);
	}

	if tile.fog != 0 {
		blit(&mut canvas, cache.pic(fog(sets, tile.fog)), 0, 0);
	}

	canvas
}

fn fog(sets: ThemeSets, level: u8) -> FogPic {
	FogPic {
		tileset: sets.tileset,
		fog_type: level,
	}
}

fn draw_building<T: ThemeProvider>(
	cache: &mut ImageCache<T>,
	canvas: &mut RasterImage,
	sets: ThemeSets,
	building: &Building,
	size: u32,
) {
	match building.kind {
		BuildingKind::City {
			razed,
		} => {
			let pic = CityPic {
				cityset: sets.cityset,
				player: building.owner,
				razed,
			};
			draw_cell(cache, canvas, pic, building.cell, size);
		}
		BuildingKind::Ruin => {
			let pic = RuinPic {
				cityset: sets.cityset,
				ruin_type: building.subtype,
			};
			draw_cell(cache, canvas, pic, building.cell, size);
		}
		BuildingKind::Temple => {
			let pic = TemplePic {
				cityset: sets.cityset,
				temple_type: building.subtype,
			};
			draw_cell(cache, canvas, pic, building.cell, size);
		}
		BuildingKind::Signpost => {
			let pic = SignpostPic {
				cityset: sets.cityset,
			};
			draw_cell(cache, canvas, pic, building.cell, size);
		}
		BuildingKind::Road => {
			let pic = RoadPic {
				tileset: sets.tileset,
				road_type: building.subtype,
			};
			draw_cell(cache, canvas, pic, building.cell, size);
		}
		BuildingKind::Port => {
			let pic = PortPic {
				cityset: sets.cityset,
			};
			draw_cell(cache, canvas, pic, building.cell, size);
		}
		BuildingKind::Bridge => {
			let pic = BridgePic {
				tileset: sets.tileset,
				bridge_type: building.subtype,
			};
			draw_cell(cache, canvas, pic, building.cell, size);
		}
	}
}

/// Draw this cell's part of a possibly multi-cell building picture.
fn draw_cell<K: Generate, T: ThemeProvider>(
	cache: &mut ImageCache<T>,
	canvas: &mut RasterImage,
	key: K,
	(col, row): (u8, u8),
	size: u32,
) {
	let image = cache.pic(key);
	if image.dimensions() == (size, size) && (col, row) == (0, 0) {
		blit(canvas, image, 0, 0);
	} else {
		blit(canvas, &crop_cell(image, u32::from(col), u32::from(row), size), 0, 0);
	}
}

fn draw_stack<T: ThemeProvider>(
	cache: &mut ImageCache<T>,
	canvas: &mut RasterImage,
	sets: ThemeSets,
	stack: &StackSummary,
) {
	if stack.has_tower {
		let tower = TowerPic {
			cityset: sets.cityset,
			player: stack.owner,
		};
		blit(canvas, cache.pic(tower), 0, 0);
		return;
	}

	let flag = FlagPic {
		tileset: sets.tileset,
		player: stack.owner,
		size: stack.size.clamp(1, MAX_STACK_SIZE),
	};
	blit(canvas, cache.pic(flag), 0, 0);

	if stack.has_ship {
		let ship = ShipPic {
			armyset: stack.armyset,
			player: stack.owner,
		};
		blit(canvas, cache.pic(ship), 0, 0);
	} else {
		let army = ArmyPic::new(stack.armyset, stack.lead_army_type, stack.owner);
		blit(canvas, cache.pic(army), 0, 0);
	}
}
