//! # Tile Cache
//!
//! A memoizing image cache and map tile compositor for turn-based strategy
//! renderers:
//! - **Typed requests**: one small key struct per visual category (armies,
//!   cities, flags, fog, composed map tiles, ...)
//! - **Generated once**: player colour masks, greying, medal and disc
//!   overlays are applied on the first request and reused afterwards
//! - **Byte budget** shared by all categories, pruned in a fixed category
//!   order, least recently used first
//! - **Tile composition** in a fixed layer order, reusing the cached pieces
//!
//! ## Quick Start
//!
//! ```rust
//! use image::Rgb;
//! use tilecache::{ArmyPic, Asset, ImageCache, MemoryTheme, RasterImage, Sprite};
//!
//! // The theme holds the decoded sprites of the active sets.
//! let sprite = Sprite::with_mask(RasterImage::new(40, 40), RasterImage::new(40, 40));
//! let theme = MemoryTheme::new(40)
//!     .with_sprite(Asset::Army { armyset: 1, army_type: 4 }, sprite)
//!     .with_player_color(3, Rgb([200, 40, 40]));
//!
//! let mut cache = ImageCache::new(theme);
//!
//! // Army #4 of armyset 1, owned by player 3, with two medals, greyed out.
//! let mut key = ArmyPic::new(1, 4, 3);
//! key.medals = [true, true, false];
//! key.greyed = true;
//!
//! let image = cache.army_pic(key);
//! assert_eq!(image.dimensions(), (40, 40));
//!
//! // The second request is answered from the cache.
//! cache.army_pic(key);
//! assert_eq!(cache.stats().hits(), 1);
//! ```
//!
//! ## Map Tiles
//!
//! ```rust
//! use tilecache::{Building, BuildingKind, ImageCache, MemoryTheme, ThemeSets, TileDescriptor};
//!
//! let mut cache = ImageCache::new(MemoryTheme::new(32));
//! let mut tile = TileDescriptor::new(ThemeSets::default(), 1, 0);
//! tile.building = Some(Building {
//!     kind: BuildingKind::City { razed: false },
//!     subtype: 0,
//!     owner: 2,
//!     cell: (1, 0),
//! });
//! tile.grid = true;
//!
//! assert_eq!(cache.tile_pic(&tile).dimensions(), (32, 32));
//! ```
//!
//! ## Memory Budget
//!
//! The budget is soft. Once resident images reach it, categories holding
//! more entries than their limit lose their least recently used half, in
//! [`Category::ALL`] order, until the total is back under the ceiling. If
//! every category is within its limit the cache stays over budget. The
//! image just requested is never evicted.
//!
//! ## Thread Safety
//!
//! [`ImageCache`] hands out plain borrows and needs `&mut self` for every
//! request. For several renderer threads, wrap it in a
//! [`SharedImageCache`], which returns a [`Guard`] holding a read lock.

mod budget;
mod builder;
mod compositor;
mod erased;
mod error;
mod facade;
mod generate;
mod keys;
mod lru;
mod metrics;
mod raster;
mod shared;
mod store;
mod theme;
mod traits;

pub mod transform;

pub use budget::{
	BudgetConfig, BudgetManager, CategoryCaches, DEFAULT_BUDGET_BYTES, EvictionReport, MIN_BUDGET_BYTES,
};
pub use builder::ImageCacheBuilder;
pub use compositor::{
	Building, BuildingKind, FOG_FULLY_OBSCURED, GRID_COLOR, Standard, StackSummary, ThemeSets, TileDescriptor, compose,
};
pub use error::{ImageError, Result};
pub use facade::ImageCache;
pub use generate::{Generate, PLACEHOLDER_SIZE};
pub use keys::*;
pub use lru::{Inserted, KeyedCache, Lookup, LruKeys};
pub use metrics::{CacheStats, CategoryStats};
pub use raster::{BIT_DEPTH, BYTES_PER_PIXEL, RasterImage};
pub use shared::{Guard, SharedImageCache};
pub use store::ImageStore;
pub use theme::{Asset, DEFAULT_TILE_SIZE, MemoryTheme, NEUTRAL_COLOR, Sprite, ThemeProvider};
pub use traits::{CacheKey, Category};
