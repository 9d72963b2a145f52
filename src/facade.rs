use tracing::{info, trace};

use crate::budget::{BudgetConfig, EvictionReport};
use crate::compositor::TileDescriptor;
use crate::generate::Generate;
use crate::keys::{
	ArmyPic, BagPic, BridgePic, CircledArmyPic, CityPic, CursorPic, DefaultTileStylePic, DiplomacyPic, ExplosionPic,
	FlagPic, FogPic, MedalPic, MoveBonusPic, NewLevelPic, PlantedStandardPic, PortPic, ProductionShieldPic, RoadPic,
	RuinPic, SelectorPic, ShieldPic, ShipPic, SignpostPic, TemplePic, TowerPic,
};
use crate::metrics::CacheStats;
use crate::raster::RasterImage;
use crate::store::ImageStore;
use crate::theme::ThemeProvider;
use crate::traits::{CacheKey, Category};

/// The image cache of one theme selection.
///
/// Every `*_pic` method returns the finished image for its key, generating
/// and memoizing it on first use. The returned reference borrows the cache,
/// so it has to be used (or cloned) before the next request:
///
/// ```compile_fail
/// use tilecache::{CursorPic, ImageCache, MemoryTheme, PortPic};
///
/// let mut cache = ImageCache::new(MemoryTheme::default());
/// let cursor = cache.cursor_pic(CursorPic { cursor: 0 });
/// // A later request may evict the cursor picture.
/// cache.port_pic(PortPic { cityset: 0 });
/// println!("{}", cursor.width());
/// ```
///
/// Hosts that render from several threads can wrap the cache in a
/// [`SharedImageCache`](crate::SharedImageCache).
#[derive(Debug)]
pub struct ImageCache<T> {
	theme: T,
	store: ImageStore,
}

impl<T: ThemeProvider> ImageCache<T> {
	/// A cache with the default budget.
	pub fn new(theme: T) -> Self {
		Self::with_config(theme, &BudgetConfig::default())
	}

	pub fn with_config(theme: T, config: &BudgetConfig) -> Self {
		info!(max_bytes = config.max_bytes, "image cache created");
		Self {
			theme,
			store: ImageStore::new(config),
		}
	}

	pub fn theme(&self) -> &T {
		&self.theme
	}

	pub fn store(&self) -> &ImageStore {
		&self.store
	}

	/// The image for any key, generated on first use.
	pub fn pic<K: Generate>(&mut self, key: K) -> &RasterImage {
		if !self.store.touch(&key) {
			trace!(category = %K::CATEGORY, ?key, "generating");
			let image = key.generate(self);
			self.store.insert(key.clone(), image);
		}
		self.store.resident_or_blank(&key)
	}

	/// The cached image for `key`, without generating or touching it.
	pub fn resident<K: CacheKey>(&self, key: &K) -> Option<&RasterImage> {
		self.store.resident(key)
	}

	pub(crate) fn resident_or_blank<K: CacheKey>(&self, key: &K) -> &RasterImage {
		self.store.resident_or_blank(key)
	}

	/// Drop every cached image. The theme and budget settings stay.
	pub fn reset(&mut self) {
		let freed = self.store.reset();
		info!(freed, "image cache reset");
	}

	/// Switch to another theme selection. Every cached image belonged to the
	/// old one, so the cache is reset. Returns the previous theme.
	pub fn set_theme(&mut self, theme: T) -> T {
		let previous = std::mem::replace(&mut self.theme, theme);
		let freed = self.store.reset();
		info!(freed, "theme changed");
		previous
	}

	/// Drop every cached image and give the theme back.
	pub fn teardown(self) -> T {
		info!(entries = self.store.len(), bytes = self.store.bytes(), "image cache torn down");
		self.theme
	}

	/// Prune now if the cache is over budget.
	pub fn check_and_evict(&mut self) -> EvictionReport {
		self.store.check_and_evict()
	}

	/// Change the budget ceiling; the minimum is enforced. Pruning happens on
	/// the next insertion or [`check_and_evict`](Self::check_and_evict).
	pub fn set_max_bytes(&mut self, max_bytes: usize) {
		self.store.set_max_bytes(max_bytes);
	}

	/// Change how many entries `category` may keep when the budget is tight.
	pub fn set_limit(&mut self, category: Category, max_entries: usize) {
		self.store.set_limit(category, max_entries);
	}

	pub fn stats(&self) -> CacheStats {
		self.store.stats()
	}

	pub fn army_pic(&mut self, key: ArmyPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn circled_army_pic(&mut self, key: CircledArmyPic) -> &RasterImage {
		self.pic(key)
	}

	/// The composed map tile.
	pub fn tile_pic(&mut self, tile: &TileDescriptor) -> &RasterImage {
		self.pic(*tile)
	}

	pub fn city_pic(&mut self, key: CityPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn tower_pic(&mut self, key: TowerPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn ship_pic(&mut self, key: ShipPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn planted_standard_pic(&mut self, key: PlantedStandardPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn temple_pic(&mut self, key: TemplePic) -> &RasterImage {
		self.pic(key)
	}

	pub fn ruin_pic(&mut self, key: RuinPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn diplomacy_pic(&mut self, key: DiplomacyPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn port_pic(&mut self, key: PortPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn signpost_pic(&mut self, key: SignpostPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn bag_pic(&mut self, key: BagPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn explosion_pic(&mut self, key: ExplosionPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn new_level_pic(&mut self, key: NewLevelPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn medal_pic(&mut self, key: MedalPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn cursor_pic(&mut self, key: CursorPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn move_bonus_pic(&mut self, key: MoveBonusPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn production_shield_pic(&mut self, key: ProductionShieldPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn default_tile_style_pic(&mut self, key: DefaultTileStylePic) -> &RasterImage {
		self.pic(key)
	}

	pub fn road_pic(&mut self, key: RoadPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn bridge_pic(&mut self, key: BridgePic) -> &RasterImage {
		self.pic(key)
	}

	pub fn fog_pic(&mut self, key: FogPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn flag_pic(&mut self, key: FlagPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn selector_pic(&mut self, key: SelectorPic) -> &RasterImage {
		self.pic(key)
	}

	pub fn shield_pic(&mut self, key: ShieldPic) -> &RasterImage {
		self.pic(key)
	}
}
