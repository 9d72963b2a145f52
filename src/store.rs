//! Per-category storage wired to the shared budget.

use std::fmt;

use crate::budget::{BudgetConfig, BudgetManager, CategoryCaches, EvictionReport};
use crate::compositor::TileDescriptor;
use crate::erased::ErasedCache;
use crate::keys::{
	ArmyPic, BagPic, BridgePic, CircledArmyPic, CityPic, CursorPic, DefaultTileStylePic, DiplomacyPic, ExplosionPic,
	FlagPic, FogPic, MedalPic, MoveBonusPic, NewLevelPic, PlantedStandardPic, PortPic, ProductionShieldPic, RoadPic,
	RuinPic, SelectorPic, ShieldPic, ShipPic, SignpostPic, TemplePic, TowerPic,
};
use crate::lru::KeyedCache;
use crate::metrics::{CacheStats, CategoryStats};
use crate::raster::RasterImage;
use crate::traits::{CacheKey, Category};

/// Locates the cache of a key type inside [`Slots`].
///
/// Implemented only by the key types registered below, which is what seals
/// [`CacheKey`].
pub trait Resident: Sized {
	fn cache(slots: &Slots) -> &KeyedCache<Self>;
	fn cache_mut(slots: &mut Slots) -> &mut KeyedCache<Self>;
}

macro_rules! slots {
	($($field:ident: $key:ty => $category:ident,)+) => {
		/// One typed cache per category.
		#[derive(Default)]
		pub struct Slots {
			$($field: KeyedCache<$key>,)+
		}

		impl Slots {
			fn erased(&self, category: Category) -> &dyn ErasedCache {
				match category {
					$(Category::$category => &self.$field,)+
				}
			}

			fn erased_mut(&mut self, category: Category) -> &mut dyn ErasedCache {
				match category {
					$(Category::$category => &mut self.$field,)+
				}
			}
		}

		$(
			impl CacheKey for $key {
				const CATEGORY: Category = Category::$category;
			}

			impl Resident for $key {
				fn cache(slots: &Slots) -> &KeyedCache<Self> {
					&slots.$field
				}

				fn cache_mut(slots: &mut Slots) -> &mut KeyedCache<Self> {
					&mut slots.$field
				}
			}
		)+
	};
}

slots! {
	city: CityPic => City,
	tower: TowerPic => Tower,
	ship: ShipPic => Ship,
	planted_standard: PlantedStandardPic => PlantedStandard,
	temple: TemplePic => Temple,
	ruin: RuinPic => Ruin,
	diplomacy: DiplomacyPic => Diplomacy,
	port: PortPic => Port,
	signpost: SignpostPic => Signpost,
	bag: BagPic => Bag,
	explosion: ExplosionPic => Explosion,
	new_level: NewLevelPic => NewLevel,
	medal: MedalPic => Medal,
	cursor: CursorPic => Cursor,
	move_bonus: MoveBonusPic => MoveBonus,
	production_shield: ProductionShieldPic => ProductionShield,
	default_tile_style: DefaultTileStylePic => DefaultTileStyle,
	circled_army: CircledArmyPic => CircledArmy,
	road: RoadPic => Road,
	bridge: BridgePic => Bridge,
	fog: FogPic => Fog,
	flag: FlagPic => Flag,
	selector: SelectorPic => Selector,
	shield: ShieldPic => Shield,
	army: ArmyPic => Army,
	tile: TileDescriptor => Tile,
}

/// Budget pruning view over the slots that also counts evictions.
struct Evictor<'a> {
	slots: &'a mut Slots,
	counters: &'a mut [CategoryStats; Category::COUNT],
}

impl CategoryCaches for Evictor<'_> {
	fn live_count(&self, category: Category) -> usize {
		self.slots.erased(category).len()
	}

	fn discard_half(&mut self, category: Category) -> usize {
		let (entries, bytes) = self.slots.erased_mut(category).discard_half();
		self.counters[category.index()].evictions += entries as u64;
		bytes
	}
}

/// Every category's cache under one memory budget.
///
/// The store does no generation itself. Callers [`touch`](Self::touch) a
/// key, [`insert`](Self::insert) the generated image on a miss and then
/// borrow it with [`resident`](Self::resident). Splitting the lookup lets
/// generation of one category request images of other categories while the
/// budget is kept in step with every insertion.
pub struct ImageStore {
	slots: Slots,
	budget: BudgetManager,
	counters: [CategoryStats; Category::COUNT],
	/// Returned by `resident_or_blank` for a key that is not resident.
	blank: RasterImage,
}

impl Default for ImageStore {
	fn default() -> Self {
		Self::new(&BudgetConfig::default())
	}
}

impl fmt::Debug for ImageStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ImageStore")
			.field("entries", &self.len())
			.field("bytes", &self.bytes())
			.field("max_bytes", &self.budget.max_bytes())
			.finish()
	}
}

impl ImageStore {
	pub fn new(config: &BudgetConfig) -> Self {
		Self {
			slots: Slots::default(),
			budget: BudgetManager::new(config),
			counters: [CategoryStats::default(); Category::COUNT],
			blank: RasterImage::new(1, 1),
		}
	}

	/// Mark `key` as most recently used and count the request.
	///
	/// Returns `false` on a miss, in which case the caller is expected to
	/// generate the image and [`insert`](Self::insert) it.
	pub fn touch<K: CacheKey>(&mut self, key: &K) -> bool {
		let hit = K::cache_mut(&mut self.slots).touch(key);
		let counters = &mut self.counters[K::CATEGORY.index()];
		if hit {
			counters.hits += 1;
		} else {
			counters.misses += 1;
		}
		hit
	}

	/// Store a generated image as the most recently used entry of its
	/// category, then prune if the budget is exceeded.
	///
	/// The new entry survives the pruning pass: halving a category always
	/// keeps its most recently used half.
	pub fn insert<K: CacheKey>(&mut self, key: K, image: RasterImage) -> EvictionReport {
		let category = K::CATEGORY;
		let inserted = K::cache_mut(&mut self.slots).insert(key, image);
		self.budget.release(category, inserted.released);
		if self.budget.accept(category, inserted.added) {
			self.check_and_evict()
		} else {
			EvictionReport::default()
		}
	}

	/// The image for `key` without changing its recency.
	pub fn peek<K: CacheKey>(&self, key: &K) -> Option<&RasterImage> {
		K::cache(&self.slots).peek(key)
	}

	/// The image for a key that was just touched or inserted, if it is still
	/// resident.
	pub fn resident<K: CacheKey>(&self, key: &K) -> Option<&RasterImage> {
		self.peek(key)
	}

	/// Like [`resident`](Self::resident), with a transparent pixel for an
	/// absent key.
	pub(crate) fn resident_or_blank<K: CacheKey>(&self, key: &K) -> &RasterImage {
		self.peek(key).unwrap_or(&self.blank)
	}

	/// The whole cache of key type `K`.
	pub fn cache<K: CacheKey>(&self) -> &KeyedCache<K> {
		K::cache(&self.slots)
	}

	/// Resident entries in `category`.
	pub fn len_of(&self, category: Category) -> usize {
		self.slots.erased(category).len()
	}

	/// Resident entries across all categories.
	pub fn len(&self) -> usize {
		Category::ALL.iter().map(|&category| self.len_of(category)).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Resident bytes across all categories.
	pub fn bytes(&self) -> usize {
		self.budget.total_bytes()
	}

	/// Prune categories over their entry limit until the budget is met.
	pub fn check_and_evict(&mut self) -> EvictionReport {
		let mut evictor = Evictor {
			slots: &mut self.slots,
			counters: &mut self.counters,
		};
		self.budget.check_and_evict(&mut evictor)
	}

	pub fn max_bytes(&self) -> usize {
		self.budget.max_bytes()
	}

	/// Change the ceiling. Takes effect on the next insertion or explicit
	/// [`check_and_evict`](Self::check_and_evict).
	pub fn set_max_bytes(&mut self, max_bytes: usize) {
		self.budget.set_max_bytes(max_bytes);
	}

	pub fn limit(&self, category: Category) -> usize {
		self.budget.limit(category)
	}

	pub fn set_limit(&mut self, category: Category, max_entries: usize) {
		self.budget.set_limit(category, max_entries);
	}

	/// Drop every entry. Returns the bytes freed. Statistics are kept.
	pub fn reset(&mut self) -> usize {
		let mut freed = 0;
		for category in Category::ALL {
			let (_, bytes) = self.slots.erased_mut(category).reset();
			self.budget.release(category, bytes);
			freed += bytes;
		}
		debug_assert_eq!(self.budget.total_bytes(), 0);
		freed
	}

	/// Take a statistics snapshot.
	pub fn stats(&self) -> CacheStats {
		let mut categories = self.counters;
		for category in Category::ALL {
			let cache = self.slots.erased(category);
			let stats = &mut categories[category.index()];
			stats.entries = cache.len();
			stats.bytes = cache.bytes();
		}
		CacheStats::new(categories, self.budget.total_bytes(), self.budget.max_bytes())
	}
}
