use std::fmt;

use serde::{Deserialize, Serialize};

/// Visual category of a cached image.
///
/// Declaration order is eviction order: when the budget is exceeded the
/// categories are pruned from first to last. Rare, cheap pictures go first;
/// per-unit sprites and composited map tiles, which are requested every
/// frame, go last.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	City = 0,
	Tower,
	Ship,
	PlantedStandard,
	Temple,
	Ruin,
	Diplomacy,
	Port,
	Signpost,
	Bag,
	Explosion,
	NewLevel,
	Medal,
	Cursor,
	MoveBonus,
	ProductionShield,
	DefaultTileStyle,
	CircledArmy,
	Road,
	Bridge,
	Fog,
	Flag,
	Selector,
	Shield,
	Army,
	Tile,
}

impl Category {
	/// Number of categories.
	pub const COUNT: usize = 26;

	/// Every category, in eviction order.
	pub const ALL: [Category; Self::COUNT] = [
		Category::City,
		Category::Tower,
		Category::Ship,
		Category::PlantedStandard,
		Category::Temple,
		Category::Ruin,
		Category::Diplomacy,
		Category::Port,
		Category::Signpost,
		Category::Bag,
		Category::Explosion,
		Category::NewLevel,
		Category::Medal,
		Category::Cursor,
		Category::MoveBonus,
		Category::ProductionShield,
		Category::DefaultTileStyle,
		Category::CircledArmy,
		Category::Road,
		Category::Bridge,
		Category::Fog,
		Category::Flag,
		Category::Selector,
		Category::Shield,
		Category::Army,
		Category::Tile,
	];

	/// Position in [`Category::ALL`].
	pub const fn index(self) -> usize {
		self as usize
	}

	/// Live entries a category may hold before it becomes eligible for
	/// pruning. These thresholds are tuned policy, not derived values.
	pub const fn default_limit(self) -> usize {
		match self {
			Category::City
			| Category::Tower
			| Category::Ship
			| Category::PlantedStandard
			| Category::Temple
			| Category::Ruin
			| Category::Diplomacy => 10,
			Category::Port => 1,
			Category::Signpost | Category::Bag | Category::Explosion => 10,
			Category::NewLevel | Category::Medal => 16,
			Category::Cursor => 18,
			Category::MoveBonus | Category::ProductionShield | Category::DefaultTileStyle => 20,
			Category::CircledArmy => 40,
			Category::Road | Category::Bridge | Category::Fog => 40,
			Category::Flag | Category::Selector => 40,
			Category::Shield => 100,
			Category::Army => 40,
			Category::Tile => 200,
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			Category::City => "city",
			Category::Tower => "tower",
			Category::Ship => "ship",
			Category::PlantedStandard => "planted_standard",
			Category::Temple => "temple",
			Category::Ruin => "ruin",
			Category::Diplomacy => "diplomacy",
			Category::Port => "port",
			Category::Signpost => "signpost",
			Category::Bag => "bag",
			Category::Explosion => "explosion",
			Category::NewLevel => "new_level",
			Category::Medal => "medal",
			Category::Cursor => "cursor",
			Category::MoveBonus => "move_bonus",
			Category::ProductionShield => "production_shield",
			Category::DefaultTileStyle => "default_tile_style",
			Category::CircledArmy => "circled_army",
			Category::Road => "road",
			Category::Bridge => "bridge",
			Category::Fog => "fog",
			Category::Flag => "flag",
			Category::Selector => "selector",
			Category::Shield => "shield",
			Category::Army => "army",
			Category::Tile => "tile",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A request key for one visual category.
///
/// Keys are plain values made of identifiers and flags. Equality and ordering
/// are derived, so two keys of a category are equal exactly when every field
/// is. The trait is sealed: every implementor has a dedicated slot in the
/// [`ImageStore`](crate::ImageStore).
pub trait CacheKey: Ord + Clone + fmt::Debug + Send + Sync + 'static + crate::store::Resident {
	/// Category this key type belongs to.
	const CATEGORY: Category;
}
