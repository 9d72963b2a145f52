//! Request keys, one per visual category.
//!
//! Every key is a small `Copy` value holding identifiers only. The
//! category each key belongs to is registered in the store.

use serde::{Deserialize, Serialize};

/// Identifier of a tileset, cityset, armyset or shieldset.
pub type SetId = u32;

/// Identifier of a player. Colours come from the theme provider.
pub type PlayerId = u32;

/// Number of distinct medal kinds an army can carry.
pub const MEDAL_KINDS: usize = 3;

/// Largest stack size a flag picture exists for.
pub const MAX_STACK_SIZE: u8 = 8;

/// Size variant of a player shield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShieldSize {
	Small,
	Medium,
	Large,
}

/// An army sprite in its owner's colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArmyPic {
	pub armyset: SetId,
	pub army_type: u32,
	pub player: PlayerId,
	/// Medals earned, indexed by medal kind.
	pub medals: [bool; MEDAL_KINDS],
	/// Desaturated, for armies that have already moved.
	pub greyed: bool,
}

impl ArmyPic {
	/// A plain army picture: no medals, not greyed.
	pub fn new(armyset: SetId, army_type: u32, player: PlayerId) -> Self {
		Self {
			armyset,
			army_type,
			player,
			medals: [false; MEDAL_KINDS],
			greyed: false,
		}
	}
}

/// An army sprite drawn in front of a bevelled disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CircledArmyPic {
	pub army: ArmyPic,
	/// Player whose colour the disc takes; `None` for the neutral disc.
	pub circle: Option<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityPic {
	pub cityset: SetId,
	pub player: PlayerId,
	pub razed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TowerPic {
	pub cityset: SetId,
	pub player: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShipPic {
	pub armyset: SetId,
	pub player: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlantedStandardPic {
	pub armyset: SetId,
	pub player: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplePic {
	pub cityset: SetId,
	pub temple_type: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuinPic {
	pub cityset: SetId,
	pub ruin_type: u32,
}

/// Diplomatic state icon (peace, war, proposals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiplomacyPic {
	pub state: u32,
	pub large: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortPic {
	pub cityset: SetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignpostPic {
	pub cityset: SetId,
}

/// Item bag dropped on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BagPic {
	pub armyset: SetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExplosionPic {
	pub tileset: SetId,
}

/// Hero level-up portrait in the player's colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NewLevelPic {
	pub player: PlayerId,
	pub female: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MedalPic {
	pub kind: u32,
	pub large: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorPic {
	pub cursor: u32,
}

/// Movement bonus icon (e.g. "moves well over hills").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveBonusPic {
	pub bonus: u32,
}

/// City production shield (home, away, destination, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionShieldPic {
	pub kind: u32,
	pub active: bool,
}

/// Procedurally drawn stand-in for a terrain style the tileset lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefaultTileStylePic {
	pub terrain: u32,
	pub tile_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoadPic {
	pub tileset: SetId,
	pub road_type: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BridgePic {
	pub tileset: SetId,
	pub bridge_type: u32,
}

/// Fog overlay. `fog_type` 0 means no fog and is never requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FogPic {
	pub tileset: SetId,
	pub fog_type: u8,
}

/// Stack flag; `size` is the number of armies in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlagPic {
	pub tileset: SetId,
	pub player: PlayerId,
	pub size: u8,
}

/// One animation frame of the active-stack selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectorPic {
	pub tileset: SetId,
	pub frame: u32,
	pub player: PlayerId,
	pub large: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShieldPic {
	pub shieldset: SetId,
	pub player: PlayerId,
	pub size: ShieldSize,
}
