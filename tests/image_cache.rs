mod common;

use std::ptr;

use common::*;
use image::{Rgb, Rgba};
use tilecache::{
	ArmyPic, Asset, BudgetConfig, Category, CircledArmyPic, CityPic, CursorPic, DiplomacyPic, ExplosionPic, ImageCache,
	ImageCacheBuilder, MIN_BUDGET_BYTES, MedalPic, MemoryTheme, MoveBonusPic, NewLevelPic, PLACEHOLDER_SIZE,
	ProductionShieldPic, RasterImage, SelectorPic, ShieldPic, ShieldSize, Sprite,
};

/// 128×128 pictures cost 64 KiB each.
const BIG: u32 = 128;
const BIG_BYTES: usize = 128 * 128 * 4;

fn army_theme(types: u32) -> MemoryTheme {
	let mut theme = MemoryTheme::new(BIG);
	for army_type in 0..types {
		theme.insert(
			Asset::Army {
				armyset: 1,
				army_type,
			},
			Sprite::new(RasterImage::new(BIG, BIG)),
		);
	}
	theme
}

fn army(army_type: u32) -> ArmyPic {
	ArmyPic::new(1, army_type, 0)
}

#[test]
fn test_second_request_returns_same_image() {
	init_tracing();
	let mut cache = ImageCache::new(army_theme(1));

	let first = cache.army_pic(army(0)) as *const RasterImage;
	let second = cache.army_pic(army(0));

	assert!(ptr::eq(first, second));
	assert_eq!(cache.store().len_of(Category::Army), 1);
	assert_eq!(cache.stats().category(Category::Army).misses, 1);
}

#[test]
fn test_army_overflow_keeps_most_recent_half() {
	init_tracing();
	let mut cache = ImageCacheBuilder::new(MIN_BUDGET_BYTES).build(army_theme(41));

	for army_type in 0..40 {
		cache.army_pic(army(army_type));
	}
	// Over the budget, but no category is over its limit yet.
	assert_eq!(cache.store().len_of(Category::Army), 40);
	assert!(cache.store().bytes() >= MIN_BUDGET_BYTES);

	let newest = cache.army_pic(army(40)).dimensions();
	assert_eq!(newest, (BIG, BIG));

	let survivors: Vec<u32> = cache.store().cache::<ArmyPic>().keys_lru().map(|key| key.army_type).collect();
	assert_eq!(survivors, (20..=40).collect::<Vec<_>>());
	assert_eq!(cache.store().bytes(), 21 * BIG_BYTES);
	assert_eq!(cache.stats().category(Category::Army).evictions, 20);

	// The newest picture is still cached.
	cache.army_pic(army(40));
	assert_eq!(cache.stats().category(Category::Army).hits, 1);
}

#[test]
fn test_shrinking_budget_prunes_on_check() {
	let mut cache = ImageCacheBuilder::new(64 * 1024 * 1024).build(army_theme(41));
	for army_type in 0..41 {
		cache.army_pic(army(army_type));
	}
	assert_eq!(cache.store().len_of(Category::Army), 41);

	cache.set_max_bytes(0);
	let report = cache.check_and_evict();

	assert_eq!(report.categories_pruned, 1);
	assert_eq!(report.bytes_freed, 20 * BIG_BYTES);
	assert!(!report.over_budget);
	assert_eq!(cache.store().len_of(Category::Army), 21);
}

#[test]
fn test_cities_are_pruned_before_armies() {
	let theme = army_theme(20).with_image(
		Asset::City {
			cityset: 0,
		},
		RasterImage::new(BIG, BIG),
	);
	let mut cache = ImageCache::with_config(theme, &BudgetConfig::new(MIN_BUDGET_BYTES));

	for player in 0..12 {
		cache.city_pic(CityPic {
			cityset: 0,
			player,
			razed: false,
		});
	}
	for army_type in 0..20 {
		cache.army_pic(army(army_type));
	}

	// The 32nd picture reached the budget; City (12 > 10) was halved and
	// that was enough.
	assert_eq!(cache.store().len_of(Category::City), 6);
	assert_eq!(cache.store().len_of(Category::Army), 20);
	let players: Vec<u32> = cache.store().cache::<CityPic>().keys_lru().map(|key| key.player).collect();
	assert_eq!(players, (6..12).collect::<Vec<_>>());
	assert_eq!(cache.store().bytes(), 26 * BIG_BYTES);
}

#[test]
fn test_soft_budget_stays_over() {
	let mut cache = ImageCacheBuilder::new(MIN_BUDGET_BYTES).build(army_theme(40));
	for army_type in 0..40 {
		cache.army_pic(army(army_type));
	}

	let report = cache.check_and_evict();

	assert!(report.over_budget);
	assert_eq!(report.bytes_freed, 0);
	assert_eq!(cache.store().len_of(Category::Army), 40);
}

#[test]
fn test_missing_asset_is_placeholder() {
	let mut cache = ImageCache::new(MemoryTheme::default());
	let image = cache
		.cursor_pic(CursorPic {
			cursor: 3,
		})
		.clone();
	assert_eq!(image, RasterImage::placeholder(PLACEHOLDER_SIZE));
}

#[test]
fn test_mismatched_mask_keeps_original() {
	let original = RasterImage::filled(8, 8, WHITE);
	let theme = MemoryTheme::default()
		.with_sprite(
			Asset::City {
				cityset: 0,
			},
			Sprite::with_mask(original.clone(), RasterImage::filled(4, 4, WHITE)),
		)
		.with_player_color(1, Rgb([255, 0, 0]));
	let mut cache = ImageCache::new(theme);

	let image = cache.city_pic(CityPic {
		cityset: 0,
		player: 1,
		razed: false,
	});

	assert_eq!(image, &original);
}

#[test]
fn test_player_colors_make_distinct_entries() {
	let theme = MemoryTheme::default()
		.with_sprite(
			Asset::City {
				cityset: 0,
			},
			Sprite::with_mask(RasterImage::filled(2, 2, WHITE), RasterImage::filled(2, 2, WHITE)),
		)
		.with_player_color(1, Rgb([255, 0, 0]))
		.with_player_color(2, Rgb([0, 0, 255]));
	let mut cache = ImageCache::new(theme);

	let red = cache
		.city_pic(CityPic {
			cityset: 0,
			player: 1,
			razed: false,
		})
		.clone();
	let blue = cache
		.city_pic(CityPic {
			cityset: 0,
			player: 2,
			razed: false,
		})
		.clone();

	assert_eq!(red.pixel(0, 0), Some(RED));
	assert_eq!(blue.pixel(0, 0), Some(BLUE));
	assert_eq!(cache.store().len_of(Category::City), 2);
}

#[test]
fn test_greyed_army_is_a_separate_entry() {
	let theme = MemoryTheme::default().with_image(
		Asset::Army {
			armyset: 1,
			army_type: 0,
		},
		RasterImage::filled(4, 4, Rgba([10, 200, 30, 255])),
	);
	let mut cache = ImageCache::new(theme);
	let mut greyed = army(0);
	greyed.greyed = true;

	let plain = cache.army_pic(army(0)).clone();
	let grey = cache.army_pic(greyed).clone();

	assert_eq!(plain.pixel(2, 0), Some(Rgba([10, 200, 30, 255])));
	assert_eq!(grey.pixel(2, 0), Some(Rgba([200, 200, 200, 255])));
	assert_eq!(cache.store().len_of(Category::Army), 2);
}

#[test]
fn test_medals_along_bottom_edge() {
	let theme = MemoryTheme::default()
		.with_image(
			Asset::Army {
				armyset: 1,
				army_type: 0,
			},
			RasterImage::new(30, 30),
		)
		.with_image(
			Asset::Medal {
				kind: 2,
				large: false,
			},
			RasterImage::filled(10, 10, RED),
		);
	let mut cache = ImageCache::new(theme);
	let mut key = army(0);
	key.medals = [false, false, true];

	let image = cache.army_pic(key).clone();

	assert_eq!(image.pixel(25, 25), Some(RED));
	assert_eq!(image.pixel(20, 20), Some(RED));
	assert_eq!(image.pixel(5, 25), Some(CLEAR));
	assert_eq!(image.pixel(25, 15), Some(CLEAR));
	assert_eq!(
		cache.store().peek(&MedalPic {
			kind: 2,
			large: false,
		}),
		Some(&RasterImage::filled(10, 10, RED))
	);
}

#[test]
fn test_circled_army_disc_color() {
	let theme = MemoryTheme::default()
		.with_image(
			Asset::Army {
				armyset: 1,
				army_type: 0,
			},
			RasterImage::new(20, 20),
		)
		.with_player_color(4, Rgb([0, 0, 200]));
	let mut cache = ImageCache::new(theme);

	let coloured = cache
		.circled_army_pic(CircledArmyPic {
			army: army(0),
			circle: Some(4),
		})
		.clone();
	let neutral = cache
		.circled_army_pic(CircledArmyPic {
			army: army(0),
			circle: None,
		})
		.clone();

	assert_eq!(coloured.pixel(10, 10), Some(Rgba([0, 0, 200, 255])));
	assert_eq!(neutral.pixel(10, 10), Some(Rgba([128, 128, 128, 255])));
	assert_eq!(neutral.pixel(0, 0), Some(CLEAR));
	// Both discs share the plain army picture.
	assert_eq!(cache.store().len_of(Category::Army), 1);
	assert_eq!(cache.store().len_of(Category::CircledArmy), 2);
}

#[test]
fn test_masked_pictures_take_player_color() {
	let masked = || Sprite::with_mask(RasterImage::filled(2, 2, WHITE), RasterImage::filled(2, 2, WHITE));
	let theme = MemoryTheme::default()
		.with_sprite(
			Asset::Selector {
				tileset: 0,
				frame: 1,
				large: true,
			},
			masked(),
		)
		.with_sprite(
			Asset::Shield {
				shieldset: 0,
				size: ShieldSize::Medium,
			},
			masked(),
		)
		.with_sprite(
			Asset::NewLevel {
				female: true,
			},
			masked(),
		)
		.with_player_color(1, Rgb([255, 0, 0]));
	let mut cache = ImageCache::new(theme);
	let red = RasterImage::filled(2, 2, RED);

	let selector = SelectorPic {
		tileset: 0,
		frame: 1,
		player: 1,
		large: true,
	};
	assert_eq!(cache.selector_pic(selector), &red);
	let shield = ShieldPic {
		shieldset: 0,
		player: 1,
		size: ShieldSize::Medium,
	};
	assert_eq!(cache.shield_pic(shield), &red);
	let new_level = NewLevelPic {
		player: 1,
		female: true,
	};
	assert_eq!(cache.new_level_pic(new_level), &red);

	for category in [Category::Selector, Category::Shield, Category::NewLevel] {
		assert_eq!(cache.store().len_of(category), 1, "{category}");
	}
}

#[test]
fn test_plain_pictures_come_back_unchanged() {
	let theme = MemoryTheme::default()
		.with_image(
			Asset::Explosion {
				tileset: 0,
			},
			RasterImage::filled(3, 3, RED),
		)
		.with_image(
			Asset::Diplomacy {
				state: 2,
				large: false,
			},
			RasterImage::filled(3, 3, BLUE),
		)
		.with_image(Asset::MoveBonus(3), RasterImage::filled(3, 3, YELLOW))
		.with_image(
			Asset::ProductionShield {
				kind: 1,
				active: true,
			},
			RasterImage::filled(3, 3, WHITE),
		);
	let mut cache = ImageCache::new(theme);

	let explosion = cache
		.explosion_pic(ExplosionPic {
			tileset: 0,
		})
		.clone();
	assert_eq!(explosion, RasterImage::filled(3, 3, RED));

	let diplomacy = cache
		.diplomacy_pic(DiplomacyPic {
			state: 2,
			large: false,
		})
		.clone();
	assert_eq!(diplomacy, RasterImage::filled(3, 3, BLUE));

	let bonus = cache
		.move_bonus_pic(MoveBonusPic {
			bonus: 3,
		})
		.clone();
	assert_eq!(bonus, RasterImage::filled(3, 3, YELLOW));

	let shield = cache
		.production_shield_pic(ProductionShieldPic {
			kind: 1,
			active: true,
		})
		.clone();
	assert_eq!(shield, RasterImage::filled(3, 3, WHITE));

	// The large diplomacy icon is its own asset and the theme lacks it.
	let large = cache
		.diplomacy_pic(DiplomacyPic {
			state: 2,
			large: true,
		})
		.clone();
	assert_eq!(large, RasterImage::placeholder(PLACEHOLDER_SIZE));

	assert_eq!(cache.store().len_of(Category::Diplomacy), 2);
	for category in [Category::Explosion, Category::MoveBonus, Category::ProductionShield] {
		assert_eq!(cache.store().len_of(category), 1, "{category}");
	}
}

#[test]
fn test_reset_and_set_theme() {
	let mut cache = ImageCache::new(army_theme(2));
	cache.army_pic(army(0));
	cache.army_pic(army(1));

	cache.reset();
	assert!(cache.store().is_empty());
	assert_eq!(cache.stats().total_bytes, 0);
	assert_eq!(cache.stats().misses(), 2);

	cache.army_pic(army(0));
	let previous = cache.set_theme(MemoryTheme::new(BIG));
	assert_eq!(previous.len(), 2);
	assert!(cache.store().is_empty());

	// The new theme lacks the army, so the placeholder is drawn.
	assert_eq!(cache.army_pic(army(0)), &RasterImage::placeholder(PLACEHOLDER_SIZE));
}
