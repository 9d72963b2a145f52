//! Memory budget shared by every category.
//!
//! The budget is soft. Crossing it triggers a pruning pass over the
//! categories in [`Category::ALL`] order, but a request is never refused and
//! the newest entry always stays resident.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::Category;

/// Smallest budget accepted; lower settings are raised to this.
pub const MIN_BUDGET_BYTES: usize = 2 * 1024 * 1024;

/// Budget used when none is configured.
pub const DEFAULT_BUDGET_BYTES: usize = 16 * 1024 * 1024;

/// Budget settings, as a host would keep them in its configuration.
///
/// `limits` only needs the categories whose entry limit differs from
/// [`Category::default_limit`].
///
/// ```
/// use tilecache::{BudgetConfig, Category};
///
/// let config: BudgetConfig =
///     serde_json::from_str(r#"{ "max_bytes": 8388608, "limits": { "tile": 400 } }"#).unwrap();
/// assert_eq!(config.limit(Category::Tile), 400);
/// assert_eq!(config.limit(Category::Army), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
	/// Soft ceiling on resident bytes across all categories.
	pub max_bytes: usize,
	/// Per-category overrides of the maximum live entry count.
	pub limits: BTreeMap<Category, usize>,
}

impl Default for BudgetConfig {
	fn default() -> Self {
		Self {
			max_bytes: DEFAULT_BUDGET_BYTES,
			limits: BTreeMap::new(),
		}
	}
}

impl BudgetConfig {
	pub fn new(max_bytes: usize) -> Self {
		Self {
			max_bytes,
			..Self::default()
		}
	}

	/// Effective entry limit for `category`.
	pub fn limit(&self, category: Category) -> usize {
		self.limits.get(&category).copied().unwrap_or(category.default_limit())
	}
}

/// Per-category view of the caches the budget prunes.
pub trait CategoryCaches {
	/// Resident entries in `category`.
	fn live_count(&self, category: Category) -> usize;

	/// Evict the least recently used half of `category`; returns bytes freed.
	fn discard_half(&mut self, category: Category) -> usize;
}

/// Outcome of [`BudgetManager::check_and_evict`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionReport {
	/// Categories that were halved.
	pub categories_pruned: usize,
	pub bytes_freed: usize,
	/// The pass ran out of categories before getting under budget.
	pub over_budget: bool,
}

/// Tracks resident bytes and decides when and where to evict.
#[derive(Debug, Clone)]
pub struct BudgetManager {
	max_bytes: usize,
	limits: [usize; Category::COUNT],
	total: usize,
	per_category: [usize; Category::COUNT],
}

impl Default for BudgetManager {
	fn default() -> Self {
		Self::new(&BudgetConfig::default())
	}
}

impl BudgetManager {
	pub fn new(config: &BudgetConfig) -> Self {
		Self {
			max_bytes: config.max_bytes.max(MIN_BUDGET_BYTES),
			limits: Category::ALL.map(|category| config.limit(category)),
			total: 0,
			per_category: [0; Category::COUNT],
		}
	}

	pub fn max_bytes(&self) -> usize {
		self.max_bytes
	}

	/// Change the ceiling. Values under [`MIN_BUDGET_BYTES`] are raised to it.
	pub fn set_max_bytes(&mut self, max_bytes: usize) {
		self.max_bytes = max_bytes.max(MIN_BUDGET_BYTES);
	}

	pub fn limit(&self, category: Category) -> usize {
		self.limits[category.index()]
	}

	pub fn set_limit(&mut self, category: Category, max_entries: usize) {
		self.limits[category.index()] = max_entries;
	}

	/// Resident bytes across all categories.
	pub fn total_bytes(&self) -> usize {
		self.total
	}

	pub fn category_bytes(&self, category: Category) -> usize {
		self.per_category[category.index()]
	}

	pub fn is_over_budget(&self) -> bool {
		self.total >= self.max_bytes
	}

	/// Record `bytes` newly resident in `category`.
	///
	/// Returns `true` when the total has reached the ceiling and a call to
	/// [`check_and_evict`](Self::check_and_evict) is due.
	pub fn accept(&mut self, category: Category, bytes: usize) -> bool {
		self.total += bytes;
		self.per_category[category.index()] += bytes;
		self.is_over_budget()
	}

	/// Record `bytes` no longer resident in `category`.
	pub fn release(&mut self, category: Category, bytes: usize) {
		self.total = self.total.saturating_sub(bytes);
		let slot = &mut self.per_category[category.index()];
		*slot = slot.saturating_sub(bytes);
	}

	/// Prune categories until the total is back under the ceiling.
	///
	/// Categories are visited in eviction order; each one holding more than
	/// its limit is halved. The pass stops as soon as the total drops below
	/// the ceiling. If every category is within its limit and the total is
	/// still too high, the pass gives up and the cache stays over budget.
	pub fn check_and_evict<C>(&mut self, caches: &mut C) -> EvictionReport
	where
		C: CategoryCaches + ?Sized,
	{
		let mut report = EvictionReport::default();
		if !self.is_over_budget() {
			return report;
		}

		for category in Category::ALL {
			let live = caches.live_count(category);
			if live <= self.limit(category) {
				continue;
			}

			let freed = caches.discard_half(category);
			let remaining = caches.live_count(category);
			if remaining == live {
				// A single entry over a zero limit; halving keeps it.
				continue;
			}
			self.release(category, freed);
			report.categories_pruned += 1;
			report.bytes_freed += freed;
			debug!(
				%category,
				live,
				remaining,
				freed,
				total = self.total,
				"discarded least recently used half"
			);

			if !self.is_over_budget() {
				return report;
			}
		}

		report.over_budget = true;
		debug!(total = self.total, max = self.max_bytes, "every category within its limit, staying over budget");
		report
	}
}
