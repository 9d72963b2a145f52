use crate::budget::{BudgetConfig, DEFAULT_BUDGET_BYTES};
use crate::facade::ImageCache;
use crate::shared::SharedImageCache;
use crate::theme::ThemeProvider;
use crate::traits::Category;

/// Builder for configuring an [`ImageCache`].
///
/// # Example
///
/// ```
/// use tilecache::{Category, ImageCacheBuilder, MemoryTheme};
///
/// let cache = ImageCacheBuilder::new(32 * 1024 * 1024) // 32 MB
///     .limit(Category::Tile, 400)
///     .limit(Category::Army, 80)
///     .build(MemoryTheme::default());
/// assert_eq!(cache.store().limit(Category::Tile), 400);
/// ```
#[derive(Debug, Clone)]
pub struct ImageCacheBuilder {
	config: BudgetConfig,
}

impl ImageCacheBuilder {
	/// Create a new builder with the given budget in bytes.
	///
	/// Budgets under [`MIN_BUDGET_BYTES`](crate::MIN_BUDGET_BYTES) are raised
	/// to it when the cache is built.
	pub fn new(max_bytes: usize) -> Self {
		Self::from_config(BudgetConfig::new(max_bytes))
	}

	/// Start from settings loaded by the host.
	pub fn from_config(config: BudgetConfig) -> Self {
		Self {
			config,
		}
	}

	/// Set the budget in bytes.
	pub fn max_bytes(mut self, max_bytes: usize) -> Self {
		self.config.max_bytes = max_bytes;
		self
	}

	/// Set how many entries `category` keeps when the budget is exceeded.
	///
	/// Default: [`Category::default_limit`]
	pub fn limit(mut self, category: Category, max_entries: usize) -> Self {
		self.config.limits.insert(category, max_entries);
		self
	}

	/// The settings collected so far.
	pub fn config(&self) -> &BudgetConfig {
		&self.config
	}

	/// Build the cache over `theme`.
	pub fn build<T: ThemeProvider>(self, theme: T) -> ImageCache<T> {
		ImageCache::with_config(theme, &self.config)
	}

	/// Build a cache that can be shared between threads.
	pub fn build_shared<T: ThemeProvider>(self, theme: T) -> SharedImageCache<T> {
		SharedImageCache::new(self.build(theme))
	}
}

impl Default for ImageCacheBuilder {
	/// Create a builder with the default budget and limits.
	fn default() -> Self {
		Self::new(DEFAULT_BUDGET_BYTES)
	}
}
