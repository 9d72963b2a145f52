//! Cache statistics.

use crate::traits::Category;

/// Counters and occupancy of one category.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
	/// Requests answered from the cache.
	pub hits: u64,
	/// Requests that had to generate an image.
	pub misses: u64,
	/// Entries dropped by budget pruning. Resets are not counted.
	pub evictions: u64,
	/// Entries currently resident.
	pub entries: usize,
	/// Declared bytes currently resident.
	pub bytes: usize,
}

impl CategoryStats {
	/// Fraction of requests answered from the cache, 0.0 before any request.
	pub fn hit_rate(&self) -> f64 {
		ratio(self.hits, self.hits + self.misses)
	}
}

/// Snapshot of the cache, taken by
/// [`ImageCache::stats`](crate::ImageCache::stats).
///
/// # Example
///
/// ```
/// use tilecache::{ImageCache, MemoryTheme};
///
/// let cache = ImageCache::new(MemoryTheme::default());
/// let stats = cache.stats();
/// println!("Hit rate: {:.2}%", stats.hit_rate() * 100.0);
/// println!("Utilization: {:.2}%", stats.utilization() * 100.0);
/// assert_eq!(stats.total_entries(), 0);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
	/// Indexed by [`Category::index`].
	pub categories: [CategoryStats; Category::COUNT],
	/// Resident bytes across all categories.
	pub total_bytes: usize,
	/// Current budget ceiling.
	pub max_bytes: usize,
}

impl CacheStats {
	pub(crate) fn new(categories: [CategoryStats; Category::COUNT], total_bytes: usize, max_bytes: usize) -> Self {
		Self {
			categories,
			total_bytes,
			max_bytes,
		}
	}

	pub fn category(&self, category: Category) -> &CategoryStats {
		&self.categories[category.index()]
	}

	pub fn hits(&self) -> u64 {
		self.categories.iter().map(|c| c.hits).sum()
	}

	pub fn misses(&self) -> u64 {
		self.categories.iter().map(|c| c.misses).sum()
	}

	pub fn evictions(&self) -> u64 {
		self.categories.iter().map(|c| c.evictions).sum()
	}

	pub fn total_entries(&self) -> usize {
		self.categories.iter().map(|c| c.entries).sum()
	}

	/// Calculate the hit rate over every category as a ratio between 0.0 and 1.0.
	///
	/// Returns 0.0 if there have been no requests.
	pub fn hit_rate(&self) -> f64 {
		let hits = self.hits();
		ratio(hits, hits + self.misses())
	}

	/// Fraction of the budget in use. Can exceed 1.0 while the cache is over
	/// its soft ceiling.
	pub fn utilization(&self) -> f64 {
		if self.max_bytes == 0 {
			0.0
		} else {
			self.total_bytes as f64 / self.max_bytes as f64
		}
	}
}

fn ratio(part: u64, whole: u64) -> f64 {
	if whole == 0 {
		0.0
	} else {
		part as f64 / whole as f64
	}
}
