use crate::lru::KeyedCache;

/// Key-type-erased view of one category's cache.
///
/// The store keeps a differently typed [`KeyedCache`] per category; this is
/// the part of their interface the budget walk and bulk operations need,
/// so they can be visited by category without knowing the key type.
pub(crate) trait ErasedCache {
	/// Resident entries.
	fn len(&self) -> usize;

	/// Resident bytes.
	fn bytes(&self) -> usize;

	/// Evict the least recently used half; returns `(entries, bytes)` freed.
	fn discard_half(&mut self) -> (usize, usize);

	/// Evict everything; returns `(entries, bytes)` freed.
	fn reset(&mut self) -> (usize, usize);
}

impl<K: Ord + Clone> ErasedCache for KeyedCache<K> {
	fn len(&self) -> usize {
		KeyedCache::len(self)
	}

	fn bytes(&self) -> usize {
		KeyedCache::bytes(self)
	}

	fn discard_half(&mut self) -> (usize, usize) {
		let before = KeyedCache::len(self);
		let freed = KeyedCache::discard_half(self);
		(before - KeyedCache::len(self), freed)
	}

	fn reset(&mut self) -> (usize, usize) {
		let before = KeyedCache::len(self);
		(before, KeyedCache::reset(self))
	}
}
