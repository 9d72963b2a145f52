use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::budget::EvictionReport;
use crate::facade::ImageCache;
use crate::generate::Generate;
use crate::metrics::CacheStats;
use crate::raster::RasterImage;
use crate::theme::ThemeProvider;

/// RAII guard for a cached image. Holds a read lock on the whole cache.
///
/// Other threads can read while the guard lives, but every request that may
/// generate waits for it to drop. Copy what you need out of it instead of
/// keeping it around.
///
/// **`!Send`**, like the lock guard it wraps.
pub struct Guard<'a> {
	image: MappedRwLockReadGuard<'a, RasterImage>,
}

impl Deref for Guard<'_> {
	type Target = RasterImage;

	fn deref(&self) -> &RasterImage {
		&self.image
	}
}

impl fmt::Debug for Guard<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		(**self).fmt(f)
	}
}

/// An [`ImageCache`] behind a read-write lock, for renderers on several
/// threads.
///
/// Requests take the write lock, since a miss generates and may evict. The
/// lock is downgraded before the image is handed out, so readers holding
/// guards do not block each other.
///
/// ```
/// use std::thread;
///
/// use tilecache::{CursorPic, ImageCache, MemoryTheme, SharedImageCache};
///
/// let cache = SharedImageCache::new(ImageCache::new(MemoryTheme::default()));
/// let handles: Vec<_> = (0..4)
///     .map(|cursor| {
///         let cache = cache.clone();
///         thread::spawn(move || {
///             let width = cache.pic(CursorPic { cursor }).width();
///             width
///         })
///     })
///     .collect();
/// for handle in handles {
///     assert!(handle.join().unwrap() > 0);
/// }
/// ```
pub struct SharedImageCache<T> {
	inner: Arc<RwLock<ImageCache<T>>>,
}

impl<T> Clone for SharedImageCache<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for SharedImageCache<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SharedImageCache").field("inner", &self.inner).finish()
	}
}

impl<T: ThemeProvider> SharedImageCache<T> {
	pub fn new(cache: ImageCache<T>) -> Self {
		Self {
			inner: Arc::new(RwLock::new(cache)),
		}
	}

	/// The image for `key`, generated on first use.
	pub fn pic<K: Generate>(&self, key: K) -> Guard<'_> {
		let mut cache = self.inner.write();
		cache.pic(key.clone());
		let cache = RwLockWriteGuard::downgrade(cache);
		Guard {
			image: RwLockReadGuard::map(cache, |cache| cache.resident_or_blank(&key)),
		}
	}

	/// Run `f` with exclusive access to the cache.
	pub fn with<R>(&self, f: impl FnOnce(&mut ImageCache<T>) -> R) -> R {
		f(&mut *self.inner.write())
	}

	pub fn reset(&self) {
		self.inner.write().reset();
	}

	pub fn check_and_evict(&self) -> EvictionReport {
		self.inner.write().check_and_evict()
	}

	pub fn stats(&self) -> CacheStats {
		self.inner.read().stats()
	}

	/// The cache back, if this is the last handle.
	pub fn try_unwrap(self) -> Result<ImageCache<T>, Self> {
		Arc::try_unwrap(self.inner).map(|lock| lock.into_inner()).map_err(|inner| Self {
			inner,
		})
	}
}
