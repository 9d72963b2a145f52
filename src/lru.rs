use std::collections::BTreeMap;

use slab::Slab;

use crate::raster::RasterImage;

/// End-of-list marker for the intrusive links.
const NIL: usize = usize::MAX;

/// One resident image and its place in the LRU sequence.
struct Node<K> {
	key: K,
	image: RasterImage,
	/// Declared cost, fixed at insertion.
	bytes: usize,
	prev: usize,
	next: usize,
}

/// Result of [`KeyedCache::lookup`].
#[derive(Debug)]
pub struct Lookup<'a> {
	pub image: &'a RasterImage,
	/// Bytes added to the cache by this call; zero on a hit.
	pub bytes_added: usize,
}

/// Byte accounting of [`KeyedCache::insert`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inserted {
	/// Cost of the new entry.
	pub added: usize,
	/// Cost of the entry it replaced, if the key was already resident.
	pub released: usize,
}

/// Memoizing image cache for one category, with LRU order.
///
/// Keys live in an ordered index pointing at slab slots; the slots form a
/// doubly linked list from least to most recently used. Every method that
/// changes one structure changes the other in the same call.
///
/// Images are owned by the cache. A borrow returned by [`lookup`] or
/// [`peek`] ends before the next `&mut self` call, so an evicted image can
/// never be observed.
///
/// [`lookup`]: KeyedCache::lookup
/// [`peek`]: KeyedCache::peek
pub struct KeyedCache<K> {
	index: BTreeMap<K, usize>,
	nodes: Slab<Node<K>>,
	/// Least recently used.
	head: usize,
	/// Most recently used.
	tail: usize,
	bytes: usize,
}

impl<K: Ord + Clone> Default for KeyedCache<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Ord + Clone> KeyedCache<K> {
	pub fn new() -> Self {
		Self {
			index: BTreeMap::new(),
			nodes: Slab::new(),
			head: NIL,
			tail: NIL,
			bytes: 0,
		}
	}

	/// Return the image for `key`, generating it on a miss.
	///
	/// A hit moves the entry to the most-recently-used end and adds nothing.
	/// A miss calls `generate` once, stores the result at the
	/// most-recently-used end and reports its byte cost.
	///
	/// # Runtime Complexity
	///
	/// O(log n) plus the cost of `generate` on a miss.
	pub fn lookup<F>(&mut self, key: K, generate: F) -> Lookup<'_>
	where
		F: FnOnce(&K) -> RasterImage,
	{
		if let Some(&slot) = self.index.get(&key) {
			self.move_to_back(slot);
			return Lookup {
				image: &self.nodes[slot].image,
				bytes_added: 0,
			};
		}

		let image = generate(&key);
		let slot = self.push_back(key, image);
		let node = &self.nodes[slot];
		Lookup {
			image: &node.image,
			bytes_added: node.bytes,
		}
	}

	/// Mark `key` as most recently used. Returns `false` if it is not resident.
	pub fn touch(&mut self, key: &K) -> bool {
		match self.index.get(key) {
			Some(&slot) => {
				self.move_to_back(slot);
				true
			}
			None => false,
		}
	}

	/// Store `image` under `key` as the most recently used entry.
	///
	/// An entry already resident under `key` is dropped first, so there is
	/// never more than one entry per key.
	pub fn insert(&mut self, key: K, image: RasterImage) -> Inserted {
		let released = match self.index.get(&key) {
			Some(&slot) => self.remove_slot(slot),
			None => 0,
		};
		let slot = self.push_back(key, image);
		Inserted {
			added: self.nodes[slot].bytes,
			released,
		}
	}

	/// The image for `key` without changing its recency.
	pub fn peek(&self, key: &K) -> Option<&RasterImage> {
		self.index.get(key).map(|&slot| &self.nodes[slot].image)
	}

	pub fn contains(&self, key: &K) -> bool {
		self.index.contains_key(key)
	}

	/// Evict the least recently used half of the entries, rounded down.
	///
	/// Returns the bytes freed. This is the only partial eviction the cache
	/// offers.
	///
	/// # Runtime Complexity
	///
	/// O(n log n) for n entries evicted.
	pub fn discard_half(&mut self) -> usize {
		let victims = self.len() / 2;
		let mut freed = 0;
		for _ in 0..victims {
			match self.pop_front() {
				Some(bytes) => freed += bytes,
				None => break,
			}
		}
		freed
	}

	/// Evict everything. Returns the bytes freed.
	pub fn reset(&mut self) -> usize {
		let freed = self.bytes;
		self.index.clear();
		self.nodes.clear();
		self.head = NIL;
		self.tail = NIL;
		self.bytes = 0;
		freed
	}

	/// Number of resident entries.
	pub fn len(&self) -> usize {
		self.index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// Sum of the declared costs of resident entries.
	pub fn bytes(&self) -> usize {
		self.bytes
	}

	/// Keys from least to most recently used.
	pub fn keys_lru(&self) -> LruKeys<'_, K> {
		LruKeys {
			nodes: &self.nodes,
			cursor: self.head,
		}
	}

	fn push_back(&mut self, key: K, image: RasterImage) -> usize {
		let bytes = image.byte_size();
		let slot = self.nodes.insert(Node {
			key: key.clone(),
			image,
			bytes,
			prev: NIL,
			next: NIL,
		});
		self.link_back(slot);
		self.index.insert(key, slot);
		self.bytes += bytes;
		debug_assert_eq!(self.index.len(), self.nodes.len());
		slot
	}

	fn pop_front(&mut self) -> Option<usize> {
		if self.head == NIL {
			return None;
		}
		Some(self.remove_slot(self.head))
	}

	fn remove_slot(&mut self, slot: usize) -> usize {
		self.unlink(slot);
		let node = self.nodes.remove(slot);
		self.index.remove(&node.key);
		self.bytes -= node.bytes;
		debug_assert_eq!(self.index.len(), self.nodes.len());
		node.bytes
	}

	fn move_to_back(&mut self, slot: usize) {
		if self.tail == slot {
			return;
		}
		self.unlink(slot);
		self.link_back(slot);
	}

	fn unlink(&mut self, slot: usize) {
		let (prev, next) = {
			let node = &self.nodes[slot];
			(node.prev, node.next)
		};
		if prev == NIL {
			self.head = next;
		} else {
			self.nodes[prev].next = next;
		}
		if next == NIL {
			self.tail = prev;
		} else {
			self.nodes[next].prev = prev;
		}
		let node = &mut self.nodes[slot];
		node.prev = NIL;
		node.next = NIL;
	}

	fn link_back(&mut self, slot: usize) {
		let tail = self.tail;
		{
			let node = &mut self.nodes[slot];
			node.prev = tail;
			node.next = NIL;
		}
		if tail == NIL {
			self.head = slot;
		} else {
			self.nodes[tail].next = slot;
		}
		self.tail = slot;
	}
}

/// Iterator over keys from least to most recently used.
pub struct LruKeys<'a, K> {
	nodes: &'a Slab<Node<K>>,
	cursor: usize,
}

impl<'a, K> Iterator for LruKeys<'a, K> {
	type Item = &'a K;

	fn next(&mut self) -> Option<&'a K> {
		let node = self.nodes.get(self.cursor)?;
		self.cursor = node.next;
		Some(&node.key)
	}
}
