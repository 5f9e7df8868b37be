//! Tag level cache
//!
//! Resolving a tag through the registry costs one string comparison per
//! override. Call sites conventionally use one `&'static str` tag constant
//! per file, so the same tag *address* shows up over and over again. The
//! cache remembers the resolved level for the most recently used addresses.
//!
//! Slots are compared by identity (address and length), never by content.
//! Two different strings with the same text therefore occupy two slots.
//! This keeps every lookup a pair of integer compares; the registry below
//! still resolves both to the same override.
//!
//! Ordering is a binary min-heap on `generation`, a counter bumped every
//! time a slot is written or, once the cache is full, hit. The slot at index
//! 0 is always the least recently touched one and is the one evicted. Before
//! the cache is full entries are just appended; since generations are issued
//! in increasing order an append-only array is already a valid heap. The
//! price is that entries inserted during the fill phase never got promoted,
//! so the first evictions after filling up are not strictly LRU. That only
//! happens once.
//!
//! The generation counter is not protected against wrap-around.

use super::level::LogLevel;

#[derive(Debug, Clone, Copy)]
struct CacheSlot {
    tag: &'static str,
    level: LogLevel,
    generation: u32,
}

impl CacheSlot {
    const EMPTY: CacheSlot = CacheSlot {
        tag: "",
        level: LogLevel::None,
        generation: 0,
    };

    #[inline(always)]
    fn holds(&self, tag: &'static str) -> bool {
        core::ptr::eq(self.tag.as_ptr(), tag.as_ptr()) && self.tag.len() == tag.len()
    }
}

/// Hit and miss counters of a [`LevelCache`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered by the cache
    pub hits: u32,
    /// Lookups that fell through to the registry or the default level
    pub misses: u32,
}

/// Fixed-capacity, identity-keyed cache of resolved tag levels.
///
/// `C` must be `2^n - 1` with `n >= 2` so every internal node has two
/// children; this is checked when the cache is constructed.
#[derive(Debug)]
pub struct LevelCache<const C: usize> {
    slots: [CacheSlot; C],
    count: usize,
    max_generation: u32,
    stats: CacheStats,
}

impl<const C: usize> LevelCache<C> {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        const {
            assert!(
                C >= 3 && (C + 1).is_power_of_two(),
                "cache capacity must be 2^n - 1"
            )
        };
        Self {
            slots: [CacheSlot::EMPTY; C],
            count: 0,
            max_generation: 0,
            stats: CacheStats { hits: 0, misses: 0 },
        }
    }

    /// Level cached for this exact tag string, if present.
    ///
    /// When the cache is full a hit also refreshes the slot's generation and
    /// sinks it away from the eviction end of the heap.
    pub fn try_get(&mut self, tag: &'static str) -> Option<LogLevel> {
        let mut found = None;
        for i in 0..self.count {
            debug_assert!(
                i == 0 || self.slots[(i - 1) / 2].generation < self.slots[i].generation,
                "tag cache heap order broken at {i}"
            );
            if self.slots[i].holds(tag) {
                found = Some(i);
                break;
            }
        }

        let Some(index) = found else {
            self.stats.misses = self.stats.misses.saturating_add(1);
            return None;
        };
        self.stats.hits = self.stats.hits.saturating_add(1);
        let level = self.slots[index].level;

        if self.count == C {
            self.slots[index].generation = self.next_generation();
            self.bubble_down(index);
        }
        Some(level)
    }

    /// Caches `level` for `tag`, evicting the least recently touched slot
    /// when full.
    ///
    /// The cache keeps `tag` as a non-owning key; callers are expected to
    /// pass the same `&'static str` on every call.
    pub fn insert(&mut self, tag: &'static str, level: LogLevel) {
        let generation = self.next_generation();
        let slot = CacheSlot {
            tag,
            level,
            generation,
        };

        if self.count < C {
            self.slots[self.count] = slot;
            self.count += 1;
            return;
        }

        self.slots[0] = slot;
        self.bubble_down(0);
    }

    /// Rewrites the level of every slot whose tag text equals `tag`.
    ///
    /// Used after an override changes so cached answers never go stale.
    pub fn update_matching(&mut self, tag: &str, level: LogLevel) {
        for slot in self.slots[..self.count].iter_mut() {
            if slot.tag == tag {
                slot.level = level;
            }
        }
    }

    /// Empties the cache and restarts the generation counter.
    pub fn reset(&mut self) {
        self.count = 0;
        self.max_generation = 0;
        self.stats = CacheStats::default();
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total number of slots
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Hit and miss counters since the last reset
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn next_generation(&mut self) -> u32 {
        let generation = self.max_generation;
        self.max_generation = self.max_generation.wrapping_add(1);
        generation
    }

    fn bubble_down(&mut self, mut index: usize) {
        while index < C / 2 {
            let left = index * 2 + 1;
            let right = left + 1;
            let next = if self.slots[left].generation < self.slots[right].generation {
                left
            } else {
                right
            };
            if self.slots[index].generation < self.slots[next].generation {
                break;
            }
            self.slots.swap(index, next);
            index = next;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_heap_ordered(&self) -> bool {
        (1..self.count).all(|i| self.slots[(i - 1) / 2].generation < self.slots[i].generation)
    }

    #[cfg(test)]
    pub(crate) fn oldest_tag(&self) -> Option<&'static str> {
        (self.count > 0).then(|| self.slots[0].tag)
    }
}

impl<const C: usize> Default for LevelCache<C> {
    fn default() -> Self {
        Self::new()
    }
}
