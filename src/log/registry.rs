//! Explicit per-tag level overrides
//!
//! Every tag passed to `set_level` gets one entry holding its own copy of
//! the tag text. Lookups compare content, so any string with the same text
//! finds the entry. The list is only scanned on a cache miss.

use alloc::boxed::Box;
use alloc::collections::TryReserveError;
use alloc::string::String;
use alloc::vec::Vec;

use super::level::LogLevel;

/// One tag override
#[derive(Debug)]
pub struct RegistryEntry {
    tag: Box<str>,
    level: LogLevel,
}

impl RegistryEntry {
    /// Tag text owned by this entry
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Level configured for the tag
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

/// Unbounded store of tag overrides, at most one entry per tag text.
#[derive(Debug, Default)]
pub struct LevelRegistry {
    entries: Vec<RegistryEntry>,
}

impl LevelRegistry {
    /// Creates an empty registry without allocating.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets the level of `tag`, creating the entry on first use.
    ///
    /// On allocation failure the registry is left exactly as it was.
    pub fn set(&mut self, tag: &str, level: LogLevel) -> Result<(), TryReserveError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| &*e.tag == tag) {
            entry.level = level;
            return Ok(());
        }

        let mut owned = String::new();
        owned.try_reserve_exact(tag.len())?;
        owned.push_str(tag);
        self.entries.try_reserve(1)?;
        self.entries.push(RegistryEntry {
            tag: owned.into_boxed_str(),
            level,
        });
        Ok(())
    }

    /// Level configured for `tag`, if any.
    pub fn lookup(&self, tag: &str) -> Option<LogLevel> {
        self.entries
            .iter()
            .find(|e| &*e.tag == tag)
            .map(|e| e.level)
    }

    /// Drops every entry and releases their memory.
    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }

    /// Number of tags with an override
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tag has an override
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the overrides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn set_then_lookup() {
        let mut registry = LevelRegistry::new();
        assert_eq!(registry.lookup("NET"), None);

        registry.set("NET", LogLevel::Info).unwrap();
        assert_eq!(registry.lookup("NET"), Some(LogLevel::Info));
        assert_eq!(registry.lookup("NE"), None);
        assert_eq!(registry.lookup("NETWORK"), None);
    }

    #[test]
    fn repeated_set_updates_in_place() {
        let mut registry = LevelRegistry::new();
        registry.set("NET", LogLevel::Info).unwrap();
        registry.set("NET", LogLevel::Error).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("NET"), Some(LogLevel::Error));
    }

    #[test]
    fn lookup_compares_content() {
        let mut registry = LevelRegistry::new();
        let configured = "DISK".to_string();
        registry.set(&configured, LogLevel::Debug).unwrap();
        drop(configured);

        let built = ['D', 'I', 'S', 'K'].iter().collect::<String>();
        assert_eq!(registry.lookup(&built), Some(LogLevel::Debug));
    }

    #[test]
    fn entry_owns_exact_copy() {
        let mut registry = LevelRegistry::new();
        registry.set("A", LogLevel::Warn).unwrap();
        registry.set("BB", LogLevel::Info).unwrap();

        let tags: Vec<_> = registry.iter().map(|e| (e.tag(), e.level())).collect();
        assert_eq!(tags, [("A", LogLevel::Warn), ("BB", LogLevel::Info)]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut registry = LevelRegistry::new();
        registry.set("A", LogLevel::Warn).unwrap();
        registry.set("B", LogLevel::Info).unwrap();
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.lookup("A"), None);
    }
}
