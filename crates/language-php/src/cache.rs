//! Parse cache so repeated work on one document runs tree-sitter once.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::PhpSemanticError;
use crate::parser::{parse_document, ParsedDocument};

/// Number of documents kept before the cache is flushed.
const MAX_ENTRIES: usize = 64;

/// Cached entry: the exact content is kept to rule out hash collisions.
#[derive(Debug)]
struct CacheEntry {
    content: String,
    parsed: Arc<ParsedDocument>,
}

/// Thread-safe cache of parsed documents keyed by content hash.
///
/// One cache can back several collaborators; the factory shares a single
/// cache between the classifier and the syntax tree provider of a finder.
#[derive(Debug, Default)]
pub struct TreeCache {
    entries: RwLock<HashMap<u64, CacheEntry>>,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached parse of `content`.
    pub fn get(&self, content: &str) -> Option<Arc<ParsedDocument>> {
        self.entries
            .read()
            .get(&hash_content(content))
            .filter(|entry| entry.content == content)
            .map(|entry| Arc::clone(&entry.parsed))
    }

    /// Insert the parse of `content`, flushing the cache when it is full.
    pub fn insert(&self, content: &str, parsed: Arc<ParsedDocument>) {
        let mut entries = self.entries.write();
        if entries.len() >= MAX_ENTRIES {
            log::debug!("Tree cache full ({} entries), flushing", entries.len());
            entries.clear();
        }
        entries.insert(
            hash_content(content),
            CacheEntry {
                content: content.to_string(),
                parsed,
            },
        );
    }

    /// Return the cached parse of `content`, parsing it on a miss.
    pub fn get_or_parse(&self, content: &str) -> Result<Arc<ParsedDocument>, PhpSemanticError> {
        if let Some(parsed) = self.get(content) {
            return Ok(parsed);
        }

        let parsed = Arc::new(parse_document(content)?);
        self.insert(content, Arc::clone(&parsed));
        Ok(parsed)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Simple hash function for content (for cache lookup).
pub fn hash_content(content: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Arc<ParsedDocument> {
        Arc::new(parse_document(text).unwrap())
    }

    #[test]
    fn test_tree_cache_basic() {
        let cache = TreeCache::new();
        assert!(cache.get("<?php").is_none());

        cache.insert("<?php", parsed("<?php"));
        assert!(cache.get("<?php").is_some());
        assert!(cache.get("<?php ").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_tree_cache_flushes_when_full() {
        let cache = TreeCache::new();
        let tree = parsed("<?php");
        for i in 0..MAX_ENTRIES {
            cache.insert(&format!("<?php {i};"), Arc::clone(&tree));
        }
        assert_eq!(cache.len(), MAX_ENTRIES);

        cache.insert("<?php last;", tree);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("<?php last;").is_some());
    }

    #[test]
    fn test_get_or_parse_reuses_entry() {
        let cache = TreeCache::new();
        let first = cache.get_or_parse("<?php $a;").unwrap();
        let second = cache.get_or_parse("<?php $a;").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_hash_content() {
        assert_eq!(hash_content("<?php $a;"), hash_content("<?php $a;"));
        assert_ne!(hash_content("<?php $a;"), hash_content("<?php $b;"));
    }
}
