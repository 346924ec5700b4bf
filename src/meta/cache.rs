use super::ExtractedMeta;
use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
struct MetaCacheEntry {
    text: Arc<str>,
    meta: Option<ExtractedMeta>,
}

/// Extraction results keyed by file path and validated against the exact
/// source text they were produced from.
#[derive(Debug, Default)]
pub struct MetaCache {
    entries: RwLock<FastHashMap<PathBuf, MetaCacheEntry>>,
    stats: CacheStats,
}

impl MetaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result when `text` is unchanged. A changed text
    /// evicts the entry for `path` and nothing else.
    pub fn get(&self, path: &Path, text: &str) -> Option<Option<ExtractedMeta>> {
        {
            let entries = self.entries.read();
            match entries.get(path) {
                Some(entry) if &*entry.text == text => {
                    self.stats.record_hit();
                    return Some(entry.meta.clone());
                }
                Some(_) => {}
                None => {
                    self.stats.record_miss();
                    return None;
                }
            }
        }

        let mut entries = self.entries.write();
        if entries
            .get(path)
            .is_some_and(|entry| &*entry.text != text)
        {
            entries.remove(path);
        }
        self.stats.record_miss();
        None
    }

    pub fn insert(&self, path: PathBuf, text: &str, meta: Option<ExtractedMeta>) {
        self.entries.write().insert(
            path,
            MetaCacheEntry {
                text: Arc::from(text),
                meta,
            },
        );
    }

    pub fn invalidate(&self, path: &Path) {
        self.entries.write().remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.read().contains_key(path)
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// `(hits, misses)`
    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Option<ExtractedMeta> {
        Some(ExtractedMeta {
            name: Some(name.to_string()),
            ..ExtractedMeta::default()
        })
    }

    #[test]
    fn hit_requires_identical_text() {
        let cache = MetaCache::new();
        cache.insert("/a.vue".into(), "text", named("a"));

        assert_eq!(cache.get(Path::new("/a.vue"), "text"), Some(named("a")));
        assert_eq!(cache.stats().snapshot(), (1, 0));
    }

    #[test]
    fn changed_text_evicts_only_that_path() {
        let cache = MetaCache::new();
        cache.insert("/a.vue".into(), "same", named("a"));
        cache.insert("/b.vue".into(), "same", named("b"));

        assert_eq!(cache.get(Path::new("/a.vue"), "edited"), None);
        assert!(!cache.contains(Path::new("/a.vue")));
        assert_eq!(cache.get(Path::new("/b.vue"), "same"), Some(named("b")));
    }

    #[test]
    fn identical_contents_are_not_shared_across_paths() {
        let cache = MetaCache::new();
        cache.insert("/a.vue".into(), "same", named("a"));
        assert_eq!(cache.get(Path::new("/b.vue"), "same"), None);
    }

    #[test]
    fn cached_absence_is_a_hit() {
        let cache = MetaCache::new();
        cache.insert("/a.vue".into(), "no call", None);
        assert_eq!(cache.get(Path::new("/a.vue"), "no call"), Some(None));
    }
}
