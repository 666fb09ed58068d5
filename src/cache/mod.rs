//! CMS response cache
//!
//! Fetched documents are stored on disk so repeated generations within the
//! configured `revalidate` window render without hitting the CMS. The cache
//! is a single JSON db under `.octavo-cache/`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::cms::Document;

/// Cache directory name
const CACHE_DIR: &str = ".octavo-cache";

/// Cache file name
const CACHE_FILE: &str = ".octavo-cache/db.json";

/// Cache database of fetched CMS documents
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheDb {
    /// Version of the cache format
    pub version: u32,

    /// Unix timestamp of the fetch that filled this cache
    pub fetched_at: u64,

    /// Next-page cursor of the initial list query, for the index page
    pub next_page: Option<String>,

    /// Every fetched document, in list order
    pub documents: Vec<Document>,
}

impl CacheDb {
    /// Current cache format version
    const VERSION: u32 = 1;

    /// Load cache from disk, or create a new empty cache
    pub fn load(base_dir: &Path) -> Self {
        let cache_path = base_dir.join(CACHE_FILE);
        if let Ok(content) = fs::read_to_string(&cache_path) {
            if let Ok(cache) = serde_json::from_str::<CacheDb>(&content) {
                if cache.version == Self::VERSION {
                    return cache;
                }
                tracing::info!("Cache version mismatch, refetching");
            }
        }
        Self::default()
    }

    /// Save cache to disk
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let cache_dir = base_dir.join(CACHE_DIR);
        fs::create_dir_all(&cache_dir)?;

        let cache_path = base_dir.join(CACHE_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(cache_path, content)?;
        Ok(())
    }

    /// Create a new cache holding the given documents, stamped now
    pub fn new(documents: Vec<Document>, next_page: Option<String>) -> Self {
        Self {
            version: Self::VERSION,
            fetched_at: unix_now(),
            next_page,
            documents,
        }
    }

    /// Whether the cached fetch is within the revalidate window
    pub fn is_fresh(&self, revalidate_secs: u64) -> bool {
        if self.documents.is_empty() {
            return false;
        }
        unix_now().saturating_sub(self.fetched_at) < revalidate_secs
    }

    /// Age of the cached fetch in seconds
    pub fn age_secs(&self) -> u64 {
        unix_now().saturating_sub(self.fetched_at)
    }
}

/// Remove the cache directory
pub fn clear(base_dir: &Path) -> Result<()> {
    let cache_dir = base_dir.join(CACHE_DIR);
    if cache_dir.exists() {
        fs::remove_dir_all(&cache_dir)?;
        tracing::info!("Cache cleared");
    }
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(uid: &str) -> Document {
        Document {
            id: format!("id-{}", uid),
            uid: Some(uid.to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: None,
            data: json!({"title": uid, "subtitle": "s", "author": "a"}),
        }
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheDb::new(vec![document("a"), document("b")], Some("url".to_string()));
        cache.save(dir.path()).unwrap();

        let loaded = CacheDb::load(dir.path());
        assert_eq!(loaded.version, CacheDb::VERSION);
        assert_eq!(loaded.documents.len(), 2);
        assert_eq!(loaded.next_page.as_deref(), Some("url"));
    }

    #[test]
    fn test_missing_cache_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheDb::load(dir.path());
        assert!(cache.documents.is_empty());
        assert!(!cache.is_fresh(u64::MAX));
    }

    #[test]
    fn test_freshness_window() {
        let cache = CacheDb::new(vec![document("a")], None);
        assert!(cache.is_fresh(60));

        let stale = CacheDb {
            fetched_at: 0,
            ..cache
        };
        assert!(!stale.is_fresh(60));
    }

    #[test]
    fn test_version_mismatch_discards_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CacheDb::new(vec![document("a")], None);
        cache.version = 99;
        cache.save(dir.path()).unwrap();

        let loaded = CacheDb::load(dir.path());
        assert!(loaded.documents.is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheDb::new(vec![document("a")], None);
        cache.save(dir.path()).unwrap();

        clear(dir.path()).unwrap();
        assert!(!dir.path().join(CACHE_DIR).exists());
    }
}
