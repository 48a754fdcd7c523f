//! Disk cache for fetched tables
//!
//! One JSON file per cache key, named by the SHA-256 of the key.
//! Freshness is judged against the `fetched_at` stamp inside the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use routeassist_domain::model::RawTable;
use routeassist_domain::repository::TableCache;
use routeassist_types::Result;

#[derive(Debug, Serialize, Deserialize)]
struct CachedTable {
    key: String,
    fetched_at: DateTime<Utc>,
    table: RawTable,
}

pub struct DiskTableCache {
    cache_dir: PathBuf,
}

impl DiskTableCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        self.cache_dir.join(format!("{:x}.json", hash))
    }

    /// Same as [`TableCache::get`] with an explicit clock
    pub fn get_at(&self, key: &str, ttl: Duration, now: DateTime<Utc>) -> Result<Option<RawTable>> {
        let path = self.entry_path(key);
        if !path.exists() {
            tracing::debug!(key, "cache miss");
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let cached: CachedTable = match serde_json::from_str(&content) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupted cache entry");
                fs::remove_file(&path)?;
                return Ok(None);
            }
        };

        let age = now.signed_duration_since(cached.fetched_at);
        if age.num_milliseconds() < 0 || age.num_milliseconds() as u128 >= ttl.as_millis() {
            tracing::debug!(key, age_secs = age.num_seconds(), "cache entry stale");
            return Ok(None);
        }

        tracing::debug!(key, age_secs = age.num_seconds(), "cache hit");
        Ok(Some(cached.table))
    }

    /// Same as [`TableCache::put`] with an explicit clock
    pub fn put_at(&self, key: &str, table: &RawTable, now: DateTime<Utc>) -> Result<()> {
        let entry = CachedTable {
            key: key.to_string(),
            fetched_at: now,
            table: table.clone(),
        };
        let content = serde_json::to_string(&entry)?;
        fs::write(self.entry_path(key), content)?;
        Ok(())
    }

    fn json_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                files.push(path);
            }
        }
        Ok(files)
    }

    pub fn stats(&self) -> Result<CacheStats> {
        let mut entry_count = 0;
        let mut total_size_bytes = 0u64;
        for path in self.json_files()? {
            entry_count += 1;
            if let Ok(metadata) = fs::metadata(&path) {
                total_size_bytes += metadata.len();
            }
        }
        Ok(CacheStats {
            entry_count,
            total_size_bytes,
            cache_dir: self.cache_dir.clone(),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

impl TableCache for DiskTableCache {
    fn get(&self, key: &str, ttl: Duration) -> Result<Option<RawTable>> {
        self.get_at(key, ttl, Utc::now())
    }

    fn put(&self, key: &str, table: &RawTable) -> Result<()> {
        self.put_at(key, table, Utc::now())
    }

    fn invalidate(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn clear(&self) -> Result<usize> {
        let files = self.json_files()?;
        for path in &files {
            fs::remove_file(path)?;
        }
        Ok(files.len())
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_size_bytes: u64,
    pub cache_dir: PathBuf,
}

impl CacheStats {
    pub fn display(&self) -> String {
        let size_kb = self.total_size_bytes as f64 / 1024.0;
        format!(
            "Cache Statistics\n\
             ================\n\
             Entries:    {}\n\
             Total size: {:.2} KB\n\
             Location:   {}",
            self.entry_count,
            size_kb,
            self.cache_dir.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn table() -> RawTable {
        RawTable::new(vec!["ID".to_string()], vec![vec!["D1".to_string()]])
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 24, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskTableCache::new(dir.path().to_path_buf()).unwrap();
        cache.put_at("routes.csv", &table(), t0()).unwrap();

        let hit = cache
            .get_at("routes.csv", Duration::from_secs(60), t0() + chrono::Duration::seconds(59))
            .unwrap();
        assert_eq!(hit, Some(table()));
    }

    #[test]
    fn test_stale_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskTableCache::new(dir.path().to_path_buf()).unwrap();
        cache.put_at("routes.csv", &table(), t0()).unwrap();

        let miss = cache
            .get_at("routes.csv", Duration::from_secs(60), t0() + chrono::Duration::seconds(60))
            .unwrap();
        assert_eq!(miss, None);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskTableCache::new(dir.path().to_path_buf()).unwrap();
        cache.put("a", &table()).unwrap();
        cache.put("b", &table()).unwrap();

        assert!(cache.invalidate("a").unwrap());
        assert!(!cache.invalidate("a").unwrap());
        assert_eq!(cache.get("a", Duration::from_secs(60)).unwrap(), None);
        assert_eq!(cache.stats().unwrap().entry_count, 1);
        assert_eq!(cache.clear().unwrap(), 1);
        assert_eq!(cache.stats().unwrap().entry_count, 0);
    }

    #[test]
    fn test_corrupted_entry_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskTableCache::new(dir.path().to_path_buf()).unwrap();
        fs::write(cache.entry_path("a"), "{not json").unwrap();
        assert_eq!(cache.get("a", Duration::from_secs(60)).unwrap(), None);
        assert_eq!(cache.stats().unwrap().entry_count, 0);
    }
}
