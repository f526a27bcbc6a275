//! Metadata cache stores.
//!
//! The fetcher only needs `get`/`set` on opaque bytes. Eviction and expiry
//! belong to the store, and none of the stores here do either.
//!
//! Store failures never fail a resolution: a failed read is a miss and a
//! failed write is dropped, both logged.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Key/value store for raw oEmbed documents.
#[async_trait]
pub trait MetadataCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    async fn set(&self, key: &str, value: Vec<u8>);
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[async_trait]
impl MetadataCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: Vec<u8>) {
        self.entries.write().await.insert(key.to_string(), value);
    }
}

/// One file per key under a directory.
///
/// Keys are percent-encoded into file names, since SoundCloud-style codes
/// are whole URLs.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

#[async_trait]
impl MetadataCache for FileCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Cache read failed for {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) {
        let path = self.entry_path(key);
        let dir = self.dir.clone();
        let target = path.clone();
        let written = tokio::task::spawn_blocking(move || write_entry(&dir, &target, &value)).await;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Cache write failed for {}: {}", path.display(), e),
            Err(e) => tracing::warn!("Cache write task failed for {}: {}", path.display(), e),
        }
    }
}

/// Write-then-rename so readers never see a partial document.
///
/// Each writer gets its own temp file in `dir`; it is removed if the rename
/// does not happen.
fn write_entry(dir: &Path, path: &Path, value: &[u8]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(value)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Store that never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

#[async_trait]
impl MetadataCache for NoCache {
    async fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) {}
}
