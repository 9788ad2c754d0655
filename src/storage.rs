// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! File-backed store for versioned collection documents.
//!
//! Each stored document lives in its own file, `<prefix><version>.json`,
//! inside the configured documents directory. Versions are non-negative
//! integers; the highest value is the latest. Documents are immutable once
//! stored; uploads always allocate a fresh version.
//!
//! Writes are atomic (temp file + rename), and allocation-plus-write is
//! serialized behind a mutex so concurrent uploads cannot claim the same
//! version number.

use chrono::{DateTime, Local};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::RegistryError;
use crate::model::Collection;

/// Integer identifier of a stored document revision.
pub type VersionId = u64;

/// File-backed document store.
pub struct DocumentStore {
    dir: PathBuf,
    prefix: String,
    /// Serializes version allocation + write across concurrent uploads.
    alloc_lock: Mutex<()>,
}

impl DocumentStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self, RegistryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
            alloc_lock: Mutex::new(()),
        })
    }

    /// The filename stem (`api_5`) for a version.
    pub fn stem(&self, version: VersionId) -> String {
        format!("{}{}", self.prefix, version)
    }

    fn path_for(&self, version: VersionId) -> PathBuf {
        self.dir.join(format!("{}.json", self.stem(version)))
    }

    /// Parse a filename stem (`api_5`) back into a version identifier.
    ///
    /// Strict: the stem must be exactly the prefix followed by decimal
    /// digits. Anything else (including traversal-shaped input) is rejected.
    pub fn parse_stem(&self, stem: &str) -> Option<VersionId> {
        let suffix = stem.strip_prefix(&self.prefix)?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }

    /// All stored version identifiers, unordered.
    ///
    /// Files that don't match the `<prefix>*.json` pattern are ignored; a
    /// matching file whose suffix is not a valid integer is an error, since
    /// it would corrupt version allocation.
    pub fn versions(&self) -> Result<Vec<VersionId>, RegistryError> {
        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !stem.starts_with(&self.prefix) {
                continue;
            }
            match self.parse_stem(stem) {
                Some(version) => versions.push(version),
                None => {
                    return Err(RegistryError::InvalidVersion(
                        path.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                    ))
                }
            }
        }
        Ok(versions)
    }

    /// Stored versions with their last-modified timestamps, most recent
    /// first. Entries whose backing file cannot be inspected are skipped
    /// with a warning rather than failing the listing.
    pub fn list(&self) -> Result<Vec<(VersionId, DateTime<Local>)>, RegistryError> {
        let mut entries = Vec::new();
        for version in self.versions()? {
            let path = self.path_for(version);
            let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    warn!("Skipping version {version}: cannot stat {}: {e}", path.display());
                    continue;
                }
            };
            entries.push((version, DateTime::<Local>::from(modified)));
        }
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(entries)
    }

    /// The highest stored version, if any.
    pub fn latest(&self) -> Result<Option<VersionId>, RegistryError> {
        Ok(self.versions()?.into_iter().max())
    }

    /// The next version to allocate: one past the highest stored version.
    /// An empty store counts as version 0, so the first upload becomes 1.
    pub fn next_version(&self) -> Result<VersionId, RegistryError> {
        Ok(self.latest()?.unwrap_or(0) + 1)
    }

    /// Raw stored bytes of a version.
    pub fn read_bytes(&self, version: VersionId) -> Result<Vec<u8>, RegistryError> {
        match fs::read(self.path_for(version)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RegistryError::NotFound(version))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse the stored document of a version.
    pub fn read(&self, version: VersionId) -> Result<Collection, RegistryError> {
        Collection::from_slice(&self.read_bytes(version)?)
    }

    /// Write a document under an explicit version, overwriting silently if
    /// the version already exists. The write goes through a temp file and a
    /// rename, so a partially written document is never observable.
    pub fn write(&self, version: VersionId, collection: &Collection) -> Result<(), RegistryError> {
        let bytes = collection.to_pretty_json()?;
        let path = self.path_for(version);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, &bytes)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!("Wrote version {version} to {}", path.display());
        Ok(())
    }

    /// Allocate the next version and store `collection` under it.
    ///
    /// Holds the allocation lock across the allocate + write pair, so two
    /// racing uploads get distinct versions.
    pub async fn store_next(&self, collection: &Collection) -> Result<VersionId, RegistryError> {
        let _guard = self.alloc_lock.lock().await;
        let version = self.next_version()?;
        self.write(version, collection)?;
        Ok(version)
    }

    /// The documents directory this store is rooted at.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CollectionInfo;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn sample_collection() -> Collection {
        Collection {
            info: CollectionInfo {
                postman_id: String::new(),
                name: "test".to_string(),
                schema: "v2.1".to_string(),
            },
            items: Vec::new(),
        }
    }

    fn open_store(dir: &TempDir) -> DocumentStore {
        DocumentStore::open(dir.path(), "api_").expect("failed to open store")
    }

    #[test]
    fn test_next_version_on_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert_eq!(store.next_version().unwrap(), 1);
    }

    #[test]
    fn test_next_version_is_max_plus_one() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        for version in [3, 7, 2] {
            store.write(version, &sample_collection()).unwrap();
        }
        assert_eq!(store.next_version().unwrap(), 8);
    }

    #[test]
    fn test_non_numeric_suffix_aborts_allocation() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        fs::write(dir.path().join("api_latest.json"), "{}").unwrap();

        let result = store.next_version();
        assert!(matches!(result, Err(RegistryError::InvalidVersion(_))));
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        fs::write(dir.path().join("readme.txt"), "hi").unwrap();
        fs::write(dir.path().join("other_1.json"), "{}").unwrap();
        store.write(4, &sample_collection()).unwrap();

        assert_eq!(store.versions().unwrap(), vec![4]);
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let mut collection = sample_collection();
        collection.info.name = "orders".to_string();

        store.write(1, &collection).unwrap();
        let loaded = store.read(1).unwrap();
        assert_eq!(loaded.info.name, "orders");
    }

    #[test]
    fn test_read_missing_version_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(matches!(store.read_bytes(9), Err(RegistryError::NotFound(9))));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.write(1, &sample_collection()).unwrap();

        assert!(dir.path().join("api_1.json").exists());
        assert!(!dir.path().join("api_1.json.tmp").exists());
    }

    #[test]
    fn test_list_orders_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        for version in [1u64, 2, 3] {
            store.write(version, &sample_collection()).unwrap();
            // Push older versions back in time so ordering is by mtime.
            let file = fs::File::options()
                .write(true)
                .open(dir.path().join(format!("api_{version}.json")))
                .unwrap();
            file.set_modified(SystemTime::now() - Duration::from_secs(100 - version))
                .unwrap();
        }

        let listed: Vec<VersionId> = store.list().unwrap().into_iter().map(|(v, _)| v).collect();
        assert_eq!(listed, vec![3, 2, 1]);
    }

    #[test]
    fn test_parse_stem_rejects_malformed_input() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        assert_eq!(store.parse_stem("api_5"), Some(5));
        assert_eq!(store.parse_stem("api_"), None);
        assert_eq!(store.parse_stem("api_5x"), None);
        assert_eq!(store.parse_stem("api_-1"), None);
        assert_eq!(store.parse_stem("../etc/passwd"), None);
        assert_eq!(store.parse_stem("other_5"), None);
    }

    #[tokio::test]
    async fn test_store_next_allocates_sequentially() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let first = store.store_next(&sample_collection()).await.unwrap();
        let second = store.store_next(&sample_collection()).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }
}
