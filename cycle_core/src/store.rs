//! Key-value store abstraction for profile, check-in, and history data.
//!
//! The calculation engine never touches storage; everything that persists
//! goes through [`KeyValueStore`]. The contract is deliberately small and
//! best-effort: reads that fail return `None`, writes that fail are logged
//! and dropped, so callers degrade to an empty state instead of erroring.
//! Reads observe the most recent write in the same session; nothing more is
//! guaranteed.

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Synchronous key-value storage
///
/// Keys are slash-separated segments of `[A-Za-z0-9._-]` characters, e.g.
/// `profile` or `checkins/2024-03-05`.
pub trait KeyValueStore {
    /// Fetch the value under `key`, or `None` if absent or unreadable
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`; failures are logged and swallowed
    fn set(&self, key: &str, value: Value);

    /// Remove `key` if present
    fn delete(&self, key: &str);

    /// All stored keys beginning with `prefix`, sorted
    fn list_keys_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Typed read through serde; malformed values are treated as absent
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Malformed value under key {:?}: {}. Ignoring.", key, e);
                None
            }
        }
    }

    /// Typed write through serde
    fn set_json<T: Serialize>(&self, key: &str, value: &T)
    where
        Self: Sized,
    {
        match serde_json::to_value(value) {
            Ok(encoded) => self.set(key, encoded),
            Err(e) => {
                tracing::warn!("Unable to encode value for key {:?}: {}. Dropping.", key, e);
            }
        }
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Map-backed store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn delete(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    fn list_keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => {
                let mut keys: Vec<String> = entries
                    .keys()
                    .filter(|k| k.starts_with(prefix))
                    .cloned()
                    .collect();
                keys.sort();
                keys
            }
            Err(_) => Vec::new(),
        }
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// File-backed store keeping one JSON file per key under a root directory
///
/// Key segments become path segments (`checkins/2024-03-05` maps to
/// `<root>/checkins/2024-03-05.json`), so listing by prefix is a directory
/// walk. Writes go through a temp file and an atomic rename, with advisory
/// locks serializing concurrent writers on the same key.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to its backing file, rejecting malformed keys
    fn path_for_key(&self, key: &str) -> Option<PathBuf> {
        let segments: Vec<&str> = key.split('/').collect();
        if segments.is_empty() || !segments.iter().all(|s| valid_segment(s)) {
            tracing::warn!("Rejecting malformed store key {:?}", key);
            return None;
        }

        let mut path = self.root.clone();
        let (last, parents) = segments.split_last()?;
        for segment in parents {
            path.push(segment);
        }
        path.push(format!("{}.json", last));
        Some(path)
    }
}

/// A segment may contain letters, digits, `-`, `_`, `.`, and must not be
/// empty or a dot-only name that would escape the root
fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let path = self.path_for_key(key)?;
        if !path.exists() {
            return None;
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open {:?}: {}. Treating as absent.", path, e);
                return None;
            }
        };

        // Shared lock for reading; a failed lock degrades to absent
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock {:?}: {}. Treating as absent.", path, e);
            return None;
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        let _ = file.unlock();

        if let Err(e) = read {
            tracing::warn!("Failed to read {:?}: {}. Treating as absent.", path, e);
            return None;
        }

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse {:?}: {}. Treating as absent.", path, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: Value) {
        let Some(path) = self.path_for_key(key) else {
            return;
        };

        if let Err(e) = write_atomic(&path, &value) {
            tracing::warn!("Failed to write {:?}: {}. Value dropped.", path, e);
        } else {
            tracing::debug!("Stored {:?}", key);
        }
    }

    fn delete(&self, key: &str) {
        let Some(path) = self.path_for_key(key) else {
            return;
        };

        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!("Deleted {:?}", key),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to delete {:?}: {}", path, e),
        }
    }

    fn list_keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, "", &mut keys);
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        keys
    }
}

/// Write a JSON value atomically: temp file in the target directory,
/// exclusive lock, fsync, rename over the destination
fn write_atomic(path: &Path, value: &Value) -> crate::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
    })?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(value)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| crate::Error::Io(e.error))?;
    Ok(())
}

/// Recursively gather keys (relative slash-joined paths minus `.json`)
fn collect_keys(dir: &Path, key_prefix: &str, keys: &mut Vec<String>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if path.is_dir() {
            let child_prefix = if key_prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", key_prefix, name)
            };
            collect_keys(&path, &child_prefix, keys);
        } else if let Some(stem) = name.strip_suffix(".json") {
            if key_prefix.is_empty() {
                keys.push(stem.to_string());
            } else {
                keys.push(format!("{}/{}", key_prefix, stem));
            }
        }
    }
}
