//! File-backed KeyValueStore implementation.
//!
//! One file per key under a base directory. Key strings are escaped into
//! filesystem-safe names, writes go through a temp file plus atomic rename,
//! and `keys()` is a directory scan — mirroring the flat, index-free shape
//! of the substrate contract.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::storage::{KeyValueStore, Result, StorageError};

/// File-backed implementation of [`KeyValueStore`].
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Open the store at the platform's per-user data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "memo").ok_or(StorageError::NoHomeDirectory)?;
        Self::new(dirs.data_dir().join("store"))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(escape_key(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && !name.ends_with(".tmp")
                && let Some(key) = unescape_key(name)
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Escape a key into a filesystem-safe file name.
///
/// Only `[A-Za-z0-9_-]` pass through; every other byte becomes `%XX`. `.` is
/// escaped too, so no real key can ever end in `.tmp` and collide with an
/// in-flight temp file.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for &byte in key.as_bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Inverse of [`escape_key`]; `None` for names this store did not produce.
fn unescape_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = std::str::from_utf8(bytes.get(i + 1..i + 3)?).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
