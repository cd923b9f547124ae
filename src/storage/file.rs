use std::{collections::BTreeMap, io, path::PathBuf, sync::Mutex};
use tracing::debug;

use super::KeyValueStore;
use crate::{anyhow, Context, ErrorKind, Result};

/// A store persisted as a single JSON object on disk. The whole file is
/// rewritten on every mutation.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}
impl FileStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(
                |err| anyhow!(@StorageError ("path" => path.display()) "cannot parse store: {err}"),
            )?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(anyhow!(@StorageError ("path" => path.display()) "cannot read store: {err}"))
            }
        };
        debug!(path = %path.display(), entries = entries.len(), "opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Applies `f` to a copy of the entries and swaps it in once the file is
    /// written, so a failed write leaves the store unchanged.
    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!(@StorageError "file store poisoned"))?;
        let mut next = entries.clone();
        f(&mut next);
        self.write(&next)?;
        *entries = next;
        Ok(())
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        if let Some(parent) = self.path.parent().filter(|it| !it.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .kind(ErrorKind::StorageError)
                .with_context(|| format!("cannot create directory: {}", parent.display()))?;
        }
        std::fs::write(&self.path, raw)
            .kind(ErrorKind::StorageError)
            .with_context(|| format!("cannot write to file: {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!(@StorageError "file store poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }
}
