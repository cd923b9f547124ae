mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use std::{path::PathBuf, sync::Arc};

use crate::{bail, Result};

pub const REMINDERS_KEY: &str = "reminders";
pub const REMINDER_KEY: &str = "reminder";
pub const USER_ID_KEY: &str = "userId";
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Browser-style local storage: string keys to string values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl dyn KeyValueStore + '_ {
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, &serde_json::to_string(value)?)
    }
}

pub fn parse_spec(spec: &str) -> Result<Arc<dyn KeyValueStore>> {
    let Some((scheme, arg)) = spec.split_once('@') else {
        bail!(@InvalidArgument "missing scheme in storage spec")
    };
    match scheme {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "file" => {
            if arg.is_empty() {
                bail!(@InvalidArgument "missing path in storage spec");
            }
            Ok(Arc::new(FileStore::open(PathBuf::from(arg))?))
        }
        _ => bail!(@InvalidArgument "unknown storage scheme: {scheme}"),
    }
}
