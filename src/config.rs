use serde::Deserialize;
use std::path::Path;

use crate::{Context, Result};

fn default_api_base() -> String {
    "https://maternitycare.azurewebsites.net/api/".to_owned()
}

fn default_public_blogs_url() -> String {
    "https://maternitycare.azurewebsites.net/swagger/api/blogs".to_owned()
}

fn default_image() -> String {
    "/assets/default-blog.jpg".to_owned()
}

fn default_storage() -> String {
    "file@storage.json".to_owned()
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL every relative endpoint is resolved against.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Full URL of the community board listing.
    #[serde(default = "default_public_blogs_url")]
    pub public_blogs_url: String,

    #[serde(default = "default_image")]
    pub default_image: String,

    #[serde(default = "default_storage")]
    pub storage: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            public_blogs_url: default_public_blogs_url(),
            default_image: default_image(),
            storage: default_storage(),
        }
    }
}

impl Config {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot open config: {}", path.display()))?;
        Self::from_yaml(&raw)
    }
}
