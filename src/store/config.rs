use serde::Deserialize;
use std::path::Path;

use crate::error::Result;
use crate::utils::constants::DEFAULT_CONTAINER;

/// Object-store settings, loaded once from an external configuration file
/// and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub swift_storage: SwiftStorage,
}

/// The `swift_storage` section of the configuration file.
///
/// `base_url` is the public read endpoint objects are served from.
/// `storage_url` is the API endpoint for listing and write operations; when
/// absent, `base_url` is assumed to address the container directly. The
/// remaining auth parameters mirror the deployment's config schema and are
/// passed through as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct SwiftStorage {
    pub base_url: String,

    #[serde(default)]
    pub storage_url: Option<String>,

    #[serde(default)]
    pub auth_url: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub tenant_name: Option<String>,

    #[serde(default)]
    pub auth_version: Option<String>,

    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_container")]
    pub container: String,
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

impl StoreConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Endpoint addressing the container for listing and write operations
    pub fn container_endpoint(&self) -> String {
        match &self.swift_storage.storage_url {
            Some(storage_url) => format!(
                "{}/{}",
                storage_url.trim_end_matches('/'),
                self.swift_storage.container
            ),
            None => self.swift_storage.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Public URL of one object; keys carry their leading slash
    pub fn object_url(&self, name: &str) -> String {
        if name.starts_with('/') {
            format!("{}{}", self.swift_storage.base_url.trim_end_matches('/'), name)
        } else {
            format!("{}/{}", self.swift_storage.base_url.trim_end_matches('/'), name)
        }
    }
}
