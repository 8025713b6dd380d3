use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{PeakError, Result};
use crate::store::config::StoreConfig;
use crate::utils::progress::ProgressReporter;
use crate::utils::sounding::detail_object_key;

/// One row of a container listing
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// Outcome of a bulk delete; per-item failures do not abort the batch
#[derive(Debug, Clone, Default)]
pub struct DeleteOutcome {
    pub dry_run: bool,
    pub matched: usize,
    pub deleted: usize,
    pub failed: usize,
}

impl DeleteOutcome {
    pub fn summary(&self) -> String {
        if self.dry_run {
            format!(
                "Dry run: {} object(s) matched, nothing deleted",
                self.matched
            )
        } else {
            format!(
                "Deleted {} of {} object(s), {} failed",
                self.deleted, self.matched, self.failed
            )
        }
    }
}

/// Object-store client: an immutable configuration capability plus a shared
/// HTTP client, passed by reference to each operation. One request at a
/// time, no retries.
pub struct ObjectStore {
    http: Client,
    config: StoreConfig,
}

impl ObjectStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Public URL of the per-sounding peak detail dataset
    pub fn detail_url(&self, sounding_id: &str) -> String {
        self.config.object_url(&detail_object_key(sounding_id))
    }

    /// Raw container listing filtered by key prefix
    pub async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectEntry>> {
        let endpoint = self.config.container_endpoint();
        let response = self
            .http
            .get(&endpoint)
            .query(&[("prefix", prefix), ("format", "json")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PeakError::StoreStatus {
                status: response.status().as_u16(),
                key: endpoint,
            });
        }

        let entries: Vec<ObjectEntry> = response.json().await?;
        debug!(prefix, count = entries.len(), "listed container objects");
        Ok(entries)
    }

    /// Object URLs under a prefix whose names contain `pattern`
    pub async fn list_urls(&self, prefix: &str, pattern: &str) -> Result<Vec<String>> {
        let entries = self.list_objects(prefix).await?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.name.contains(pattern))
            .map(|entry| self.config.object_url(&entry.name))
            .collect())
    }

    /// Fetch one object's raw tabular bytes
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(PeakError::StoreStatus {
                status: response.status().as_u16(),
                key: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Store one object under the given key
    pub async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        let url = self.key_url(key);
        let mut request = self
            .http
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(body);
        if let Some(token) = &self.config.swift_storage.auth_token {
            request = request.header("X-Auth-Token", token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(PeakError::StoreStatus {
                status: response.status().as_u16(),
                key: key.to_string(),
            });
        }

        Ok(())
    }

    /// Delete one object
    pub async fn delete(&self, key: &str) -> Result<()> {
        let url = self.key_url(key);
        let mut request = self.http.delete(&url);
        if let Some(token) = &self.config.swift_storage.auth_token {
            request = request.header("X-Auth-Token", token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(PeakError::StoreStatus {
                status: response.status().as_u16(),
                key: key.to_string(),
            });
        }

        Ok(())
    }

    /// Bulk delete by prefix and name pattern. Dry-run unless told
    /// otherwise; each item failure is logged and the batch continues.
    pub async fn delete_objects(
        &self,
        prefix: &str,
        pattern: &str,
        dry_run: bool,
        progress: Option<&ProgressReporter>,
    ) -> Result<DeleteOutcome> {
        let entries = self.list_objects(prefix).await?;
        let matching: Vec<ObjectEntry> = entries
            .into_iter()
            .filter(|entry| entry.name.contains(pattern))
            .collect();

        let mut outcome = DeleteOutcome {
            dry_run,
            matched: matching.len(),
            ..DeleteOutcome::default()
        };

        for entry in &matching {
            if !dry_run {
                match self.delete(&entry.name).await {
                    Ok(()) => outcome.deleted += 1,
                    Err(error) => {
                        warn!(key = %entry.name, %error, "error deleting object");
                        outcome.failed += 1;
                    }
                }
            }
            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        Ok(outcome)
    }

    /// Upload every `extension` file of a local directory under a key
    /// prefix. Local I/O and upload errors are fatal; only bulk deletes
    /// tolerate per-item failures.
    pub async fn upload_dir(
        &self,
        dir: &Path,
        extension: &str,
        prefix: &str,
        content_type: &str,
        progress: Option<&ProgressReporter>,
    ) -> Result<usize> {
        let mut paths: Vec<std::path::PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .collect();
        paths.sort();

        let mut uploaded = 0;
        for path in &paths {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    PeakError::InvalidFormat(format!("invalid file name: {}", path.display()))
                })?;

            let body = std::fs::read(path)?;
            let key = format!("{}{}", prefix, file_name);
            self.put(&key, body, content_type).await?;

            uploaded += 1;
            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        Ok(uploaded)
    }

    fn key_url(&self, key: &str) -> String {
        let endpoint = self.config.container_endpoint();
        if key.starts_with('/') {
            format!("{}{}", endpoint, key)
        } else {
            format!("{}/{}", endpoint, key)
        }
    }
}
