use crate::config::UploaderConfig;
use crate::error::{StorageError, UploaderError};
use crate::services::storage::ArchiveStorage;
use crate::utils::naming::{is_archive_file_name, is_remote_archive_key};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a cache sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}

impl PruneReport {
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}

/// Uploads AQI archives from the local cache directory and keeps the cache
/// trimmed down to the most recent upload.
///
/// `upload` takes `&mut self`, so one instance cannot be uploading and
/// pruning at the same time.
pub struct ArchiveUploader {
    cache_dir: PathBuf,
    bucket_name: String,
    storage: Arc<dyn ArchiveStorage>,
    latest_upload: Option<String>,
}

impl ArchiveUploader {
    pub fn new(config: &UploaderConfig, storage: Arc<dyn ArchiveStorage>) -> Self {
        Self {
            cache_dir: config.cache_dir.clone(),
            bucket_name: config.bucket_name.clone(),
            storage,
            latest_upload: None,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Name of the last archive uploaded successfully by this instance.
    pub fn latest_upload(&self) -> Option<&str> {
        self.latest_upload.as_deref()
    }

    /// Upload `cache_dir/filename` to the bucket under the key `filename`.
    ///
    /// Storage errors are returned as-is; the latest upload is only recorded
    /// once the storage call has succeeded.
    pub async fn upload(&mut self, filename: &str) -> Result<(), UploaderError> {
        info!("uploading {} to {}...", filename, self.bucket_name);

        let local_path = self.cache_dir.join(filename);
        self.storage
            .upload_file(&local_path, filename)
            .await
            .map_err(|source| UploaderError::Upload {
                filename: filename.to_string(),
                source,
            })?;

        self.latest_upload = Some(filename.to_string());
        info!("upload done");
        Ok(())
    }

    /// Delete every cached archive except the latest upload.
    ///
    /// With no upload recorded yet, every `.zip` in the cache directory is
    /// removed, including archives that were never uploaded.
    pub async fn prune_cache(&self) -> PruneReport {
        let mut report = PruneReport::default();

        let mut entries = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "could not read cache directory {}: {}",
                    self.cache_dir.display(),
                    e
                );
                return report;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("stopped reading cache directory early: {}", e);
                    break;
                }
            };

            let file_name = entry.file_name();
            if !is_archive_file_name(&file_name)
                || self.latest_upload.as_deref().map(OsStr::new) == Some(file_name.as_os_str())
            {
                continue;
            }
            let name = file_name.to_string_lossy().into_owned();

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => report.removed.push(name),
                Err(e) => {
                    debug!("could not remove {}: {}", name, e);
                    report.failed.push(name);
                }
            }
        }

        debug!("removed {} cached files", report.removed.len());
        if report.failure_count() > 0 {
            warn!("could not remove {} cached files", report.failure_count());
        }

        report
    }

    /// Upload `filename` and, only if that worked, prune the cache.
    pub async fn upload_and_prune(
        &mut self,
        filename: &str,
    ) -> Result<PruneReport, UploaderError> {
        self.upload(filename).await?;
        Ok(self.prune_cache().await)
    }

    /// Remote archive names, telling a failed listing apart from an empty bucket.
    pub async fn try_list_remote_archives(&self) -> Result<Vec<String>, UploaderError> {
        let keys = self.storage.list_keys().await.map_err(|e| {
            if matches!(e.downcast_ref::<StorageError>(), Some(StorageError::EmptyListing)) {
                UploaderError::EmptyBucket {
                    bucket: self.bucket_name.clone(),
                }
            } else {
                UploaderError::Listing(e)
            }
        })?;

        Ok(keys
            .into_iter()
            .filter(|key| is_remote_archive_key(key))
            .collect())
    }

    /// Remote archive names in listing order.
    ///
    /// Never fails: a listing error and an empty bucket both come back as an
    /// empty list plus a warning.
    pub async fn list_remote_archives(&self) -> Vec<String> {
        match self.try_list_remote_archives().await {
            Ok(archives) => archives,
            Err(e) => {
                debug!("{}", e);
                warn!("could not retrieve list of objects, possibly empty bucket");
                Vec::new()
            }
        }
    }
}
