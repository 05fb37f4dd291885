#![allow(dead_code)]

use aqi_archive_uploader::{ArchiveStorage, ArchiveUploader, StorageError, UploaderConfig};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub enum Listing {
    Keys(Vec<String>),
    Empty,
    Fail,
}

pub struct MockArchiveStorage {
    pub uploads: Mutex<Vec<(PathBuf, String, Vec<u8>)>>,
    pub fail_uploads: bool,
    pub listing: Listing,
}

impl MockArchiveStorage {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_uploads: false,
            listing: Listing::Keys(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::new()
        }
    }

    pub fn with_listing(listing: Listing) -> Self {
        Self {
            listing,
            ..Self::new()
        }
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(_, key, _)| key.clone())
            .collect()
    }
}

#[async_trait]
impl ArchiveStorage for MockArchiveStorage {
    async fn upload_file(&self, local_path: &Path, key: &str) -> anyhow::Result<()> {
        if self.fail_uploads {
            return Err(anyhow::anyhow!("AccessDenied"));
        }
        let data = tokio::fs::read(local_path).await?;
        self.uploads
            .lock()
            .unwrap()
            .push((local_path.to_path_buf(), key.to_string(), data));
        Ok(())
    }

    async fn list_keys(&self) -> anyhow::Result<Vec<String>> {
        match &self.listing {
            Listing::Keys(keys) => Ok(keys.clone()),
            Listing::Empty => Err(StorageError::EmptyListing.into()),
            Listing::Fail => Err(anyhow::anyhow!("connection refused")),
        }
    }
}

/// Counts WARN events seen by the subscriber it is attached to.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("aqi_archive_uploader=debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

pub fn uploader_for(cache_dir: &Path, storage: Arc<MockArchiveStorage>) -> ArchiveUploader {
    let config = UploaderConfig {
        cache_dir: cache_dir.to_path_buf(),
        ..UploaderConfig::default()
    };
    ArchiveUploader::new(&config, storage)
}

pub fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), name.as_bytes()).unwrap();
}

pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
