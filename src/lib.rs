pub mod config;
pub mod error;
pub mod infrastructure;
pub mod services;
pub mod utils;

pub use crate::config::UploaderConfig;
pub use crate::error::{StorageError, UploaderError};
pub use crate::services::storage::{ArchiveStorage, S3ArchiveStorage};
pub use crate::services::uploader::{ArchiveUploader, PruneReport};
