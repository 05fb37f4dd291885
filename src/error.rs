use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploaderError {
    #[error("Upload of {filename} failed: {source:#}")]
    Upload {
        filename: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Listing failed: {0:#}")]
    Listing(anyhow::Error),

    #[error("Bucket {bucket} has no listable objects")]
    EmptyBucket { bucket: String },
}

/// Errors raised by storage backends themselves, carried inside `anyhow::Error`.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Listing response contained no objects")]
    EmptyListing,
}
