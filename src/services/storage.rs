use crate::error::StorageError;
use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;

/// The two object-storage capabilities the uploader relies on.
#[async_trait]
pub trait ArchiveStorage: Send + Sync {
    /// Upload the local file at `local_path` under `key`.
    async fn upload_file(&self, local_path: &Path, key: &str) -> Result<()>;
    /// All keys in the bucket, in the order the service returns them.
    async fn list_keys(&self) -> Result<Vec<String>>;
}

pub struct S3ArchiveStorage {
    client: Client,
    bucket: String,
}

impl S3ArchiveStorage {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ArchiveStorage for S3ArchiveStorage {
    async fn upload_file(&self, local_path: &Path, key: &str) -> Result<()> {
        let body = ByteStream::from_path(local_path).await?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await?;
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token = None;
        let mut first_page = true;

        loop {
            let res = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_continuation_token(continuation_token)
                .send()
                .await?;

            match res.contents {
                Some(contents) => {
                    for object in contents {
                        if let Some(key) = object.key {
                            keys.push(key);
                        }
                    }
                }
                None if first_page => return Err(StorageError::EmptyListing.into()),
                None => {}
            }
            first_page = false;

            if res.is_truncated.unwrap_or(false) {
                continuation_token = res.next_continuation_token;
            } else {
                break;
            }
        }

        Ok(keys)
    }
}
