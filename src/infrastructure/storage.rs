use crate::config::UploaderConfig;
use crate::services::storage::S3ArchiveStorage;
use aws_sdk_s3::config::{Credentials, Region};
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &UploaderConfig) -> Arc<S3ArchiveStorage> {
    // Missing credentials are sent as empty strings and rejected by the service
    let access_key = config.access_key_id.clone().unwrap_or_default();
    let secret_key = config.secret_access_key.clone().unwrap_or_default();

    info!(
        "☁️  S3 Storage: {} (Bucket: {})",
        config.endpoint_url.as_deref().unwrap_or("<default endpoint>"),
        config.bucket_name
    );

    let mut loader = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .credentials_provider(Credentials::new(
            access_key, secret_key, None, None, "static",
        ));
    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    let aws_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);
    Arc::new(S3ArchiveStorage::new(
        s3_client,
        config.bucket_name.clone(),
    ))
}
