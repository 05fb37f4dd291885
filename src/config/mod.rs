use std::env;
use std::fmt;
use std::path::PathBuf;

pub const ACCESS_KEY_ID_VAR: &str = "HOPE_CSC_S3_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "HOPE_CSC_S3_SECRET_ACCESS_KEY";
pub const ENDPOINT_VAR: &str = "HOPE_CSC_S3_ADDRESS";

/// Configuration for the archive uploader
#[derive(Clone)]
pub struct UploaderConfig {
    /// Directory where AQI archives are staged locally (default: "aqi_cache/")
    pub cache_dir: PathBuf,

    /// Remote archive bucket (default: "hope-enfuser-archive")
    pub bucket_name: String,

    /// Region passed to the S3 client (default: "US")
    pub region: String,

    /// S3 access key id, read from HOPE_CSC_S3_ACCESS_KEY_ID
    pub access_key_id: Option<String>,

    /// S3 secret access key, read from HOPE_CSC_S3_SECRET_ACCESS_KEY
    pub secret_access_key: Option<String>,

    /// S3 endpoint URL, read from HOPE_CSC_S3_ADDRESS
    pub endpoint_url: Option<String>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("aqi_cache/"),
            bucket_name: "hope-enfuser-archive".to_string(),
            region: "US".to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint_url: None,
        }
    }
}

impl UploaderConfig {
    /// Load configuration from environment variables
    ///
    /// Credentials and endpoint are not validated here. A missing value only
    /// shows up once the storage client is actually called.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        Self {
            cache_dir: lookup("AQI_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.cache_dir),

            bucket_name: lookup("AQI_BUCKET_NAME").unwrap_or(default.bucket_name),

            region: lookup("AQI_S3_REGION").unwrap_or(default.region),

            access_key_id: lookup(ACCESS_KEY_ID_VAR),
            secret_access_key: lookup(SECRET_ACCESS_KEY_VAR),
            endpoint_url: lookup(ENDPOINT_VAR),
        }
    }
}

impl fmt::Debug for UploaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploaderConfig")
            .field("cache_dir", &self.cache_dir)
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}
