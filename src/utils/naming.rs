use std::ffi::OsStr;

/// File extension of every AQI archive, local or remote.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Prefix shared by all archive keys in the remote bucket.
pub const REMOTE_ARCHIVE_PREFIX: &str = "allPollutants";

/// True for names the cache sweep treats as archives.
pub fn is_archive_name(name: &str) -> bool {
    name.ends_with(ARCHIVE_EXTENSION)
}

/// Same as [`is_archive_name`] for directory entries, which need not be UTF-8.
pub fn is_archive_file_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(ARCHIVE_EXTENSION.as_bytes())
}

/// True for bucket keys following the remote archive naming convention.
pub fn is_remote_archive_key(key: &str) -> bool {
    key.starts_with(REMOTE_ARCHIVE_PREFIX) && is_archive_name(key)
}
