//! The object store capability both commands run against.

use async_trait::async_trait;
use log::debug;
use std::path::Path;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::error::SyncError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{operation} returned {status}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("Invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid bucket: {0}")]
    Bucket(#[from] rusty_s3::BucketError),
    #[error("Cannot parse listing: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcome of an existence check on a single object.
#[derive(Debug)]
pub enum Lookup {
    Present,
    Absent,
    Failed(StoreError),
}

/// One entry of a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: Option<String>,
    pub size: Option<u64>,
}

impl ObjectInfo {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            size: None,
        }
    }
}

/// Authenticated handle to an S3 compatible server.
///
/// Implemented by [`crate::s3::S3Store`] and by in-memory stores in tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError>;

    /// `Absent` is the normal answer for a key that was never written; only
    /// other failures come back as `Failed`.
    async fn stat_object(&self, bucket: &str, key: &str) -> Lookup;

    /// Upload the whole content of `path` to `key`.
    async fn put_object(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StoreError>;

    async fn list_objects(&self, bucket: &str, recursive: bool)
    -> Result<Vec<ObjectInfo>, StoreError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError>;
}

/// Fails with [`SyncError::BucketMissing`] unless `bucket` exists.
pub async fn ensure_bucket<S>(store: &S, bucket: &str) -> Result<(), SyncError>
where
    S: ObjectStore + ?Sized,
{
    if store.bucket_exists(bucket).await? {
        debug!("Bucket {} found", bucket);
        Ok(())
    } else {
        Err(SyncError::BucketMissing(bucket.to_string()))
    }
}
