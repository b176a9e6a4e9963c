use std::path::PathBuf;
use thiserror::Error;

use crate::keys::KeyError;
use crate::store::StoreError;

/// Failures that abort a run before (or instead of) per-item processing.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Credential file not found: {}", .0.display())]
    CredentialsMissing(PathBuf),
    #[error("Credential file {} is not valid: {source}", path.display())]
    CredentialsInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot read credential file {}: {source}", path.display())]
    CredentialsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Source folder does not exist: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("Source is not a folder: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    #[error("Cannot find the bucket requested {0}")]
    BucketMissing(String),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
