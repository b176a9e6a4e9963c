use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::SyncError;

/// Access key pair read from a credential file such as `credential.json`:
///
/// ```json
/// { "accessKey": "...", "secretKey": "..." }
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.is_file() {
            return Err(SyncError::CredentialsMissing(path.to_path_buf()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|source| SyncError::CredentialsUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| SyncError::CredentialsInvalid {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
