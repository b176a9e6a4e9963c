use async_trait::async_trait;
use log::{debug, warn};
use quick_xml::de::from_str;
use reqwest::{Client as ReqwestClient, StatusCode};
use rusty_s3::{Bucket, Credentials, S3Action, UrlStyle};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::credentials;
use crate::endpoint::Endpoint;
use crate::store::{ObjectInfo, ObjectStore, Lookup, StoreError};

const REGION: &str = "us-east-1";
const PRESIGN_TTL: Duration = Duration::from_secs(3600);
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// ListObjectsV2 response body
#[derive(Debug, Deserialize)]
struct ListBucketResult {
    #[serde(rename = "Contents", default)]
    contents: Vec<S3Object>,
    #[serde(rename = "IsTruncated", default)]
    is_truncated: bool,
    #[serde(rename = "NextContinuationToken")]
    next_continuation_token: Option<String>,
    #[serde(rename = "EncodingType")]
    encoding_type: Option<String>,
}

impl ListBucketResult {
    fn into_objects(self) -> impl Iterator<Item = ObjectInfo> {
        let url_encoded = self.encoding_type.as_deref() == Some("url");
        self.contents.into_iter().map(move |obj| ObjectInfo {
            key: obj
                .key
                .map(|k| if url_encoded { decode_key(&k) } else { k })
                .filter(|k| !k.is_empty()),
            size: obj.size,
        })
    }
}

// Keys come back form-encoded when the request asked for encoding-type=url.
fn decode_key(key: &str) -> String {
    url::form_urlencoded::parse(key.as_bytes())
        .map(|(name, _)| name.into_owned())
        .next()
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct S3Object {
    #[serde(rename = "Key")]
    key: Option<String>,
    #[serde(rename = "Size")]
    size: Option<u64>,
}

/// [`ObjectStore`] backed by presigned rusty-s3 requests sent with reqwest.
pub struct S3Store {
    base_url: Url,
    client: ReqwestClient,
    credentials: Option<Credentials>,
}

impl S3Store {
    pub fn new(base_url: Url, creds: &credentials::Credentials) -> Result<Self, StoreError> {
        let credentials = if !creds.access_key.is_empty() && !creds.secret_key.is_empty() {
            Some(Credentials::new(
                creds.access_key.clone(),
                creds.secret_key.clone(),
            ))
        } else {
            None
        };

        let client = ReqwestClient::builder().timeout(HTTP_TIMEOUT).build()?;

        Ok(Self {
            base_url,
            client,
            credentials,
        })
    }

    /// Store for one of the known servers, always over https.
    pub fn for_endpoint(
        endpoint: Endpoint,
        creds: &credentials::Credentials,
    ) -> Result<Self, StoreError> {
        Self::new(endpoint.url()?, creds)
    }

    fn bucket(&self, name: &str) -> Result<Bucket, StoreError> {
        let bucket = Bucket::new(
            self.base_url.clone(),
            UrlStyle::Path,
            name.to_string(),
            REGION.to_string(),
        )?;
        Ok(bucket)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        let bucket = self.bucket(bucket)?;
        let url = bucket
            .head_bucket(self.credentials.as_ref())
            .sign(PRESIGN_TTL);

        let response = self.client.head(url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(StoreError::Status {
                operation: "HeadBucket",
                status,
            }),
        }
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> Lookup {
        let bucket = match self.bucket(bucket) {
            Ok(bucket) => bucket,
            Err(e) => return Lookup::Failed(e),
        };
        let url = bucket
            .head_object(self.credentials.as_ref(), key)
            .sign(PRESIGN_TTL);

        let response = match self.client.head(url).send().await {
            Ok(resp) => resp,
            Err(e) => return Lookup::Failed(e.into()),
        };

        match response.status() {
            status if status.is_success() => Lookup::Present,
            StatusCode::NOT_FOUND => Lookup::Absent,
            status => Lookup::Failed(StoreError::Status {
                operation: "HeadObject",
                status,
            }),
        }
    }

    async fn put_object(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StoreError> {
        let content = tokio::fs::read(path).await?;
        debug!("PUT {} ({} bytes)", key, content.len());

        let bucket = self.bucket(bucket)?;
        let url = bucket
            .put_object(self.credentials.as_ref(), key)
            .sign(PRESIGN_TTL);

        let response = self
            .client
            .put(url)
            .header("Content-Type", "application/octet-stream")
            .body(content)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status {
                operation: "PutObject",
                status: response.status(),
            });
        }

        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        recursive: bool,
    ) -> Result<Vec<ObjectInfo>, StoreError> {
        let bucket = self.bucket(bucket)?;
        let mut objects = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let mut action = bucket.list_objects_v2(self.credentials.as_ref());
            if !recursive {
                action.with_delimiter("/");
            }
            if let Some(token) = token.clone() {
                action.with_continuation_token(token);
            }
            let url = action.sign(PRESIGN_TTL);

            let response = self.client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(StoreError::Status {
                    operation: "ListObjectsV2",
                    status: response.status(),
                });
            }
            let content = response.text().await?;
            let page: ListBucketResult = from_str(&content)?;
            debug!(
                "Listed {} objects (truncated: {})",
                page.contents.len(),
                page.is_truncated
            );

            let next = page
                .next_continuation_token
                .clone()
                .filter(|_| page.is_truncated);
            objects.extend(page.into_objects());

            match next {
                Some(next) if token.as_deref() == Some(next.as_str()) => {
                    warn!("Listing returned continuation token {} twice, stopping", next);
                    break;
                }
                Some(next) => token = Some(next),
                None => break,
            }
        }

        Ok(objects)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        let bucket = self.bucket(bucket)?;
        let url = bucket
            .delete_object(self.credentials.as_ref(), key)
            .sign(PRESIGN_TTL);

        let response = self.client.delete(url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                operation: "DeleteObject",
                status: response.status(),
            });
        }

        Ok(())
    }
}
