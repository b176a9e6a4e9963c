//! Folder upload: every file under a local folder ends up in the bucket,
//! files that are already there are left alone.

use indicatif::ProgressBar;
use log::{error, info, warn};
use std::path::Path;
use walkdir::WalkDir;

use crate::error::SyncError;
use crate::keys;
use crate::store::{ObjectStore, Lookup, ensure_bucket};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl UploadSummary {
    pub fn processed(&self) -> usize {
        self.uploaded + self.skipped + self.failed
    }
}

enum FileOutcome {
    Uploaded,
    Skipped,
    Failed,
}

/// Upload `source` into `bucket`, one file at a time.
///
/// A missing source folder or bucket fails the whole run before any file is
/// touched. Anything that goes wrong for a single file is logged and the
/// walk moves on to the next one.
pub async fn upload_folder<S>(
    store: &S,
    bucket: &str,
    source: &Path,
    progress: &ProgressBar,
) -> Result<UploadSummary, SyncError>
where
    S: ObjectStore + ?Sized,
{
    if !source.exists() {
        return Err(SyncError::SourceMissing(source.to_path_buf()));
    }
    if !source.is_dir() {
        return Err(SyncError::SourceNotDirectory(source.to_path_buf()));
    }
    let prefix = keys::folder_prefix(source)?;

    ensure_bucket(store, bucket).await?;

    let mut summary = UploadSummary::default();
    for entry in WalkDir::new(source) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read entry under {}: {}", source.display(), e);
                summary.failed += 1;
                progress.inc(1);
                continue;
            }
        };
        // Links to files are uploaded with the target's content, links to
        // folders are not descended into.
        if !entry.file_type().is_file() {
            if !entry.path_is_symlink() || entry.path().is_dir() {
                continue;
            }
            if !entry.path().is_file() {
                warn!("Broken link {}, not uploaded", entry.path().display());
                summary.failed += 1;
                progress.inc(1);
                continue;
            }
        }

        match upload_file(store, bucket, source, &prefix, entry.path()).await {
            FileOutcome::Uploaded => summary.uploaded += 1,
            FileOutcome::Skipped => summary.skipped += 1,
            FileOutcome::Failed => summary.failed += 1,
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!(
        "Uploaded {} files to {}, skipped {}, failed {}",
        summary.uploaded, bucket, summary.skipped, summary.failed
    );
    Ok(summary)
}

async fn upload_file<S>(
    store: &S,
    bucket: &str,
    source: &Path,
    prefix: &str,
    file: &Path,
) -> FileOutcome
where
    S: ObjectStore + ?Sized,
{
    let key = match keys::remote_key(prefix, source, file) {
        Ok(key) => key,
        Err(e) => {
            error!("Cannot map {} to an object key: {}", file.display(), e);
            return FileOutcome::Failed;
        }
    };
    info!("Uploading {} to {}...", file.display(), key);

    match store.stat_object(bucket, &key).await {
        Lookup::Present => {
            info!(
                "File {} already exists in bucket {}. Skipping...",
                key, bucket
            );
            FileOutcome::Skipped
        }
        Lookup::Absent => match store.put_object(bucket, &key, file).await {
            Ok(()) => {
                info!(
                    "{} successfully uploaded as object {} to bucket {}",
                    file.display(),
                    key,
                    bucket
                );
                FileOutcome::Uploaded
            }
            Err(e) => {
                error!("Failed to upload {} as {}: {}", file.display(), key, e);
                FileOutcome::Failed
            }
        },
        Lookup::Failed(e) => {
            error!("Cannot check {} for {}: {}", key, file.display(), e);
            FileOutcome::Failed
        }
    }
}
