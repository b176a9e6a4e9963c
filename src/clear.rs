use indicatif::ProgressBar;
use log::{error, info, warn};

use crate::error::SyncError;
use crate::store::{ObjectStore, ensure_bucket};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClearSummary {
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Delete every object in `bucket`.
///
/// The full listing is taken before the first delete. Objects written after
/// that are not seen and survive the run.
pub async fn clear_bucket<S>(
    store: &S,
    bucket: &str,
    progress: &ProgressBar,
) -> Result<ClearSummary, SyncError>
where
    S: ObjectStore + ?Sized,
{
    ensure_bucket(store, bucket).await?;

    let objects = store.list_objects(bucket, true).await?;
    info!("Clearing {} objects from {}", objects.len(), bucket);
    progress.set_length(objects.len() as u64);

    let mut summary = ClearSummary::default();
    for object in objects {
        let Some(key) = object.key else {
            warn!("skip: listed object without a key");
            summary.skipped += 1;
            progress.inc(1);
            continue;
        };

        match store.delete_object(bucket, &key).await {
            Ok(()) => summary.deleted += 1,
            Err(e) => {
                error!("Failed to delete {} from {}: {}", key, bucket, e);
                summary.failed += 1;
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!(
        "Deleted {} objects from {}, skipped {}, failed {}",
        summary.deleted, bucket, summary.skipped, summary.failed
    );
    Ok(summary)
}
