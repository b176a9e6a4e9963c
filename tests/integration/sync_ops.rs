use super::test_helpers::*;
use bucketsync::SyncError;
use bucketsync::clear::clear_bucket;
use bucketsync::upload::upload_folder;
use indicatif::ProgressBar;
use std::fs;

#[tokio::test]
async fn test_second_upload_is_a_no_op() {
    let env = test_setup!();
    let source = env.folder(
        "scans",
        &[
            ("a.txt", "alpha"),
            ("run-1/b.txt", "bravo"),
            ("run-1/deep/c.txt", "charlie"),
        ],
    );
    let store = MemoryStore::with_bucket(&env.bucket);

    let first = upload_folder(&store, &env.bucket, &source, &ProgressBar::hidden())
        .await
        .expect("first upload failed");
    assert_eq!(first.uploaded, 3);
    let after_first = store.keys(&env.bucket);
    assert_eq!(
        after_first,
        vec!["scans/a.txt", "scans/run-1/b.txt", "scans/run-1/deep/c.txt"]
    );

    store.reset_calls();
    let second = upload_folder(&store, &env.bucket, &source, &ProgressBar::hidden())
        .await
        .expect("second upload failed");
    assert_eq!(second.uploaded, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(store.calls().puts, 0);
    assert_eq!(store.keys(&env.bucket), after_first);
}

#[tokio::test]
async fn test_existing_object_keeps_its_content() {
    let env = test_setup!();
    let source = env.folder("scans", &[("a.txt", "local version")]);
    let store = MemoryStore::with_bucket(&env.bucket);
    store.insert(&env.bucket, "scans/a.txt", b"remote version");

    let summary = upload_folder(&store, &env.bucket, &source, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(store.calls().puts, 0);
    assert_eq!(
        store.content(&env.bucket, "scans/a.txt").as_deref(),
        Some(&b"remote version"[..])
    );
}

#[tokio::test]
async fn test_uploaded_content_matches_local_files() {
    let env = test_setup!();
    let source = env.folder("dataset", &[("nested/frame.bin", "0123456789")]);
    let store = MemoryStore::with_bucket(&env.bucket);

    upload_folder(&store, &env.bucket, &source, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(
        store.content(&env.bucket, "dataset/nested/frame.bin").as_deref(),
        Some(&b"0123456789"[..])
    );
}

#[tokio::test]
async fn test_faulty_file_does_not_block_the_rest() {
    let env = test_setup!();
    let source = env.folder(
        "scans",
        &[("1.txt", "one"), ("2.txt", "two"), ("3.txt", "three"), ("4.txt", "four")],
    );
    let store = MemoryStore::with_bucket(&env.bucket);
    store.fail_on("scans/2.txt");

    let summary = upload_folder(&store, &env.bucket, &source, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.uploaded, 3);
    assert_eq!(store.calls().stats, 4);
    assert_eq!(
        store.keys(&env.bucket),
        vec!["scans/1.txt", "scans/3.txt", "scans/4.txt"]
    );
}

#[tokio::test]
async fn test_missing_source_touches_nothing() {
    let env = test_setup!();
    let store = MemoryStore::with_bucket(&env.bucket);

    let err = upload_folder(
        &store,
        &env.bucket,
        &env.workspace.join("does-not-exist"),
        &ProgressBar::hidden(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, SyncError::SourceMissing(_)));
    assert_eq!(store.calls(), CallCounts::default());
}

#[tokio::test]
async fn test_missing_bucket_touches_nothing() {
    let env = test_setup!();
    let source = env.folder("scans", &[("a.txt", "alpha")]);
    let store = MemoryStore::default();

    let err = upload_folder(&store, "absent", &source, &ProgressBar::hidden())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::BucketMissing(_)));

    let err = clear_bucket(&store, "absent", &ProgressBar::hidden())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::BucketMissing(_)));
    assert_eq!(store.calls(), CallCounts::default());
}

#[tokio::test]
async fn test_clear_empties_bucket_and_repeats_cleanly() {
    let env = test_setup!();
    let store = MemoryStore::with_bucket(&env.bucket);
    store.insert(&env.bucket, "top.txt", b"1");
    store.insert(&env.bucket, "scans/a.txt", b"2");
    store.insert(&env.bucket, "scans/run-1/deep/b.txt", b"3");
    store.insert("other-bucket", "keep.txt", b"4");

    let summary = clear_bucket(&store, &env.bucket, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(summary.deleted, 3);
    assert!(store.keys(&env.bucket).is_empty());
    assert_eq!(store.keys("other-bucket"), vec!["keep.txt"]);

    store.reset_calls();
    let again = clear_bucket(&store, &env.bucket, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(again.deleted, 0);
    assert_eq!(again.failed, 0);
    assert_eq!(store.calls().lists, 1);
    assert_eq!(store.calls().deletes, 0);
}

#[tokio::test]
async fn test_upload_then_clear() {
    let env = test_setup!();
    let source = env.folder("scans", &[("a.txt", "alpha"), ("b/c.txt", "charlie")]);
    fs::create_dir_all(source.join("empty-dir")).unwrap();
    let store = MemoryStore::with_bucket(&env.bucket);

    let uploaded = upload_folder(&store, &env.bucket, &source, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(uploaded.processed(), 2);

    let cleared = clear_bucket(&store, &env.bucket, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(cleared.deleted, 2);
    assert!(store.keys(&env.bucket).is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_linked_file_is_uploaded_with_target_content() {
    let env = test_setup!();
    let source = env.folder("scans", &[("a.txt", "alpha")]);
    let elsewhere = env.folder("elsewhere", &[("real.bin", "linked content")]);
    std::os::unix::fs::symlink(elsewhere.join("real.bin"), source.join("link.bin")).unwrap();
    let store = MemoryStore::with_bucket(&env.bucket);

    let summary = upload_folder(&store, &env.bucket, &source, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(summary.uploaded, 2);
    assert_eq!(store.keys(&env.bucket), vec!["scans/a.txt", "scans/link.bin"]);
    assert_eq!(
        store.content(&env.bucket, "scans/link.bin").as_deref(),
        Some(&b"linked content"[..])
    );
}
