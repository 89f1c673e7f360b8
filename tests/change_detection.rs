use std::error::Error;
use std::fs;
use std::time::UNIX_EPOCH;

use freshcache::fingerprint;
use freshcache::store::CacheEntry;
use freshcache::track::{CacheWriter, ChangeDetector, GRACE_PERIOD_MS, entry_changed};
use freshcache_test_utils::builders::TempProject;
use freshcache_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn entry(date_updated: i64, content: &str) -> CacheEntry {
    CacheEntry {
        date_updated,
        hash: fingerprint(content),
    }
}

fn mtime_ms(path: &std::path::Path) -> i64 {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .expect("reading mtime")
        .duration_since(UNIX_EPOCH)
        .expect("mtime before epoch")
        .as_millis() as i64
}

// --- Pure policy -----------------------------------------------------------

#[test]
fn differing_hash_is_always_a_change() {
    // Content "x" committed at t=1000, then "y" observed at t=1100.
    let stored = entry(1000, "x");
    let current = entry(1100, "y");
    assert!(entry_changed(&current, &stored));
}

#[test]
fn matching_hash_beyond_grace_period_is_still_a_change() {
    // Content reverts to exactly "x", but observed 121s after the record was
    // committed. The weak hash is no longer trusted: this must report changed
    // even though content may be byte-identical. Intended behaviour.
    let stored = entry(1_000_000, "x");
    let current = entry(1_121_000, "x");
    assert!(current.date_updated - stored.date_updated > GRACE_PERIOD_MS);
    assert!(entry_changed(&current, &stored));
}

#[test]
fn matching_hash_within_grace_period_is_unchanged() {
    let stored = entry(1_000_000, "x");
    let current = entry(1_050_000, "x");
    assert!(current.date_updated - stored.date_updated <= GRACE_PERIOD_MS);
    assert!(!entry_changed(&current, &stored));
}

#[test]
fn grace_period_boundary_is_exclusive() {
    let stored = entry(1_000_000, "x");
    let at_boundary = entry(1_000_000 + GRACE_PERIOD_MS, "x");
    let past_boundary = entry(1_000_000 + GRACE_PERIOD_MS + 1, "x");
    assert!(!entry_changed(&at_boundary, &stored));
    assert!(entry_changed(&past_boundary, &stored));
}

#[test]
fn never_observed_nonempty_content_is_a_change() {
    let stored = CacheEntry::default();
    let current = entry(1000, "x");
    assert!(entry_changed(&current, &stored));
}

// --- Against real files ----------------------------------------------------

#[tokio::test]
async fn never_observed_file_reports_changed() -> TestResult {
    init_tracing();

    let project = TempProject::new();
    let file = project.write_file("src/lib.rs", "pub fn lib() {}");
    let store = project.store();

    let detector = ChangeDetector::new(store.clone());
    let info = detector.check(&file).await?;

    assert!(info.changed);
    assert_eq!(info.data, "pub fn lib() {}");
    assert_eq!(info.path, file);
    assert_eq!(info.date_updated, mtime_ms(&file));

    // Detection is read-only: nothing was committed or written.
    assert_eq!(store.stats().documents_written, 0);
    assert_eq!(store.read_entry(&file).await?, CacheEntry::default());

    Ok(())
}

#[tokio::test]
async fn record_then_check_reports_unchanged() -> TestResult {
    init_tracing();

    let project = TempProject::new();
    let file = project.write_file("src/lib.rs", "pub fn lib() {}");
    let store = project.store();

    let writer = CacheWriter::new(store.clone());
    let committed = writer.record(&file).await?;
    assert_eq!(committed.hash, fingerprint("pub fn lib() {}"));
    assert_eq!(committed.date_updated, mtime_ms(&file));

    let detector = ChangeDetector::new(store);
    let info = detector.check(&file).await?;
    assert!(!info.changed);

    Ok(())
}

#[tokio::test]
async fn content_change_reports_changed() -> TestResult {
    init_tracing();

    let project = TempProject::new();
    let file = project.write_file("src/lib.rs", "one");
    let store = project.store();

    CacheWriter::new(store.clone()).record(&file).await?;
    fs::write(&file, "two")?;

    let info = ChangeDetector::new(store).check(&file).await?;
    assert!(info.changed);
    assert_eq!(info.data, "two");

    Ok(())
}

#[tokio::test]
async fn stale_record_beyond_grace_reports_changed_despite_hash_match() -> TestResult {
    init_tracing();

    let project = TempProject::new();
    let file = project.write_file("src/lib.rs", "same content");
    let store = project.store();

    // Commit with a timestamp well in the past, as if the record were made on
    // an earlier run. The content on disk is identical, so the hash matches,
    // but the mtime delta exceeds the grace period.
    let old = mtime_ms(&file) - (GRACE_PERIOD_MS + 80_000);
    store.commit(&file, old, "same content").await?;

    let info = ChangeDetector::new(store).check(&file).await?;
    assert!(info.changed, "hash match beyond grace must report changed");

    Ok(())
}

#[tokio::test]
async fn repeated_record_of_unchanged_file_writes_once() -> TestResult {
    init_tracing();

    let project = TempProject::new();
    let file = project.write_file("src/lib.rs", "stable");
    let store = project.store();

    let writer = CacheWriter::new(store.clone());
    let first = writer.record(&file).await?;
    let second = writer.record(&file).await?;

    assert_eq!(first, second);
    let stats = store.stats();
    assert_eq!(stats.documents_written, 1);
    assert_eq!(stats.writes_skipped, 1);

    Ok(())
}

#[tokio::test]
async fn check_of_missing_file_is_fatal() -> TestResult {
    init_tracing();

    let project = TempProject::new();
    let store = project.store();
    let missing = project.root().join("src/deleted.rs");

    // Create the directory so only the file itself is missing.
    fs::create_dir_all(project.root().join("src"))?;
    let result = ChangeDetector::new(store).check(&missing).await;
    assert!(result.is_err());

    Ok(())
}
