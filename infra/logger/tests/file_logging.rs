use homeval_logger::{LevelFilter, Logger};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

// The global subscriber can only be installed once per process, so the
// init-twice check lives in the same test binary as the happy path.
#[test]
#[serial]
fn file_logging_creates_log_files_and_second_init_fails() {
    let tmp_dir = tempdir().expect("temp dir");
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("homeval-test")
        .path(&log_dir)
        .level(LevelFilter::INFO)
        .init()
        .expect("first init succeeds");
    assert!(logger.guard().is_some());

    tracing::info!("hello from the file logging test");
    // Dropping the handle flushes and joins the non-blocking worker.
    drop(logger);

    assert!(log_dir.exists(), "log directory should be created by logger init");
    let has_log = fs::read_dir(&log_dir)
        .expect("read log dir")
        .flatten()
        .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));
    assert!(has_log, "at least one log file should be created");

    let second = Logger::builder().name("homeval-test").init();
    assert!(second.is_err(), "installing a second global subscriber must fail");
}
