//! File sink tests (separate binary so no other test writes to the file)

#![cfg(feature = "file-logging")]

use logger::{close_file_logging, error, info, init_file_logging, set_level, warn, Level};
use std::fs;

#[test]
fn messages_go_to_file_and_verbose_does_not() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let log_path = dir.path().join("nested").join("run.log");

    set_level(Level::Info);
    assert!(init_file_logging(&log_path));

    info!("Test info message");
    warn!("Test warning message");
    error!("Test error message");

    #[cfg(feature = "verbose")]
    {
        logger::enable_verbose();
        logger::verbose!("This verbose message should NOT be in the file");
    }

    close_file_logging();
    error!("After close");

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[INFO] Test info message"));
    assert!(contents.contains("[WARN] Test warning message"));
    assert!(contents.contains("[ERROR] Test error message"));
    assert!(!contents.contains("verbose message"));
    assert!(!contents.contains("After close"));
}
