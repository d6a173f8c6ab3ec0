//! Tests for the size-bounded rotating file sink.

use catlog::output::{LogRecord, Output, RotatingFileSink};
use catlog::{Error, Level};
use std::fs;
use tempfile::TempDir;

fn record(level: Level, msg: &str) -> LogRecord<'_> {
    LogRecord::new(level, "sink", msg)
}

fn open(tmp: &TempDir, limit: u64) -> RotatingFileSink {
    RotatingFileSink::open("sink.log", limit, tmp.path())
        .unwrap()
        .with_template("{msg}")
}

#[test]
fn writes_rendered_lines() {
    let tmp = TempDir::new().unwrap();
    let sink = RotatingFileSink::open("sink.log", 1024, tmp.path())
        .unwrap()
        .with_template("{level}|{name}|{msg}");

    sink.write(&record(Level::Info, "hello")).unwrap();
    sink.write(&record(Level::Severe, "bye")).unwrap();

    let content = fs::read_to_string(tmp.path().join("sink.log")).unwrap();
    assert_eq!(content, "INFO|sink|hello\nSEVERE|sink|bye\n");
}

#[test]
fn default_template_includes_timestamp() {
    let tmp = TempDir::new().unwrap();
    let sink = RotatingFileSink::open("sink.log", 1024, tmp.path()).unwrap();

    sink.write(&record(Level::Info, "stamped")).unwrap();

    let content = fs::read_to_string(sink.path()).unwrap();
    let line = content.lines().next().unwrap();
    // "YYYY-MM-DD HH:MM:SS.mmm INFO sink  stamped"
    assert_eq!(line.len(), "2026-01-01 00:00:00.000 INFO sink  stamped".len());
    assert!(line.ends_with(" INFO sink  stamped"));
}

#[test]
fn creates_missing_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("a").join("b");

    let sink = RotatingFileSink::open("deep.log", 64, nested.as_path()).unwrap();

    assert!(nested.join("deep.log").exists());
    assert_eq!(sink.path(), nested.join("deep.log"));
}

#[test]
fn level_filters_records() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 1024).with_level(Level::Warning);

    sink.write(&record(Level::Info, "quiet")).unwrap();
    sink.write(&record(Level::Warning, "loud")).unwrap();

    let content = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(content, "loud\n");
    assert_eq!(sink.level(), Level::Warning);
}

#[test]
fn file_never_exceeds_cap() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 100);

    for _ in 0..50 {
        // 11 bytes per line with the newline
        sink.write(&record(Level::Info, "0123456789")).unwrap();
        let len = fs::metadata(sink.path()).unwrap().len();
        assert!(len <= 100, "file grew to {len} bytes");
        assert_eq!(len, sink.written_bytes());
    }
}

#[test]
fn exceeding_cap_restarts_from_empty() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 100);

    for i in 0..9 {
        sink.write(&record(Level::Info, &format!("line-{i:04}"))).unwrap();
    }
    assert_eq!(sink.written_bytes(), 90);

    sink.write(&record(Level::Info, "line-0009")).unwrap();
    assert_eq!(sink.written_bytes(), 100);

    sink.write(&record(Level::Info, "line-0010")).unwrap();
    let content = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(content, "line-0010\n");
}

#[test]
fn oversized_line_is_clipped_to_cap() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 16);

    sink.write(&record(Level::Info, &"x".repeat(40))).unwrap();

    assert_eq!(fs::metadata(sink.path()).unwrap().len(), 16);
}

#[test]
fn clipping_respects_char_boundaries() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 5);

    // Each 'é' is two bytes; five bytes can hold only two of them.
    sink.write(&record(Level::Info, "éééé")).unwrap();

    assert_eq!(fs::read_to_string(sink.path()).unwrap(), "éé");
}

#[test]
fn existing_content_counts_toward_cap() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sink.log");
    fs::write(&path, "previous run\n").unwrap();

    let sink = open(&tmp, 1024);

    assert_eq!(sink.written_bytes(), 13);
    sink.write(&record(Level::Info, "next")).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous run\nnext\n");
}

#[test]
fn existing_file_over_cap_is_emptied() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sink.log");
    fs::write(&path, "x".repeat(200)).unwrap();

    let sink = open(&tmp, 100);

    assert_eq!(sink.written_bytes(), 0);
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn delete_while_open_recreates_on_next_write() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 1024);
    sink.write(&record(Level::Info, "before")).unwrap();

    sink.delete_log_file().unwrap();
    assert!(!sink.path().exists());

    sink.write(&record(Level::Info, "after")).unwrap();
    assert_eq!(fs::read_to_string(sink.path()).unwrap(), "after\n");
    assert_eq!(sink.written_bytes(), 6);
}

#[test]
fn delete_missing_file_is_ok() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 1024);

    sink.delete_log_file().unwrap();
    sink.delete_log_file().unwrap();
}

#[test]
fn close_is_idempotent_and_stops_writes() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 1024);
    sink.write(&record(Level::Info, "kept")).unwrap();

    sink.close();
    sink.close();
    assert!(sink.is_closed());

    sink.write(&record(Level::Info, "dropped")).unwrap();
    assert_eq!(fs::read_to_string(sink.path()).unwrap(), "kept\n");
}

#[test]
fn delete_after_close_removes_file_and_nothing_recreates_it() {
    let tmp = TempDir::new().unwrap();
    let sink = open(&tmp, 1024);
    sink.write(&record(Level::Info, "x")).unwrap();
    sink.close();

    sink.delete_log_file().unwrap();
    sink.write(&record(Level::Info, "y")).unwrap();

    assert!(!sink.path().exists());
}

#[test]
fn zero_cap_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = RotatingFileSink::open("sink.log", 0, tmp.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn open_failure_surfaces_io_error() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("taken.log")).unwrap();

    let err = RotatingFileSink::open("taken.log", 1024, tmp.path()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn cap_holds_when_two_sinks_share_a_path() {
    let tmp = TempDir::new().unwrap();
    let first = open(&tmp, 100);
    let second = open(&tmp, 100);

    for i in 0..30 {
        first.write(&record(Level::Info, &format!("a-{i:03}"))).unwrap();
        second.write(&record(Level::Info, &format!("b-{i:03}"))).unwrap();
        let len = fs::metadata(first.path()).unwrap().len();
        assert!(len <= 100, "file grew to {len} bytes");
    }
}

#[cfg(target_os = "linux")]
#[test]
fn failed_write_reopens_on_next_write() {
    let dev = std::path::Path::new("/dev");
    if !dev.join("full").exists() {
        return;
    }
    // Every write to /dev/full fails with ENOSPC.
    let sink = RotatingFileSink::open("full", 1024, dev)
        .unwrap()
        .with_template("{msg}");

    assert!(matches!(
        sink.write(&record(Level::Info, "lost")),
        Err(Error::Io(_))
    ));
    assert_eq!(sink.written_bytes(), 0);
    assert!(matches!(
        sink.write(&record(Level::Info, "lost again")),
        Err(Error::Io(_))
    ));
    assert_eq!(sink.written_bytes(), 0);
}
