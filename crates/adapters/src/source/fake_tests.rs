// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn handle(name: &str, size: u64) -> FileHandle {
    FileHandle::new(name, size, "application/pdf")
}

#[tokio::test]
async fn fake_source_records_calls() {
    let source = FakeFileSource::new();
    let file = handle("a.pdf", 200);

    assert_eq!(source.read(&file, 0, 10).await.unwrap(), 20);
    assert_eq!(source.read(&file, 10, 35).await.unwrap(), 50);

    let calls = source.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        SourceCall {
            name: "a.pdf".into(),
            from: 10,
            to: 35,
        }
    );
}

#[tokio::test]
async fn injected_failure_triggers_at_threshold() {
    let source = FakeFileSource::new();
    source.fail_at("broken.pdf", 50, "disk unplugged");
    let file = handle("broken.pdf", 100);

    assert!(source.read(&file, 0, 49).await.is_ok());
    let err = source.read(&file, 49, 60).await.unwrap_err();
    assert_eq!(err.to_string(), "read failed: disk unplugged");
}

#[tokio::test]
async fn failures_are_per_file() {
    let source = FakeFileSource::new();
    source.fail_at("broken.pdf", 0, "bad");

    assert!(source.read(&handle("fine.pdf", 10), 0, 100).await.is_ok());
    assert!(source.read(&handle("broken.pdf", 10), 0, 1).await.is_err());
    assert_eq!(source.calls_for("fine.pdf").len(), 1);
}

#[tokio::test]
async fn injected_failure_fires_once() {
    let source = FakeFileSource::new();
    source.fail_at("flaky.pdf", 20, "timeout");
    let file = handle("flaky.pdf", 100);

    assert!(source.read(&file, 0, 30).await.is_err());
    assert_eq!(source.read(&file, 0, 30).await.unwrap(), 30);
    assert_eq!(source.read(&file, 30, 100).await.unwrap(), 70);
}
