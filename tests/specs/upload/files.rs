//! Upload specs
//!
//! Uploaded files settle and land in the assignment queue.

use crate::prelude::*;

#[test]
fn uploads_settle_and_queue_documents() {
    let temp = Project::empty();
    temp.file("folio.toml", FAST_CONFIG);
    temp.file("empty.txt", "");
    temp.file("notes.txt", vec![b'n'; 1024]);
    temp.file("Research Paper.pdf", vec![0u8; 10 * 1024 * 1024]);

    temp.folio()
        .args([
            "--config",
            "folio.toml",
            "upload",
            "empty.txt",
            "notes.txt",
            "Research Paper.pdf",
        ])
        .passes()
        .stdout_has("notes.txt 100%")
        .stdout_has("1 KB")
        .stdout_has("10 MB")
        .stdout_has("Awaiting assignment: 3 (page 1 of 1)")
        .stdout_has("Research Paper")
        .stdout_has("Upload Pending");
}

#[test]
fn queue_page_size_comes_from_config() {
    let temp = Project::empty();
    temp.file(
        "folio.toml",
        format!("{}\n[queue]\npage_size = 2\n", FAST_CONFIG),
    );
    for name in ["a.txt", "b.txt", "c.txt"] {
        temp.file(name, name);
    }

    temp.folio()
        .args(["--config", "folio.toml", "upload", "a.txt", "b.txt", "c.txt"])
        .passes()
        .stdout_has("Awaiting assignment: 3 (page 1 of 2)");
}

#[test]
fn upload_json_lists_completed_tasks() {
    let temp = Project::empty();
    temp.file("folio.toml", FAST_CONFIG);
    temp.file("scan.png", vec![1u8; 2048]);

    let run = temp
        .folio()
        .args([
            "--format",
            "json",
            "--config",
            "folio.toml",
            "upload",
            "scan.png",
            "--language",
            "Hindi",
        ])
        .passes();
    let json = run.json();

    let tasks = json["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["name"], "scan.png");
    assert_eq!(tasks[0]["status"], "completed");
    assert_eq!(tasks[0]["progress"], 100);
    assert_eq!(tasks[0]["display_size"], "2 KB");
    assert_eq!(json["queue"]["total_items"], 1);
    assert_eq!(json["queue"]["items"][0]["title"], "scan");
}
