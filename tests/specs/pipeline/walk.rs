//! Pipeline walk specs
//!
//! Verify a document moves through the stages in order.

use crate::prelude::*;

#[test]
fn walk_through_contribution_awaits_validation() {
    cli()
        .args([
            "walk",
            "Sanskrit Grammar Volume 1",
            "--language",
            "Sanskrit",
            "--through",
            "contribution",
            "--assignee",
            "John Doe",
        ])
        .passes()
        .stdout_has("Sanskrit Grammar Volume 1 (Sanskrit)")
        .stdout_has("John Doe")
        .stdout_has("to-be-assigned")
        .stdout_has("Status: Validation Pending");
}

#[test]
fn walk_defaults_to_certified() {
    cli()
        .args(["walk", "Hindi Poetry Collection", "--language", "Hindi"])
        .passes()
        .stdout_has("Subject Matter Expert Review")
        .stdout_lacks("to-be-assigned")
        .stdout_has("Status: Golden Document Created");
}

#[test]
fn walk_json_reports_journey() {
    let run = cli()
        .args([
            "--format",
            "json",
            "walk",
            "Tamil Literature",
            "--language",
            "Tamil",
            "--through",
            "upload",
        ])
        .passes();
    let json = run.json();

    assert_eq!(json["title"], "Tamil Literature");
    assert_eq!(json["status"], "Contribution Pending");
    let journey = json["journey"].as_array().unwrap();
    let statuses: Vec<&str> = journey
        .iter()
        .map(|r| r["status"].as_str().unwrap())
        .collect();
    assert_eq!(
        statuses,
        vec![
            "completed",
            "to-be-assigned",
            "not-started",
            "not-started",
            "not-started"
        ]
    );
    assert_eq!(journey[0]["assignee"], "Admin");
}
