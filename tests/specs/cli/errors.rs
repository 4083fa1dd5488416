//! Error reporting specs

use crate::prelude::*;

#[test]
fn no_command_fails() {
    cli().fails().stderr_has("Usage");
}

#[test]
fn unknown_command_fails() {
    cli().args(["publish"]).fails().stderr_has("unrecognized subcommand");
}

#[test]
fn upload_requires_a_path() {
    cli().args(["upload"]).fails().stderr_has("<PATHS>...");
}

#[test]
fn upload_missing_file_fails() {
    let temp = Project::empty();
    temp.folio()
        .args(["upload", "missing.pdf"])
        .fails()
        .stderr_has("cannot upload missing.pdf");
}

#[test]
fn invalid_config_fails() {
    let temp = Project::empty();
    temp.file("folio.toml", "[uploads]\nmin_step = 40\nmax_step = 10\n");
    temp.file("a.txt", "hello");
    temp.folio()
        .args(["--config", "folio.toml", "upload", "a.txt"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn malformed_config_fails() {
    let temp = Project::empty();
    temp.file("folio.toml", "[uploads]\ntick = \"whenever\"\n");
    temp.folio()
        .args(["--config", "folio.toml", "walk", "Doc", "--language", "Hindi"])
        .fails()
        .stderr_has("TOML parse error");
}

#[test]
fn walk_rejects_unknown_stage() {
    cli()
        .args(["walk", "Doc", "--language", "Hindi", "--through", "publishing"])
        .fails()
        .stderr_has("publishing");
}

#[test]
fn walk_rejects_blank_language() {
    cli()
        .args(["walk", "Doc", "--language", " "])
        .fails()
        .stderr_has("language is required");
}
