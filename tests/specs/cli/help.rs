//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    cli()
        .args(["--help"])
        .passes()
        .stdout_has("upload")
        .stdout_has("walk")
        .stdout_has("--format");
}

#[test]
fn version_prints_name() {
    cli().args(["--version"]).passes().stdout_has("folio ");
}

#[test]
fn walk_help_names_stages() {
    cli()
        .args(["walk", "--help"])
        .passes()
        .stdout_has("--through")
        .stdout_has("contribution");
}
