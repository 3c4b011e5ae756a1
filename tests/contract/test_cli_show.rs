// Contract test for `csvbump show`

use assert_cmd::Command;
use predicates::prelude::*;
use crate::support::{ManifestRepo, PACKAGE_YAML};

#[test]
fn test_show_prints_current_version() {
    let repo = ManifestRepo::new();

    let mut cmd = Command::cargo_bin("csvbump").unwrap();
    cmd.current_dir(repo.root()).arg("show");

    cmd.assert()
        .success()
        .stdout(predicate::eq("0.1.3\n"));

    assert_eq!(repo.read(&repo.package_path()), PACKAGE_YAML);
}

#[test]
fn test_show_json() {
    let repo = ManifestRepo::new();

    let mut cmd = Command::cargo_bin("csvbump").unwrap();
    cmd.current_dir(repo.root()).args(["show", "--json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["current_version"], "0.1.3");
    assert_eq!(json["current_csv"], "devconsole-operator.v0.1.3");
    assert_eq!(json["descriptor_exists"], true);
}
