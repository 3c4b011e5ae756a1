// Contract test for `csvbump bump`

use assert_cmd::Command;
use predicates::prelude::*;
use crate::support::{ManifestRepo, PACKAGE_YAML};

#[test]
fn test_bump_only_touches_package() {
    let repo = ManifestRepo::new();

    let mut cmd = Command::cargo_bin("csvbump").unwrap();
    cmd.current_dir(repo.root()).arg("bump");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.3 -> 0.1.4"));

    assert_eq!(
        repo.read(&repo.package_path()),
        PACKAGE_YAML.replace("v0.1.3", "v0.1.4")
    );
    assert!(!repo.version_dir("0.1.4").exists());
}

#[test]
fn test_bump_json() {
    let repo = ManifestRepo::new();

    let mut cmd = Command::cargo_bin("csvbump").unwrap();
    cmd.current_dir(repo.root()).args(["bump", "--json", "--dry-run"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["old_version"], "0.1.3");
    assert_eq!(json["new_version"], "0.1.4");
    assert_eq!(repo.read(&repo.package_path()), PACKAGE_YAML);
}
