// Integration tests for bumping the package manifest on disk

use std::fs;
use csvbump::models::layout::ManifestLayout;
use csvbump::services::version_bumper::VersionBumper;
use csvbump::{bump_package_version, UpgradeError, Version};
use crate::support::{ManifestRepo, PACKAGE_YAML};

#[test]
fn test_bump_rewrites_only_current_csv() {
    let repo = ManifestRepo::new();

    let (old, new) = bump_package_version(&repo.package_path()).unwrap();

    assert_eq!(old, Version::new(0, 1, 3));
    assert_eq!(new, Version::new(0, 1, 4));

    let before: Vec<&str> = PACKAGE_YAML.lines().collect();
    let content = repo.read(&repo.package_path());
    let after: Vec<&str> = content.lines().collect();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        if b.contains("currentCSV") {
            assert_eq!(*a, "- currentCSV: devconsole-operator.v0.1.4");
        } else {
            assert_eq!(b, a);
        }
    }
    assert!(content.ends_with("packageName: devconsole\n"));
}

#[test]
fn test_bumps_chain() {
    let repo = ManifestRepo::new();

    let (_, first) = bump_package_version(&repo.package_path()).unwrap();
    let (second_old, second_new) = bump_package_version(&repo.package_path()).unwrap();

    assert_eq!(second_old, first);
    assert_eq!(second_new, Version::new(0, 1, 5));
}

#[test]
fn test_bump_missing_package_file() {
    let repo = ManifestRepo::new();
    fs::remove_file(repo.package_path()).unwrap();

    let err = bump_package_version(&repo.package_path()).unwrap_err();

    assert!(matches!(err, UpgradeError::NotFound { .. }));
}

#[test]
fn test_bump_malformed_file_is_left_alone() {
    let repo = ManifestRepo::new();
    let content = "channels:\n- currentCSV: devconsole-operator.v0.1.3\n- currentCSV: devconsole-operator.v0.2.0\n";
    fs::write(repo.package_path(), content).unwrap();

    let err = bump_package_version(&repo.package_path()).unwrap_err();

    assert!(matches!(err, UpgradeError::MalformedInput(_)));
    assert_eq!(repo.read(&repo.package_path()), content);
}

#[test]
fn test_dry_run_bump_and_current_version() {
    let repo = ManifestRepo::new();
    let bumper = VersionBumper::new(&ManifestLayout::with_root(repo.root()));

    let outcome = bumper.bump(true).unwrap();

    assert_eq!(outcome.new_version, Version::new(0, 1, 4));
    assert_eq!(repo.read(&repo.package_path()), PACKAGE_YAML);
    assert_eq!(bumper.current_version().unwrap(), Version::new(0, 1, 3));
}

#[test]
fn test_bump_plain_key_inside_channel() {
    let repo = ManifestRepo::new();
    let content = "channels:\n- name: alpha\n  currentCSV: devconsole-operator.v0.1.3\ndefaultChannel: alpha\n";
    fs::write(repo.package_path(), content).unwrap();

    let (old, new) = bump_package_version(&repo.package_path()).unwrap();

    assert_eq!((old, new), (Version::new(0, 1, 3), Version::new(0, 1, 4)));
    assert_eq!(
        repo.read(&repo.package_path()),
        "channels:\n- name: alpha\n  currentCSV: devconsole-operator.v0.1.4\ndefaultChannel: alpha\n"
    );
}
