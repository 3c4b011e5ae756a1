// Integration tests for cloning a ClusterServiceVersion descriptor

use std::fs;
use csvbump::models::layout::ManifestLayout;
use csvbump::services::descriptor_cloner::DescriptorCloner;
use csvbump::{clone_descriptor, UpgradeError, Version};
use crate::support::{ManifestRepo, CSV_0_1_3, CSV_0_1_4, UPGRADE_BLOCK};

const OLD: Version = Version::new(0, 1, 3);
const NEW: Version = Version::new(0, 1, 4);

#[test]
fn test_clone_creates_new_descriptor() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());

    let outcome = clone_descriptor(&layout, &OLD, &NEW, &repo.template_path()).unwrap();

    assert_eq!(outcome.target, repo.descriptor_path("0.1.4"));
    assert!(outcome.fields.is_complete());
    assert_eq!(repo.read(&repo.descriptor_path("0.1.4")), CSV_0_1_4);
}

#[test]
fn test_clone_never_modifies_old_descriptor() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());

    clone_descriptor(&layout, &OLD, &NEW, &repo.template_path()).unwrap();

    assert_eq!(repo.read(&repo.descriptor_path("0.1.3")), CSV_0_1_3);
}

#[test]
fn test_fragment_follows_owned_line_verbatim() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());

    clone_descriptor(&layout, &OLD, &NEW, &repo.template_path()).unwrap();

    let content = repo.read(&repo.descriptor_path("0.1.4"));
    let expected = concat!(
        "  customresourcedefinitions:\n",
        "    owned:\n",
        "    - description: Component to be built and deployed\n",
        "      displayName: Component\n",
        "      kind: Component\n",
        "      name: components.devconsole.openshift.io\n",
        "      version: v1alpha1\n",
        "    - description: Git source to be used by a Component\n",
    );
    assert!(content.contains(expected), "unexpected owned block in:\n{content}");
    let owned = content.find("    owned:\n").unwrap() + "    owned:\n".len();
    assert!(content[owned..].starts_with(UPGRADE_BLOCK));
}

#[test]
fn test_fragment_indentation_is_not_adjusted() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());
    let fragment = "- kind: Flush\n        deep: nested\n\t- kind: Tabbed\n";
    fs::write(repo.template_path(), fragment).unwrap();

    clone_descriptor(&layout, &OLD, &NEW, &repo.template_path()).unwrap();

    let content = repo.read(&repo.descriptor_path("0.1.4"));
    assert!(content.contains(
        "    owned:\n- kind: Flush\n        deep: nested\n\t- kind: Tabbed\n    - description: Git source"
    ));
}

#[test]
fn test_existing_target_directory() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());
    fs::create_dir(repo.version_dir("0.1.4")).unwrap();
    fs::write(repo.version_dir("0.1.4").join("keep.txt"), "keep").unwrap();

    let err = clone_descriptor(&layout, &OLD, &NEW, &repo.template_path()).unwrap_err();

    assert!(matches!(err, UpgradeError::AlreadyExists { .. }));
    let entries: Vec<_> = fs::read_dir(repo.version_dir("0.1.4")).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(repo.read(&repo.version_dir("0.1.4").join("keep.txt")), "keep");
}

#[test]
fn test_missing_template_creates_nothing() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());
    fs::remove_file(repo.template_path()).unwrap();

    let err = clone_descriptor(&layout, &OLD, &NEW, &repo.template_path()).unwrap_err();

    assert!(matches!(err, UpgradeError::NotFound { .. }));
    assert!(!repo.version_dir("0.1.4").exists());
}

#[test]
fn test_missing_old_descriptor() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());

    let err = clone_descriptor(&layout, &Version::new(0, 0, 9), &NEW, &repo.template_path()).unwrap_err();

    assert!(matches!(err, UpgradeError::NotFound { .. }));
    assert!(!repo.version_dir("0.1.4").exists());
}

#[test]
fn test_strict_mode_rejects_unmatched_fields() {
    let repo = ManifestRepo::new();
    let layout = ManifestLayout::with_root(repo.root());
    // Extra spaces before the value still match; a missing maturity line does not
    fs::write(
        repo.descriptor_path("0.1.3"),
        "metadata:\n  name:   devconsole-operator.v0.1.3\nspec:\n  owned:\n  version: 0.1.3\n",
    )
    .unwrap();

    let err = DescriptorCloner::new(&layout)
        .unwrap()
        .strict(true)
        .run(&OLD, &NEW, false)
        .unwrap_err();
    assert!(err.to_string().contains("maturity"));
    assert!(!repo.version_dir("0.1.4").exists());

    let outcome = DescriptorCloner::new(&layout).unwrap().run(&OLD, &NEW, false).unwrap();
    assert_eq!(outcome.fields.missing, vec!["maturity".to_string()]);
    assert_eq!(
        repo.read(&repo.descriptor_path("0.1.4")),
        format!("metadata:\n  name: devconsole-operator.v0.1.4\nspec:\n  owned:\n{UPGRADE_BLOCK}  version: 0.1.4\n")
    );
}
