use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::models::version::Version;

/// Where the manifest tree and the upgrade fragment live.
///
/// All relative paths are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestLayout {
    /// Repository root the other paths are relative to
    pub root: PathBuf,
    /// Directory holding the package file and one directory per version
    pub package_dir: PathBuf,
    /// Package descriptor file name inside `package_dir`
    pub package_file: String,
    /// Fragment inserted after the `owned:` marker of the new descriptor
    pub template_file: PathBuf,
    /// Operator name used in CSV names (`<operator>.v<version>`)
    pub operator_name: String,
}

impl Default for ManifestLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            package_dir: PathBuf::from("manifests/devconsole"),
            package_file: "devconsole.package.yaml".to_string(),
            template_file: PathBuf::from("test/upgrade/upgrade_csv_block.yaml.txt"),
            operator_name: "devconsole-operator".to_string(),
        }
    }
}

impl ManifestLayout {
    /// Default layout rooted somewhere else (tests use a temp dir)
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn package_root(&self) -> PathBuf {
        self.root.join(&self.package_dir)
    }

    pub fn package_path(&self) -> PathBuf {
        self.package_root().join(&self.package_file)
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template_file)
    }

    pub fn version_dir(&self, version: &Version) -> PathBuf {
        self.package_root().join(version.to_string())
    }

    /// `devconsole-operator.v0.1.4`
    pub fn csv_name(&self, version: &Version) -> String {
        format!("{}.v{}", self.operator_name, version)
    }

    /// `<package_dir>/<v>/<operator>.v<v>.clusterserviceversion.yaml`
    pub fn descriptor_path(&self, version: &Version) -> PathBuf {
        self.version_dir(version)
            .join(format!("{}.clusterserviceversion.yaml", self.csv_name(version)))
    }
}
