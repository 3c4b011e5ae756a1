// Outcomes of the upgrade steps, printed as text or JSON

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::models::version::Version;

/// Result of bumping the package descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpOutcome {
    pub path: PathBuf,
    pub old_version: Version,
    pub new_version: Version,
}

/// Which descriptor fields were rewritten while cloning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReport {
    pub names: usize,
    pub versions: usize,
    pub replaces: usize,
    pub owned_blocks: usize,
    /// Expected fields that never matched
    pub missing: Vec<String>,
}

impl FieldReport {
    /// Record every expected field that was not seen
    pub fn collect_missing(&mut self) {
        let expected = [
            ("name", self.names),
            ("version", self.versions),
            ("maturity", self.replaces),
            ("owned:", self.owned_blocks),
        ];
        self.missing = expected
            .iter()
            .filter(|(_, count)| *count == 0)
            .map(|(field, _)| (*field).to_string())
            .collect();
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Result of cloning the previous release's descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneOutcome {
    pub source: PathBuf,
    pub target: PathBuf,
    pub old_version: Version,
    pub new_version: Version,
    pub fields: FieldReport,
}

/// Full run: bump followed by clone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeReport {
    pub status: String,
    pub dry_run: bool,
    pub bump: BumpOutcome,
    pub clone: CloneOutcome,
}
