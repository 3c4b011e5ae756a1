// ClusterServiceVersion descriptor cloning
//
// The previous release's descriptor is copied line by line. Only the CSV name,
// the `spec.version` field, the `replaces` pointer and the owned resources block
// change; everything else is carried over untouched so the new file diffs
// cleanly against the old one.

use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;
use crate::models::layout::ManifestLayout;
use crate::models::report::{CloneOutcome, FieldReport};
use crate::models::version::Version;
use crate::utils::error::{Result, UpgradeError};
use crate::utils::fs_utils::{
    ensure_trailing_newline, leading_whitespace, line_ending, read_text, split_lines_inclusive,
    write_atomic,
};

const OWNED_MARKER: &str = "owned:";
const MATURITY_KEY: &str = "maturity:";
const REPLACES_KEY: &str = "replaces:";

/// Line patterns for the fields rewritten in a descriptor
#[derive(Debug, Clone)]
pub struct DescriptorPatterns {
    operator_name: String,
    name: Regex,
    version: Regex,
}

impl DescriptorPatterns {
    pub fn new(operator_name: &str) -> Result<Self> {
        let name = Regex::new(&format!(
            r"^\s+name:\s+{}\.v\d+\.\d+\.\d+",
            regex::escape(operator_name)
        ))?;
        let version = Regex::new(r"^\s+version:\s+\d+\.\d+\.\d+")?;

        Ok(Self {
            operator_name: operator_name.to_string(),
            name,
            version,
        })
    }

    fn csv_name(&self, version: &Version) -> String {
        format!("{}.v{}", self.operator_name, version)
    }
}

/// Terminator of `line`, falling back to `\n` for an unterminated last line
fn ending_or_newline(line: &str) -> &str {
    match line_ending(line) {
        "" => "\n",
        ending => ending,
    }
}

/// Build the new descriptor text from the old one.
///
/// The fragment is inserted verbatim right after each `owned:` line.
pub fn rewrite_descriptor(
    content: &str,
    fragment: &str,
    patterns: &DescriptorPatterns,
    old_version: &Version,
    new_version: &Version,
) -> (String, FieldReport) {
    let mut report = FieldReport::default();
    let mut out = String::with_capacity(content.len() + fragment.len() + 64);

    for line in split_lines_inclusive(content) {
        let trimmed = line.trim();
        let indent = leading_whitespace(line);

        if trimmed == OWNED_MARKER {
            out.push_str(line);
            if line_ending(line).is_empty() {
                out.push('\n');
            }
            out.push_str(fragment);
            if !fragment.is_empty() && !fragment.ends_with('\n') {
                out.push('\n');
            }
            report.owned_blocks += 1;
        } else if patterns.name.is_match(line) {
            let new_line = format!(
                "{indent}name: {}{}",
                patterns.csv_name(new_version),
                ending_or_newline(line)
            );
            log::debug!("{} -> {}", trimmed, new_line.trim());
            out.push_str(&new_line);
            report.names += 1;
        } else if patterns.version.is_match(line) {
            let new_line = format!("{indent}version: {new_version}{}", line_ending(line));
            log::debug!("{} -> {}", trimmed, new_line.trim());
            out.push_str(&new_line);
            report.versions += 1;
        } else if trimmed.starts_with(MATURITY_KEY) {
            out.push_str(line);
            if line_ending(line).is_empty() {
                out.push('\n');
            }
            out.push_str(&format!(
                "{indent}{REPLACES_KEY} {}{}",
                patterns.csv_name(old_version),
                ending_or_newline(line)
            ));
            report.replaces += 1;
        } else {
            if trimmed.starts_with(REPLACES_KEY) {
                log::warn!("Previous descriptor already has '{trimmed}', it is carried over as is");
            }
            out.push_str(line);
        }
    }

    report.collect_missing();
    (ensure_trailing_newline(out), report)
}

/// Step two of the upgrade: derive the new release's descriptor from the previous one
pub struct DescriptorCloner {
    layout: ManifestLayout,
    template_path: PathBuf,
    patterns: DescriptorPatterns,
    strict: bool,
}

impl DescriptorCloner {
    pub fn new(layout: &ManifestLayout) -> Result<Self> {
        Ok(Self {
            template_path: layout.template_path(),
            patterns: DescriptorPatterns::new(&layout.operator_name)?,
            layout: layout.clone(),
            strict: false,
        })
    }

    /// Use another fragment file than the layout's default
    #[must_use]
    pub fn with_template<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template_path = path.as_ref().to_path_buf();
        self
    }

    /// Fail instead of warning when an expected field was not rewritten
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read and rewrite the previous descriptor without writing anything
    pub fn prepare(&self, old_version: &Version, new_version: &Version) -> Result<PreparedClone> {
        let source = self.layout.descriptor_path(old_version);
        let target_dir = self.layout.version_dir(new_version);
        let target = self.layout.descriptor_path(new_version);

        // Checked before any input is read so an existing release is never touched
        if target_dir.exists() {
            return Err(UpgradeError::AlreadyExists { path: target_dir });
        }

        let fragment = read_text(&self.template_path)?;
        let content = read_text(&source)?;

        let (new_content, fields) =
            rewrite_descriptor(&content, &fragment, &self.patterns, old_version, new_version);

        if !fields.is_complete() {
            let missing = fields.missing.join(", ");
            if self.strict {
                return Err(UpgradeError::malformed(format!(
                    "{} has no line matching: {missing}",
                    source.display()
                )));
            }
            log::warn!("{} has no line matching: {missing}; those fields were not updated", source.display());
        }

        Ok(PreparedClone {
            target_dir,
            content: new_content,
            outcome: CloneOutcome {
                source,
                target,
                old_version: *old_version,
                new_version: *new_version,
                fields,
            },
        })
    }

    pub fn run(&self, old_version: &Version, new_version: &Version, dry_run: bool) -> Result<CloneOutcome> {
        let prepared = self.prepare(old_version, new_version)?;
        if dry_run {
            log::info!("Would create {}", prepared.outcome.target.display());
            return Ok(prepared.outcome);
        }
        prepared.commit()
    }
}

/// A rewritten descriptor that has not been written yet
#[derive(Debug, Clone)]
pub struct PreparedClone {
    target_dir: PathBuf,
    content: String,
    pub outcome: CloneOutcome,
}

impl PreparedClone {
    /// Create the version directory and write the new descriptor into it.
    ///
    /// The directory is removed again when the write fails, so a retry does
    /// not trip over an empty release directory.
    pub fn commit(self) -> Result<CloneOutcome> {
        fs::create_dir(&self.target_dir).map_err(|e| UpgradeError::from_io(&self.target_dir, e))?;
        if let Err(err) = write_atomic(&self.outcome.target, &self.content) {
            if let Err(cleanup) = fs::remove_dir(&self.target_dir) {
                log::error!("Could not remove {}: {cleanup}", self.target_dir.display());
            }
            return Err(err);
        }
        log::info!("Created {}", self.outcome.target.display());
        Ok(self.outcome)
    }
}

/// Clone the `old_version` descriptor of `layout` into a new `new_version`
/// directory, inserting the fragment at `template_path`
pub fn clone_descriptor(
    layout: &ManifestLayout,
    old_version: &Version,
    new_version: &Version,
    template_path: &Path,
) -> Result<CloneOutcome> {
    DescriptorCloner::new(layout)?
        .with_template(template_path)
        .run(old_version, new_version, false)
}
