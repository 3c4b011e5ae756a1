// Package descriptor version bump
//
// The package file is treated as plain lines; only the `currentCSV` line is
// touched so diffs of the manifest stay minimal.

use std::path::{Path, PathBuf};
use crate::models::layout::ManifestLayout;
use crate::models::report::BumpOutcome;
use crate::models::version::Version;
use crate::utils::error::{Result, UpgradeError};
use crate::utils::fs_utils::{ensure_trailing_newline, line_ending, read_text, split_lines_inclusive, write_atomic};

const CURRENT_CSV_KEY: &str = "currentCSV";

/// Package text after the bump together with the versions it moved between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRewrite {
    pub content: String,
    pub old_version: Version,
    pub new_version: Version,
}

/// Whether `line` declares `currentCSV`, either as a plain key or as the
/// first key of a YAML list item (`- currentCSV: ...`)
fn is_current_csv_line(line: &str) -> bool {
    let trimmed = line.trim();
    let item = trimmed.strip_prefix('-').map_or(trimmed, str::trim_start);
    item.starts_with(CURRENT_CSV_KEY)
}

/// Find the single `currentCSV` line, failing when there is none or several
fn find_current_csv_line(lines: &[&str]) -> Result<usize> {
    let mut matches = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_current_csv_line(line))
        .map(|(idx, _)| idx);

    let Some(first) = matches.next() else {
        return Err(UpgradeError::malformed(format!(
            "No line starting with '{CURRENT_CSV_KEY}' in package descriptor"
        )));
    };

    let others: Vec<usize> = matches.collect();
    if !others.is_empty() {
        let numbers: Vec<String> = std::iter::once(first)
            .chain(others)
            .map(|idx| (idx + 1).to_string())
            .collect();
        return Err(UpgradeError::malformed(format!(
            "Expected exactly one '{CURRENT_CSV_KEY}' line, found one on each of lines {}",
            numbers.join(", ")
        )));
    }

    Ok(first)
}

/// Version text of a `currentCSV` line: everything after the first `.`,
/// without the `v` that starts the version in a CSV name.
fn version_text(body: &str) -> Result<&str> {
    let (_, rest) = body.split_once('.').ok_or_else(|| {
        UpgradeError::malformed(format!("'{}' does not contain a dotted version", body.trim()))
    })?;
    Ok(rest.strip_prefix('v').unwrap_or(rest).trim())
}

/// Bump the patch component of the `currentCSV` line in `content`.
///
/// Every other line, including its terminator, is kept byte for byte.
pub fn rewrite_package(content: &str) -> Result<PackageRewrite> {
    let lines = split_lines_inclusive(content);
    let idx = find_current_csv_line(&lines)?;

    let line = lines[idx];
    let ending = line_ending(line);
    let body = line[..line.len() - ending.len()].trim_end();

    let old_version: Version = version_text(body)?.parse()?;

    let (prefix, last) = body.rsplit_once('.').ok_or_else(|| {
        UpgradeError::malformed(format!("'{}' does not contain a dotted version", body.trim()))
    })?;
    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UpgradeError::malformed(format!(
            "Last version component '{last}' of '{}' is not numeric",
            body.trim()
        )));
    }
    let new_version = old_version.bump_patch()?;
    let new_line = format!("{prefix}.{}{ending}", new_version.patch);

    log::debug!("{} -> {}", body.trim(), new_line.trim());

    let mut new_content = String::with_capacity(content.len() + 1);
    for (i, original) in lines.iter().enumerate() {
        if i == idx {
            new_content.push_str(&new_line);
        } else {
            new_content.push_str(original);
        }
    }

    Ok(PackageRewrite {
        content: ensure_trailing_newline(new_content),
        old_version,
        new_version,
    })
}

/// Bump the package descriptor at `path` in place and return the old and new versions
pub fn bump_package_version(path: &Path) -> Result<(Version, Version)> {
    let content = read_text(path)?;
    let rewrite = rewrite_package(&content)?;
    write_atomic(path, &rewrite.content)?;
    Ok((rewrite.old_version, rewrite.new_version))
}

/// Step one of the upgrade: move `currentCSV` to the next patch release
pub struct VersionBumper {
    package_path: PathBuf,
}

impl VersionBumper {
    pub fn new(layout: &ManifestLayout) -> Self {
        Self {
            package_path: layout.package_path(),
        }
    }

    /// Version currently named by the package descriptor
    pub fn current_version(&self) -> Result<Version> {
        let content = read_text(&self.package_path)?;
        let lines = split_lines_inclusive(&content);
        let idx = find_current_csv_line(&lines)?;
        version_text(lines[idx])?.parse()
    }

    /// Compute the bumped package text without writing it
    pub fn prepare(&self) -> Result<PreparedBump> {
        let content = read_text(&self.package_path)?;
        Ok(PreparedBump {
            path: self.package_path.clone(),
            rewrite: rewrite_package(&content)?,
        })
    }

    pub fn bump(&self, dry_run: bool) -> Result<BumpOutcome> {
        let prepared = self.prepare()?;
        if dry_run {
            log::info!(
                "Would bump {}: {} -> {}",
                prepared.path.display(),
                prepared.rewrite.old_version,
                prepared.rewrite.new_version
            );
            return Ok(prepared.outcome());
        }
        prepared.commit()
    }
}

/// A bumped package descriptor that has not been written yet
#[derive(Debug, Clone)]
pub struct PreparedBump {
    path: PathBuf,
    rewrite: PackageRewrite,
}

impl PreparedBump {
    pub fn outcome(&self) -> BumpOutcome {
        BumpOutcome {
            path: self.path.clone(),
            old_version: self.rewrite.old_version,
            new_version: self.rewrite.new_version,
        }
    }

    /// Replace the package descriptor with the bumped text
    pub fn commit(self) -> Result<BumpOutcome> {
        write_atomic(&self.path, &self.rewrite.content)?;
        log::info!(
            "Bumped {}: {} -> {}",
            self.path.display(),
            self.rewrite.old_version,
            self.rewrite.new_version
        );
        Ok(self.outcome())
    }
}
