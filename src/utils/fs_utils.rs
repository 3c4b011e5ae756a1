// File system utilities

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;
use crate::utils::error::{Result, UpgradeError};

/// Read a whole text file, reporting a missing file as `NotFound`
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| UpgradeError::from_io(path, e))
}

/// Mode for files that did not exist before; the process umask still applies
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

/// Replace `path` with `content` without ever exposing a half-written file.
///
/// The content goes to a temp file in the destination directory first and is
/// renamed over the target, so both live on the same filesystem. An existing
/// target keeps its permissions; a new one gets the same mode a plain
/// `fs::write` would give it.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(UpgradeError::from_io(path, e)),
    };

    let mut builder = Builder::new();
    if existing.is_none() {
        if let Some(permissions) = new_file_permissions() {
            builder.permissions(permissions);
        }
    }

    let mut tmp = builder.tempfile_in(dir).map_err(|e| UpgradeError::from_io(dir, e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| UpgradeError::from_io(tmp.path(), e))?;
    }
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| UpgradeError::from_io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| UpgradeError::from_io(path, e.error))?;

    Ok(())
}

/// Make sure the text ends with exactly one line terminator
pub fn ensure_trailing_newline(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

/// Split text into lines that keep their terminators
pub fn split_lines_inclusive(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Whitespace prefix of a line, used to keep rewritten fields at the same indentation
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

/// Line terminator of a line (`"\r\n"`, `"\n"` or empty for a final unterminated line)
pub fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
