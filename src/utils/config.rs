// Configuration utilities and TOML parsing

use std::fs;
use std::path::{Path, PathBuf};
use crate::models::layout::ManifestLayout;
use crate::utils::error::{Result, UpgradeError};

/// Loads the manifest layout from defaults, an optional TOML file and CLI overrides
pub struct ConfigParser;

impl ConfigParser {
    /// Load a layout override file such as:
    ///
    /// ```toml
    /// package_dir = "manifests/devconsole"
    /// operator_name = "devconsole-operator"
    /// ```
    pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<ManifestLayout> {
        let path = path.as_ref();

        // Check if file exists
        if !path.exists() {
            return Err(UpgradeError::Config(
                format!("Configuration file not found: {}", path.display())
            ));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| UpgradeError::Config(
                format!("Failed to read {}: {}", path.display(), e)
            ))?;

        Self::parse_layout(&content)
    }

    /// Parse a layout from TOML; missing keys keep their defaults
    pub fn parse_layout(content: &str) -> Result<ManifestLayout> {
        let layout: ManifestLayout = toml::from_str(content)
            .map_err(|e| UpgradeError::Config(
                format!("Invalid TOML syntax: {}", e)
            ))?;

        Self::validate_layout(&layout)?;

        Ok(layout)
    }

    /// Combine the optional config file with a `--root` override
    pub fn resolve(config: Option<&Path>, root: Option<&Path>) -> Result<ManifestLayout> {
        let mut layout = match config {
            Some(path) => Self::load_layout(path)?,
            None => ManifestLayout::default(),
        };

        if let Some(root) = root {
            layout.root = PathBuf::from(root);
        }

        log::debug!("Using manifest layout {layout:?}");
        Ok(layout)
    }

    fn validate_layout(layout: &ManifestLayout) -> Result<()> {
        if layout.operator_name.trim().is_empty() {
            return Err(UpgradeError::Config("operator_name cannot be empty".to_string()));
        }

        if layout.operator_name.chars().any(char::is_whitespace) {
            return Err(UpgradeError::Config(
                format!("operator_name '{}' cannot contain whitespace", layout.operator_name)
            ));
        }

        if layout.package_file.is_empty() || layout.package_file.contains(['/', '\\']) {
            return Err(UpgradeError::Config(
                format!("package_file '{}' must be a plain file name", layout.package_file)
            ));
        }

        Ok(())
    }
}
