// Release version identifiers (MAJOR.MINOR.PATCH)

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::utils::error::UpgradeError;

/// Three-component dotted numeric version as used in CSV names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// The next patch release
    pub fn bump_patch(&self) -> Result<Self, UpgradeError> {
        let patch = self.patch.checked_add(1).ok_or_else(|| {
            UpgradeError::malformed(format!("Patch component of {self} cannot be incremented"))
        })?;
        Ok(Self { patch, ..*self })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse one numeric component; only ASCII digits are accepted so that
/// signs and surrounding whitespace are rejected.
fn parse_component(part: &str, label: &str, input: &str) -> Result<u64, UpgradeError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UpgradeError::malformed(format!(
            "Invalid {label} version component '{part}' in '{input}'"
        )));
    }
    part.parse::<u64>().map_err(|_| {
        UpgradeError::malformed(format!("{label} version component '{part}' in '{input}' is too large"))
    })
}

impl FromStr for Version {
    type Err = UpgradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(UpgradeError::malformed(format!(
                "Version '{s}' must have exactly 3 parts (major.minor.patch)"
            )));
        }

        let major = parse_component(parts[0], "major", s)?;
        let minor = parse_component(parts[1], "minor", s)?;
        let patch = parse_component(parts[2], "patch", s)?;

        Ok(Self::new(major, minor, patch))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
