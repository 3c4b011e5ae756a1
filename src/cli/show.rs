use serde::{Deserialize, Serialize};
use crate::cli::{print_json, GlobalArgs};
use crate::models::version::Version;
use crate::services::version_bumper::VersionBumper;
use crate::utils::error::Result;

/// Print the release currently named by the package manifest
#[derive(Debug)]
pub struct ShowCommand {
    pub global: GlobalArgs,
}

/// JSON response format for show command
#[derive(Debug, Serialize, Deserialize)]
pub struct ShowResponse {
    pub current_version: Version,
    pub current_csv: String,
    pub descriptor: String,
    pub descriptor_exists: bool,
}

impl ShowCommand {
    pub fn run(&self) -> Result<()> {
        let layout = self.global.layout()?;
        let version = VersionBumper::new(&layout).current_version()?;
        let descriptor = layout.descriptor_path(&version);

        if self.global.json {
            let response = ShowResponse {
                current_version: version,
                current_csv: layout.csv_name(&version),
                descriptor: descriptor.display().to_string(),
                descriptor_exists: descriptor.exists(),
            };
            return print_json(&response);
        }

        println!("{version}");
        if !descriptor.exists() {
            log::warn!("Descriptor for {} is missing: {}", version, descriptor.display());
        }
        Ok(())
    }
}
