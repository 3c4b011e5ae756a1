use crate::cli::{print_json, GlobalArgs};
use crate::services::version_bumper::VersionBumper;
use crate::utils::error::Result;

/// Move currentCSV in the package manifest to the next patch release
#[derive(Debug)]
pub struct BumpCommand {
    pub global: GlobalArgs,
}

impl BumpCommand {
    pub fn run(&self) -> Result<()> {
        let layout = self.global.layout()?;
        let outcome = VersionBumper::new(&layout).bump(self.global.dry_run)?;

        if self.global.json {
            print_json(&outcome)
        } else {
            let verb = if self.global.dry_run { "Would bump" } else { "Bumped" };
            println!(
                "{} {}: {} -> {}",
                verb,
                outcome.path.display(),
                outcome.old_version,
                outcome.new_version
            );
            Ok(())
        }
    }
}
