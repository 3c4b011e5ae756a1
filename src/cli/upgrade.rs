use crate::cli::{print_json, GlobalArgs};
use crate::services::upgrader::{UpgradeOptions, Upgrader};
use crate::utils::error::Result;

/// Bump the package manifest, then clone the previous release's descriptor
#[derive(Debug)]
pub struct UpgradeCommand {
    pub global: GlobalArgs,
}

impl UpgradeCommand {
    /// Execute the upgrade command
    pub fn run(&self) -> Result<()> {
        let layout = self.global.layout()?;
        let options = UpgradeOptions {
            dry_run: self.global.dry_run,
            strict: self.global.strict,
        };

        let report = Upgrader::new(layout, options).run()?;

        if self.global.json {
            return print_json(&report);
        }

        let verb = if report.dry_run { "Would upgrade" } else { "Upgraded" };
        println!(
            "{} {} -> {}",
            verb, report.bump.old_version, report.bump.new_version
        );
        println!("  package:    {}", report.bump.path.display());
        println!("  descriptor: {}", report.clone.target.display());
        if !report.clone.fields.missing.is_empty() {
            println!("  not updated: {}", report.clone.fields.missing.join(", "));
        }

        Ok(())
    }
}
