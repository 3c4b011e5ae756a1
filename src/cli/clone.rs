use std::path::PathBuf;
use crate::cli::{print_json, GlobalArgs};
use crate::models::version::Version;
use crate::services::descriptor_cloner::DescriptorCloner;
use crate::utils::error::{Result, UpgradeError};

/// Clone one release's descriptor into a new version directory
#[derive(Debug)]
pub struct CloneCommand {
    pub global: GlobalArgs,
    pub from: Version,
    pub to: Version,
    pub template: Option<PathBuf>,
}

impl CloneCommand {
    pub fn run(&self) -> Result<()> {
        if self.from == self.to {
            return Err(UpgradeError::malformed(format!(
                "Cannot clone release {} onto itself",
                self.from
            )));
        }

        let layout = self.global.layout()?;
        let mut cloner = DescriptorCloner::new(&layout)?.strict(self.global.strict);
        if let Some(template) = &self.template {
            cloner = cloner.with_template(template);
        }

        let outcome = cloner.run(&self.from, &self.to, self.global.dry_run)?;

        if self.global.json {
            return print_json(&outcome);
        }

        let verb = if self.global.dry_run { "Would create" } else { "Created" };
        println!("{} {}", verb, outcome.target.display());
        println!("  replaces: {}", layout.csv_name(&outcome.old_version));
        if !outcome.fields.missing.is_empty() {
            println!("  not updated: {}", outcome.fields.missing.join(", "));
        }

        Ok(())
    }
}
