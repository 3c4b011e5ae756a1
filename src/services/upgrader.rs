// Full upgrade: bump the package descriptor, then clone the previous CSV

use crate::models::layout::ManifestLayout;
use crate::models::report::UpgradeReport;
use crate::services::descriptor_cloner::DescriptorCloner;
use crate::services::version_bumper::VersionBumper;
use crate::utils::error::Result;

/// Switches shared by the upgrade steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeOptions {
    /// Compute and report everything without writing
    pub dry_run: bool,
    /// Treat descriptor fields that did not match as errors
    pub strict: bool,
}

pub struct Upgrader {
    layout: ManifestLayout,
    options: UpgradeOptions,
}

impl Upgrader {
    pub const fn new(layout: ManifestLayout, options: UpgradeOptions) -> Self {
        Self { layout, options }
    }

    /// Run both steps.
    ///
    /// Both rewrites are computed before anything is written, so a missing
    /// input or an existing target directory aborts with the package file
    /// untouched. A failure while writing the descriptor after the package was
    /// bumped is not rolled back.
    pub fn run(&self) -> Result<UpgradeReport> {
        let bumper = VersionBumper::new(&self.layout);
        let cloner = DescriptorCloner::new(&self.layout)?.strict(self.options.strict);

        let bump = bumper.prepare()?;
        let planned = bump.outcome();
        let clone = cloner.prepare(&planned.old_version, &planned.new_version)?;

        if self.options.dry_run {
            log::info!(
                "Would bump {} to {} and create {}",
                planned.path.display(),
                planned.new_version,
                clone.outcome.target.display()
            );
            return Ok(UpgradeReport {
                status: "planned".to_string(),
                dry_run: true,
                bump: planned,
                clone: clone.outcome,
            });
        }

        let bump = bump.commit()?;
        let clone = clone.commit().inspect_err(|_| {
            log::error!(
                "{} was already bumped to {}; restore it before retrying",
                bump.path.display(),
                bump.new_version
            );
        })?;

        Ok(UpgradeReport {
            status: "success".to_string(),
            dry_run: false,
            bump,
            clone,
        })
    }
}

/// Upgrade the manifest tree of `layout` with default options
pub fn upgrade(layout: &ManifestLayout) -> Result<UpgradeReport> {
    Upgrader::new(layout.clone(), UpgradeOptions::default()).run()
}
