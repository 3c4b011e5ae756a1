// CLI module for command-line interface

pub mod bump;
pub mod clone;
pub mod show;
pub mod upgrade;

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use crate::models::layout::ManifestLayout;
use crate::models::version::Version;
use crate::utils::config::ConfigParser;
use crate::utils::error::{Result, UpgradeError};

use self::bump::BumpCommand;
use self::clone::CloneCommand;
use self::show::ShowCommand;
use self::upgrade::UpgradeCommand;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "csvbump")]
#[command(about = "Cut a new patch release of an operator manifest")]
#[command(long_about = r#"csvbump moves an operator package manifest to its next patch release.

Run from the repository root without arguments it:
  • bumps currentCSV in manifests/devconsole/devconsole.package.yaml
  • copies the previous ClusterServiceVersion into a new version directory
  • renames it, points `replaces` at the previous release
  • inserts test/upgrade/upgrade_csv_block.yaml.txt after `owned:`

Examples:
  csvbump                               Bump and clone in the current directory
  csvbump --root ../devconsole --dry-run   Show what would change
  csvbump bump                          Only bump the package manifest
  csvbump clone --from 0.1.3 --to 0.1.4  Only clone a descriptor
  csvbump show                          Print the current version"#)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Repository root containing the manifests tree (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// TOML file overriding the manifest layout
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Compute the changes without writing any file
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Fail when an expected descriptor field is not found
    #[arg(long, global = true)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn layout(&self) -> Result<ManifestLayout> {
        ConfigParser::resolve(self.config.as_deref(), self.root.as_deref())
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bump the package manifest and clone the previous descriptor (default)
    Upgrade,

    /// Only bump currentCSV in the package manifest
    Bump,

    /// Only clone a descriptor into a new version directory
    #[command(long_about = r#"Clone the descriptor of one release into a new version directory.

The new directory must not exist yet. The copy gets its name and version
rewritten, a `replaces` line after `maturity:`, and the upgrade fragment
after `owned:`.

Examples:
  csvbump clone --from 0.1.3 --to 0.1.4
  csvbump clone --from 0.1.3 --to 0.1.4 --template extra_block.yaml.txt"#)]
    Clone {
        /// Release to copy from
        #[arg(long, value_parser = parse_version)]
        from: Version,
        /// Release to create
        #[arg(long, value_parser = parse_version)]
        to: Version,
        /// Fragment to insert after `owned:` (default from the layout)
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Print the version currently named by the package manifest
    Show,
}

fn parse_version(raw: &str) -> std::result::Result<Version, String> {
    raw.trim().parse().map_err(|e: UpgradeError| e.to_string())
}

/// Print a response as pretty JSON
pub fn print_json<T: Serialize>(response: &T) -> Result<()> {
    let json_output = serde_json::to_string_pretty(response)
        .map_err(|e| UpgradeError::malformed(format!("Failed to serialize JSON response: {}", e)))?;
    println!("{}", json_output);
    Ok(())
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command
    pub fn execute(cli: Cli) -> Result<()> {
        let global = cli.global;
        match cli.command.unwrap_or(Commands::Upgrade) {
            Commands::Upgrade => UpgradeCommand { global }.run(),
            Commands::Bump => BumpCommand { global }.run(),
            Commands::Clone { from, to, template } => {
                let cmd = CloneCommand {
                    global,
                    from,
                    to,
                    template,
                };
                cmd.run()
            }
            Commands::Show => ShowCommand { global }.run(),
        }
    }
}
