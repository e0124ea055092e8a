//! Config Commands

use std::path::Path;

use anyhow::{bail, Result};
use clap::Subcommand;

use restprobe_common::ProbeConfig;

use crate::output::{print_success, print_value, print_warning, OutputFormat};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (token masked)
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

pub fn execute(
    cmd: ConfigCommands,
    path: &Path,
    resolve: impl FnOnce(&Path) -> Result<ProbeConfig>,
    format: OutputFormat,
) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            if !path.exists() {
                print_warning(&format!("{} does not exist, showing defaults", path.display()));
            }
            let config = resolve(path)?;
            print_value(&config.redacted(), format);
        }
        ConfigCommands::Init { force } => init(path, force)?,
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ProbeConfig::default().save(path)?;
    print_success(&format!("Wrote {}", path.display()));
    Ok(())
}
