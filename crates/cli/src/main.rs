//! RestProbe CLI - Main Entry Point
//!
//! Runs the reqres, GoRest and browser checks and manages the probe
//! configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use restprobe_common::{default_config_path, ProbeConfig, ACCESS_TOKEN_ENV};

mod commands;
mod output;

use commands::{config, list, run};

/// RestProbe - end-to-end checks for public REST APIs
#[derive(Parser)]
#[command(name = "restprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, env = "RESTPROBE_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings that take precedence over the configuration file
#[derive(Args, Debug, Default)]
struct Overrides {
    /// GoRest bearer token
    #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true, global = true)]
    access_token: Option<String>,

    /// reqres base URL
    #[arg(long, env = "RESTPROBE_REQRES_URL", global = true)]
    reqres_url: Option<String>,

    /// GoRest base URL
    #[arg(long, env = "RESTPROBE_GOREST_URL", global = true)]
    gorest_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "RESTPROBE_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,
}

impl Overrides {
    fn apply(&self, config: &mut ProbeConfig) {
        if let Some(token) = &self.access_token {
            config.gorest.access_token = Some(token.clone());
        }
        if let Some(url) = &self.reqres_url {
            config.reqres.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = &self.gorest_url {
            config.gorest.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.timeout_secs {
            config.http.timeout_secs = secs;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run checks
    Run(run::RunArgs),

    /// List available checks
    List,

    /// Manage the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Load the config file and overlay command-line and environment settings
fn resolve_config(path: &std::path::Path, overrides: &Overrides) -> anyhow::Result<ProbeConfig> {
    let mut config = ProbeConfig::load(path)?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    debug!("Config file: {}", config_path.display());

    match cli.command {
        Commands::Run(args) => {
            let config = resolve_config(&config_path, &cli.overrides)?;
            let success = run::execute(args, config, cli.format).await?;
            if !success {
                std::process::exit(1);
            }
        }
        Commands::List => list::execute(cli.format),
        Commands::Config(cmd) => {
            config::execute(cmd, &config_path, |path| resolve_config(path, &cli.overrides), cli.format)?
        }
    }

    Ok(())
}
