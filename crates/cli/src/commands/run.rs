//! Run Command

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::debug;

use restprobe_common::ProbeConfig;
use restprobe_e2e::runner::TestResult;
use restprobe_e2e::{TestRunner, TestSuiteResult};

use crate::output::{
    print_error, print_info, print_list, print_success, print_value, OutputFormat, TableDisplay,
};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Only run checks with this tag (reqres, gorest, browser)
    #[arg(short, long, conflicts_with = "name")]
    pub tag: Option<String>,

    /// Only run the check with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Skip the browser checks
    #[arg(long)]
    pub no_browser: bool,

    /// Directory to write test-results.json into
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Check result display wrapper for serialization
#[derive(Serialize)]
pub struct ResultDisplay {
    pub name: String,
    pub status: &'static str,
    pub duration_ms: u64,
    pub error: String,
}

impl From<&TestResult> for ResultDisplay {
    fn from(result: &TestResult) -> Self {
        let status = if result.skipped {
            "skipped"
        } else if result.success {
            "passed"
        } else {
            "failed"
        };
        Self {
            name: result.name.clone(),
            status,
            duration_ms: result.duration_ms,
            error: result.error.clone().unwrap_or_default(),
        }
    }
}

impl TableDisplay for ResultDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Check", "Status", "Duration", "Error"]
    }

    fn row(&self) -> Vec<String> {
        let status = match self.status {
            "passed" => "✓",
            "failed" => "✗",
            _ => "-",
        };
        vec![
            self.name.clone(),
            status.to_string(),
            format!("{}ms", self.duration_ms),
            self.error.clone(),
        ]
    }
}

/// Run the selected checks; returns whether all of them passed
pub async fn execute(args: RunArgs, mut config: ProbeConfig, format: OutputFormat) -> Result<bool> {
    if args.no_browser {
        config.browser.enabled = false;
    }
    let output_dir = args.output.clone().or_else(|| config.output_dir.clone());
    debug!(
        "Selection: tag={:?} name={:?} browser={} output={:?}",
        args.tag, args.name, config.browser.enabled, output_dir
    );

    let mut runner = TestRunner::new(config)?;
    let suite = match (&args.tag, &args.name) {
        (_, Some(name)) => runner.run_named(name).await?,
        (Some(tag), None) => runner.run_tagged(tag).await,
        (None, None) => runner.run_all().await,
    };

    if suite.total == 0 {
        print_info("No checks matched.");
    }

    report(&suite, format);

    if let Some(dir) = output_dir {
        runner.write_results(&dir, &suite)?;
    }

    Ok(suite.success())
}

fn report(suite: &TestSuiteResult, format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_value(suite, format),
        OutputFormat::Table | OutputFormat::Plain => {
            let rows: Vec<ResultDisplay> = suite.results.iter().map(ResultDisplay::from).collect();
            print_list(&rows, format);

            let summary = format!(
                "{} passed, {} failed, {} skipped ({} ms)",
                suite.passed, suite.failed, suite.skipped, suite.duration_ms
            );
            if suite.success() {
                print_success(&summary);
            } else {
                print_error(&summary);
            }
        }
    }
}
