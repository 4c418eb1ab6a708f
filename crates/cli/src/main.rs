//! FSx alarm provisioning CLI
//!
//! Lists the FSx file systems of a region, asks which file system and
//! volumes to cover, and creates the matching CloudWatch alarms.

mod input;
mod output;

use alarm_lib::{AwsProvider, ProvisionerConfig, Reporter, RunSummary};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// FSx alarm provisioning CLI
#[derive(Parser)]
#[command(name = "fsx-alarms")]
#[command(author, version, about = "Create CloudWatch alarms for FSx volumes and file systems", long_about = None)]
pub struct Cli {
    /// The AWS region where the FSx file system is located
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub region: String,
}

/// Log to stderr so records never interleave with prompts on stdout
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report_summary(reporter: &mut dyn Reporter, summary: &RunSummary) {
    if summary.file_system_id.is_none() {
        return;
    }

    let message = format!(
        "{} of {} alarms created",
        summary.created(),
        summary.attempted()
    );
    if summary.failed() == 0 {
        reporter.success(&message);
    } else {
        reporter.warning(&format!("{}, {} failed", message, summary.failed()));
    }
    reporter.info("Script execution completed.");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    info!(region = %cli.region, version = env!("CARGO_PKG_VERSION"), "Starting fsx-alarms");

    let config = ProvisionerConfig::load().context("Failed to load provisioning configuration")?;

    let mut reporter = output::TerminalReporter::stdout();
    reporter.info(&format!("Starting script with region: {}", cli.region));

    let provider = Arc::new(AwsProvider::new(&cli.region).await);
    let mut input = input::TerminalInput::stdin();

    let summary = alarm_lib::run(provider, config, &mut input, &mut reporter)
        .await
        .context("Provisioning aborted")?;

    report_summary(&mut reporter, &summary);

    Ok(())
}
