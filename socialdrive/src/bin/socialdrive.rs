use anyhow::Result;
use clap::Parser;
use socialdrive::prelude::*;
use socialdrive::telemetry;
use socialdrive_core::DEFAULT_ADDRESS;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Drive a social-network service through a fixed workflow of accounts, follows, posts and
/// messages.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Service address, `host:port` or an http(s) URL.
    address: Option<String>,

    /// Also append logs to this file.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init(cli.log_file.as_deref())?;

    let address = match cli.address {
        Some(address) => {
            info!("Target given on the command line: {address}");
            address
        }
        None => {
            info!("Using default target: {DEFAULT_ADDRESS}");
            DEFAULT_ADDRESS.to_string()
        }
    };

    let summary = drive(&address, WorkflowConfig::default(), TracingReporter, RandomSuffix).await?;

    for phase in summary.phases() {
        info!("{phase}");
    }

    match &summary.abort_reason {
        Some(reason) => {
            error!("Run aborted: {reason}");
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
