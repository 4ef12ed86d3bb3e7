mod app_system;
mod config;
mod domain;
mod error;
mod refresher;
mod store;

#[cfg(test)]
mod mock_framework;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use crate::app_system::{refresh_stock, setup_tracing};
use crate::config::Config;
use crate::domain::RefreshReport;
use crate::error::RefreshError;

/// Process exit status for a finished run: 0 on success, 1 on any error.
fn exit_status(outcome: &Result<RefreshReport, RefreshError>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_tracing();
    let config = Config::parse();

    let outcome = refresh_stock(&config).await;
    match &outcome {
        Ok(report) => {
            info!(
                updated = report.updated,
                zero_before = report.before.zero_or_missing,
                zero_after = report.after.zero_or_missing,
                in_stock = report.stats.in_stock,
                "Stock refresh completed"
            );
        }
        Err(e) => {
            error!(error = %e, "Stock refresh failed");
            println!("Error: {}", e);
        }
    }

    ExitCode::from(exit_status(&outcome))
}
