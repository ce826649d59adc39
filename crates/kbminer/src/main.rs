// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! kbminer - turns resolved helpdesk tickets into draft knowledge-base articles.
//!
//! One invocation is one mining pass. Scheduling is left to cron or a
//! systemd timer.

mod run;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

/// Mine resolved helpdesk tickets into unpublished knowledge-base drafts.
///
/// Settings come from kbminer.toml, a .env file, or the environment.
#[derive(Parser, Debug)]
#[command(name = "kbminer", version, about, long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();

    if let Some(warning) = kbminer_config::load_dotenv() {
        eprintln!("kbminer: {warning}");
    }
    let config = match kbminer_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            kbminer_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.miner.log_level);

    println!("{}", run::START_BANNER);
    let result = run::run(&config).await;

    let code = match &result {
        Ok(outcome) => {
            for line in run::outcome_lines(outcome) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "mining pass aborted");
            ExitCode::FAILURE
        }
    };

    println!();
    println!("{}", run::CLOSING_BANNER);
    println!("{}", run::REVIEW_HINT);
    if let Err(e) = result {
        eprintln!("kbminer: fatal: {e}");
    }
    code
}

/// Install the fmt subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kbminer={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
