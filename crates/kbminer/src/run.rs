// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter wiring for one mining pass, plus the operator-facing report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kbminer_config::KbMinerConfig;
use kbminer_core::{KbError, RunOutcome};
use kbminer_glpi::GlpiClient;
use kbminer_openrouter::OpenRouterGenerator;
use kbminer_pipeline::MiningPass;
use kbminer_storage::HistoryStore;
use kbminer_tickets::MySqlTicketSource;
use tracing::{info, warn};

pub const START_BANNER: &str = "--- kbminer: starting mining pass ---";
pub const CLOSING_BANNER: &str = "--- kbminer: pass finished ---";
pub const REVIEW_HINT: &str =
    "Review drafts in the helpdesk under Knowledge base, filtered by unpublished articles.";

/// Load history, build the real adapters, and run one pass.
pub async fn run(config: &KbMinerConfig) -> Result<RunOutcome, KbError> {
    let history_path = config.history.resolve(&executable_dir());
    let mut history = HistoryStore::load(&history_path).await?;
    println!("[history] {} tickets already processed", history.len());
    info!(
        path = %history.path().display(),
        entries = history.len(),
        "history loaded"
    );

    let source = Arc::new(MySqlTicketSource::new(&config.database, &config.miner));
    let generator = Arc::new(OpenRouterGenerator::new(&config.ai)?);
    let knowledge_base = Arc::new(GlpiClient::new(&config.glpi)?);

    let pass = MiningPass::new(source, generator, knowledge_base, &config.miner);
    pass.run(&mut history).await
}

/// Directory of the running executable, which anchors a relative history path.
///
/// Falls back to the working directory when the executable path is unknown.
fn executable_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf).unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "executable path unknown, history is relative to the working directory");
            PathBuf::new()
        }
    }
}

/// Summary lines printed after a successful pass.
pub fn outcome_lines(outcome: &RunOutcome) -> Vec<String> {
    match outcome {
        RunOutcome::NothingNew { fetched } => vec![
            format!("[database] {fetched} recent tickets analyzed"),
            "Nothing new to process today.".to_string(),
        ],
        RunOutcome::Completed(summary) => vec![
            format!("[database] {} recent tickets analyzed", summary.fetched),
            format!("[filter] {} new tickets sent to the AI", summary.candidates),
            format!(
                "[result] {} drafts created, {} ignored, {} failed",
                summary.created, summary.ignored, summary.failed
            ),
        ],
    }
}
