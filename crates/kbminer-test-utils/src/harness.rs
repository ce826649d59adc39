// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end mining pass tests.
//!
//! `TestHarness` wires the mock adapters into a [`MiningPass`] with a
//! history file in a temporary directory. There is no delay between tickets
//! unless one is requested.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kbminer_config::model::MinerConfig;
use kbminer_core::{KbError, RunOutcome, Ticket};
use kbminer_pipeline::MiningPass;
use kbminer_storage::HistoryStore;

use crate::mock_generator::MockGenerator;
use crate::mock_knowledge_base::MockKnowledgeBase;
use crate::mock_source::MockTicketSource;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    tickets: Vec<Ticket>,
    failing_source: bool,
    generator: MockGenerator,
    knowledge_base: MockKnowledgeBase,
    history: Vec<String>,
    miner: MinerConfig,
    ticket_delay: Duration,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            tickets: Vec::new(),
            failing_source: false,
            generator: MockGenerator::new(),
            knowledge_base: MockKnowledgeBase::new(),
            history: Vec::new(),
            miner: MinerConfig::default(),
            ticket_delay: Duration::ZERO,
        }
    }

    /// Tickets the source returns, in fetch order.
    pub fn with_tickets(mut self, tickets: Vec<Ticket>) -> Self {
        self.tickets = tickets;
        self
    }

    /// Make the ticket fetch fail.
    pub fn with_failing_source(mut self) -> Self {
        self.failing_source = true;
        self
    }

    pub fn with_generator(mut self, generator: MockGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_knowledge_base(mut self, knowledge_base: MockKnowledgeBase) -> Self {
        self.knowledge_base = knowledge_base;
        self
    }

    /// Ids already present in the history file before the pass.
    pub fn with_history(mut self, ids: &[&str]) -> Self {
        self.history = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_ticket_limit(mut self, limit: u32) -> Self {
        self.miner.ticket_limit = limit;
        self
    }

    /// Pause between tickets. Pair with a paused tokio clock.
    pub fn with_ticket_delay(mut self, delay: Duration) -> Self {
        self.ticket_delay = delay;
        self
    }

    /// Build the harness, seeding the history file if requested.
    pub async fn build(self) -> Result<TestHarness, KbError> {
        let temp_dir = tempfile::TempDir::new()?;
        let history_path = temp_dir.path().join("processed_tickets.txt");
        if !self.history.is_empty() {
            let mut seed = self.history.join("\n");
            seed.push('\n');
            tokio::fs::write(&history_path, seed).await?;
        }

        let source = Arc::new(if self.failing_source {
            MockTicketSource::failing()
        } else {
            MockTicketSource::new(self.tickets)
        });
        let generator = Arc::new(self.generator);
        let knowledge_base = Arc::new(self.knowledge_base);

        let pass = MiningPass::new(
            source.clone(),
            generator.clone(),
            knowledge_base.clone(),
            &self.miner,
        )
        .with_ticket_delay(self.ticket_delay);

        Ok(TestHarness {
            source,
            generator,
            knowledge_base,
            pass,
            history_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A mining pass over mock adapters plus a temp history file.
pub struct TestHarness {
    pub source: Arc<MockTicketSource>,
    pub generator: Arc<MockGenerator>,
    pub knowledge_base: Arc<MockKnowledgeBase>,
    pass: MiningPass,
    history_path: PathBuf,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Load history from disk and run one pass, as the binary does.
    pub async fn run(&self) -> Result<RunOutcome, KbError> {
        let mut history = HistoryStore::load(&self.history_path).await?;
        self.pass.run(&mut history).await
    }

    /// Raw history file lines. Empty if the file was never written.
    pub async fn history_lines(&self) -> Vec<String> {
        match tokio::fs::read_to_string(&self.history_path).await {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}
