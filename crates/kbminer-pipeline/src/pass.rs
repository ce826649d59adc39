// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single mining pass over the newest resolved tickets.

use std::sync::Arc;
use std::time::Duration;

use kbminer_config::model::MinerConfig;
use kbminer_core::{
    ArticleDraft, ArticleGenerator, KbError, KnowledgeBase, RunOutcome, RunSummary, SessionToken,
    Ticket, TicketSource,
};
use kbminer_storage::HistoryStore;
use tracing::{debug, info, warn};

use crate::filter::select_new;

/// What happened to one ticket inside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TicketOutcome {
    Created,
    Ignored,
    Failed,
}

/// Wires the three adapters together and drives one pass.
pub struct MiningPass {
    source: Arc<dyn TicketSource>,
    generator: Arc<dyn ArticleGenerator>,
    knowledge_base: Arc<dyn KnowledgeBase>,
    ticket_limit: u32,
    ticket_delay: Duration,
}

impl MiningPass {
    pub fn new(
        source: Arc<dyn TicketSource>,
        generator: Arc<dyn ArticleGenerator>,
        knowledge_base: Arc<dyn KnowledgeBase>,
        miner: &MinerConfig,
    ) -> Self {
        Self {
            source,
            generator,
            knowledge_base,
            ticket_limit: miner.ticket_limit,
            ticket_delay: Duration::from_secs(miner.ticket_delay_secs),
        }
    }

    /// Override the pause between tickets.
    pub fn with_ticket_delay(mut self, delay: Duration) -> Self {
        self.ticket_delay = delay;
        self
    }

    /// Run the pass against `history`.
    ///
    /// Returns `Err` only for fatal failures: fetching, authentication, or
    /// writing history. The session, once opened, is always closed.
    pub async fn run(&self, history: &mut HistoryStore) -> Result<RunOutcome, KbError> {
        info!(
            source = self.source.name(),
            limit = self.ticket_limit,
            "fetching candidate tickets"
        );
        let fetched = self.source.fetch_candidates(self.ticket_limit).await?;
        let fetched_count = fetched.len();

        let selection = select_new(fetched, history);
        if selection.duplicates > 0 {
            debug!(count = selection.duplicates, "dropped repeated ticket ids");
        }
        info!(
            fetched = fetched_count,
            already_processed = selection.already_processed,
            new = selection.pending.len(),
            "history filter applied"
        );

        if selection.pending.is_empty() {
            info!("no new tickets to process");
            return Ok(RunOutcome::NothingNew {
                fetched: fetched_count,
            });
        }

        let session = self.knowledge_base.init_session().await?;

        let mut summary = RunSummary {
            fetched: fetched_count,
            already_processed: selection.already_processed,
            candidates: selection.pending.len(),
            ..RunSummary::default()
        };
        let result = self
            .process_all(&session, &selection.pending, history, &mut summary)
            .await;

        if let Err(e) = self.knowledge_base.kill_session(&session).await {
            warn!(error = %e, "failed to close helpdesk session");
        }

        result?;
        info!(
            created = summary.created,
            ignored = summary.ignored,
            failed = summary.failed,
            "mining pass finished"
        );
        Ok(RunOutcome::Completed(summary))
    }

    async fn process_all(
        &self,
        session: &SessionToken,
        pending: &[Ticket],
        history: &mut HistoryStore,
        summary: &mut RunSummary,
    ) -> Result<(), KbError> {
        for (index, ticket) in pending.iter().enumerate() {
            if index > 0 && !self.ticket_delay.is_zero() {
                tokio::time::sleep(self.ticket_delay).await;
            }

            match self.process_ticket(session, ticket, history).await? {
                TicketOutcome::Created => summary.created += 1,
                TicketOutcome::Ignored => summary.ignored += 1,
                TicketOutcome::Failed => summary.failed += 1,
            }
        }
        Ok(())
    }

    async fn process_ticket(
        &self,
        session: &SessionToken,
        ticket: &Ticket,
        history: &mut HistoryStore,
    ) -> Result<TicketOutcome, KbError> {
        let draft = match self.generator.generate(ticket).await {
            Ok(Some(draft)) => draft,
            Ok(None) => {
                warn!(ticket_id = ticket.id, "no usable article in AI reply, skipping");
                return Ok(TicketOutcome::Failed);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(ticket_id = ticket.id, error = %e, "article generation failed, skipping");
                return Ok(TicketOutcome::Failed);
            }
        };

        let (title, content) = match draft {
            ArticleDraft::Ignore => {
                info!(ticket_id = ticket.id, "not an incident, ignored");
                return Ok(TicketOutcome::Ignored);
            }
            ArticleDraft::Article { title, content } => (title, content),
        };

        match self
            .knowledge_base
            .create_article(session, &title, &content, ticket.id)
            .await
        {
            Ok(created) => {
                history.record(&ticket.history_key()).await?;
                info!(
                    ticket_id = ticket.id,
                    article_id = created.id,
                    title = %title,
                    "knowledge-base article created"
                );
                Ok(TicketOutcome::Created)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(ticket_id = ticket.id, error = %e, "article creation failed, skipping");
                Ok(TicketOutcome::Failed)
            }
        }
    }
}
