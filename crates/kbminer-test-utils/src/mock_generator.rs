// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock article generator with per-ticket scripted replies.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kbminer_core::{ArticleDraft, ArticleGenerator, KbError, Ticket};
use tokio::sync::Mutex;

/// What the mock answers for a given ticket.
#[derive(Debug, Clone)]
pub enum GeneratorReply {
    Draft(ArticleDraft),
    /// Reply that held no usable JSON.
    Unusable,
    /// Transport or HTTP failure.
    ProviderError,
}

impl GeneratorReply {
    pub fn article(title: &str, content: &str) -> Self {
        GeneratorReply::Draft(ArticleDraft::Article {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    pub fn ignore() -> Self {
        GeneratorReply::Draft(ArticleDraft::Ignore)
    }
}

/// Unscripted tickets get a generic article named after the ticket.
#[derive(Default)]
pub struct MockGenerator {
    replies: HashMap<i64, GeneratorReply>,
    seen: Arc<Mutex<Vec<i64>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, ticket_id: i64, reply: GeneratorReply) -> Self {
        self.replies.insert(ticket_id, reply);
        self
    }

    /// Ticket ids passed to `generate`, in call order.
    pub async fn seen(&self) -> Vec<i64> {
        self.seen.lock().await.clone()
    }
}

#[async_trait]
impl ArticleGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    async fn generate(&self, ticket: &Ticket) -> Result<Option<ArticleDraft>, KbError> {
        self.seen.lock().await.push(ticket.id);
        match self.replies.get(&ticket.id) {
            Some(GeneratorReply::Draft(draft)) => Ok(Some(draft.clone())),
            Some(GeneratorReply::Unusable) => Ok(None),
            Some(GeneratorReply::ProviderError) => Err(KbError::Provider {
                message: "mock provider returned 500".into(),
                source: None,
            }),
            None => Ok(Some(ArticleDraft::Article {
                title: format!("How to fix: {}", ticket.title),
                content: format!("<p>{}</p>", ticket.resolution),
            })),
        }
    }
}
