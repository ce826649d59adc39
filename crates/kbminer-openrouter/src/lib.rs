// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI article generator for kbminer.
//!
//! Implements [`ArticleGenerator`] on top of an OpenAI-compatible
//! chat-completions endpoint (OpenRouter by default). One ticket is one
//! request with one user message; the reply is mined for a JSON object and
//! interpreted as an article or an ignore decision.

pub mod client;
pub mod extract;
pub mod prompt;
pub mod types;

use async_trait::async_trait;
use kbminer_config::model::AiConfig;
use kbminer_core::{ArticleDraft, ArticleGenerator, KbError, Ticket};
use tracing::{debug, info, warn};

use crate::client::OpenRouterClient;
use crate::types::{ChatMessage, ChatRequest};

pub use extract::{extract_json_smart, parse_article};

/// Titles longer than this are cut in log lines.
const LOG_TITLE_CHARS: usize = 60;

/// Turns resolved tickets into article drafts.
pub struct OpenRouterGenerator {
    client: OpenRouterClient,
    model: Option<String>,
    temperature: f32,
}

impl OpenRouterGenerator {
    pub fn new(config: &AiConfig) -> Result<Self, KbError> {
        Ok(Self {
            client: OpenRouterClient::new(config)?,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn build_request(&self, ticket: &Ticket) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt::build_prompt(ticket))],
            temperature: self.temperature,
        }
    }
}

fn truncate_title(title: &str) -> &str {
    match title.char_indices().nth(LOG_TITLE_CHARS) {
        Some((idx, _)) => &title[..idx],
        None => title,
    }
}

#[async_trait]
impl ArticleGenerator for OpenRouterGenerator {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate(&self, ticket: &Ticket) -> Result<Option<ArticleDraft>, KbError> {
        info!(
            ticket_id = ticket.id,
            title = truncate_title(&ticket.title),
            "analyzing ticket"
        );

        let reply = self.client.complete(&self.build_request(ticket)).await?;
        debug!(ticket_id = ticket.id, chars = reply.len(), "model replied");

        let Some(object) = extract_json_smart(&reply) else {
            warn!(ticket_id = ticket.id, "no JSON object in model reply");
            return Ok(None);
        };

        let draft = parse_article(&object);
        if draft.is_none() {
            warn!(ticket_id = ticket.id, "model reply lacks title or content");
        }
        Ok(draft)
    }
}
