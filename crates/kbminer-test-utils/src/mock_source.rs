// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock ticket source with a fixed batch.

use std::sync::Arc;

use async_trait::async_trait;
use kbminer_core::{KbError, Ticket, TicketSource};
use tokio::sync::Mutex;

/// Build a ticket with a plausible resolution text.
pub fn ticket(id: i64, title: &str) -> Ticket {
    Ticket {
        id,
        title: title.to_string(),
        resolution: format!("Resolution applied for ticket {id}: restarted the affected service."),
    }
}

/// Returns the same tickets on every fetch, truncated to the requested limit.
pub struct MockTicketSource {
    tickets: Vec<Ticket>,
    fail: bool,
    limits: Arc<Mutex<Vec<u32>>>,
}

impl MockTicketSource {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets,
            fail: false,
            limits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A source whose every fetch fails like an unreachable database.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Limits passed to each fetch, in call order.
    pub async fn requested_limits(&self) -> Vec<u32> {
        self.limits.lock().await.clone()
    }
}

#[async_trait]
impl TicketSource for MockTicketSource {
    fn name(&self) -> &str {
        "mock-source"
    }

    async fn fetch_candidates(&self, limit: u32) -> Result<Vec<Ticket>, KbError> {
        self.limits.lock().await.push(limit);
        if self.fail {
            return Err(KbError::Database {
                message: "mock database unreachable".into(),
                source: None,
            });
        }
        Ok(self
            .tickets
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
