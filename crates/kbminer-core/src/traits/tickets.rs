// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source of resolved tickets to mine.

use async_trait::async_trait;

use crate::error::KbError;
use crate::types::Ticket;

/// Read-only access to recently resolved incident tickets.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Short adapter name used in log output.
    fn name(&self) -> &str;

    /// Returns up to `limit` candidate tickets, most recently closed first.
    ///
    /// Any error here is fatal for the pass.
    async fn fetch_candidates(&self, limit: u32) -> Result<Vec<Ticket>, KbError>;
}
