// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MySQL-backed [`TicketSource`].

use async_trait::async_trait;
use kbminer_config::model::{DatabaseConfig, MinerConfig};
use kbminer_core::{KbError, Ticket, TicketSource};
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use crate::query::CandidateQuery;

#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i64,
    title: String,
    resolution: String,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            title: row.title,
            resolution: row.resolution,
        }
    }
}

/// Reads candidate tickets straight from the helpdesk database.
///
/// Host and port come from configuration; no tunnel is involved.
pub struct MySqlTicketSource {
    options: MySqlConnectOptions,
    min_resolution_len: u32,
    excluded_title_patterns: Vec<String>,
}

impl MySqlTicketSource {
    pub fn new(database: &DatabaseConfig, miner: &MinerConfig) -> Self {
        Self {
            options: connect_options(database),
            min_resolution_len: miner.min_resolution_len,
            excluded_title_patterns: miner.excluded_title_patterns.clone(),
        }
    }
}

/// Translate config into connect options. Unset credentials keep sqlx defaults.
fn connect_options(database: &DatabaseConfig) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .host(&database.host)
        .port(database.port);
    if let Some(user) = &database.user {
        options = options.username(user);
    }
    if let Some(password) = &database.password {
        options = options.password(password);
    }
    if let Some(name) = &database.name {
        options = options.database(name);
    }
    options
}

fn database_error(message: &str, e: sqlx::Error) -> KbError {
    KbError::Database {
        message: format!("{message}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl TicketSource for MySqlTicketSource {
    fn name(&self) -> &str {
        "mysql"
    }

    async fn fetch_candidates(&self, limit: u32) -> Result<Vec<Ticket>, KbError> {
        let query =
            CandidateQuery::new(self.min_resolution_len, &self.excluded_title_patterns, limit);

        let mut conn = self
            .options
            .connect()
            .await
            .map_err(|e| database_error("failed to connect to helpdesk database", e))?;
        debug!(host = self.options.get_host(), "database connection opened");

        let mut statement =
            sqlx::query_as::<_, TicketRow>(&query.sql).bind(query.min_resolution_len);
        for pattern in &query.excluded_title_patterns {
            statement = statement.bind(pattern.as_str());
        }
        let rows = statement
            .bind(query.limit)
            .fetch_all(&mut conn)
            .await
            .map_err(|e| database_error("candidate ticket query failed", e))?;

        if let Err(e) = conn.close().await {
            debug!(error = %e, "error closing database connection");
        }

        info!(count = rows.len(), "candidate tickets fetched");
        Ok(rows.into_iter().map(Ticket::from).collect())
    }
}
