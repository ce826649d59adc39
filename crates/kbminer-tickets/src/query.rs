// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The candidate-ticket query.
//!
//! Selects closed (`status = 6`), non-deleted tickets joined to their
//! solution text, newest close date first. Every variable part is a bound
//! parameter; exclusion patterns are never spliced into the SQL.

/// GLPI status code for a closed ticket.
const STATUS_CLOSED: i32 = 6;

/// Query text plus the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub sql: String,
    pub min_resolution_len: u32,
    pub excluded_title_patterns: Vec<String>,
    pub limit: u32,
}

impl CandidateQuery {
    /// Build the query for the given filters.
    ///
    /// Title exclusion is a case-sensitive substring test: `INSTR` over a
    /// `BINARY` operand so the column collation does not fold case.
    pub fn new(min_resolution_len: u32, excluded_title_patterns: &[String], limit: u32) -> Self {
        let mut sql = format!(
            "SELECT CAST(t.id AS SIGNED) AS id, \
             COALESCE(t.name, '') AS title, \
             s.content AS resolution \
             FROM glpi_tickets t \
             JOIN glpi_itilsolutions s ON s.items_id = t.id AND s.itemtype = 'Ticket' \
             WHERE t.status = {STATUS_CLOSED} \
             AND t.is_deleted = 0 \
             AND LENGTH(s.content) > ?"
        );
        for _ in excluded_title_patterns {
            sql.push_str(" AND INSTR(BINARY COALESCE(t.name, ''), ?) = 0");
        }
        sql.push_str(" ORDER BY t.closedate DESC LIMIT ?");

        Self {
            sql,
            min_resolution_len,
            excluded_title_patterns: excluded_title_patterns.to_vec(),
            limit,
        }
    }

    /// Number of `?` placeholders the SQL expects.
    pub fn placeholder_count(&self) -> usize {
        self.excluded_title_patterns.len() + 2
    }
}
