// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpdesk database access for kbminer.
//!
//! Implements [`TicketSource`](kbminer_core::TicketSource) over a direct
//! MySQL connection to the GLPI schema. The connection is opened for one
//! query and closed again; nothing is held between passes.

pub mod query;
pub mod source;

pub use query::CandidateQuery;
pub use source::MySqlTicketSource;
