// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for kbminer integration tests.
//!
//! Provides scripted adapters and a harness that runs a complete mining
//! pass against a temporary history file, with no database, AI endpoint,
//! or helpdesk involved.
//!
//! # Components
//!
//! - [`MockTicketSource`] - fixed ticket batch, or a database failure
//! - [`MockGenerator`] - per-ticket scripted AI replies
//! - [`MockKnowledgeBase`] - records sessions and created articles
//! - [`TestHarness`] - builder that wires the mocks into a `MiningPass`

pub mod harness;
pub mod mock_generator;
pub mod mock_knowledge_base;
pub mod mock_source;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_generator::{GeneratorReply, MockGenerator};
pub use mock_knowledge_base::{CreatedRecord, MockKnowledgeBase};
pub use mock_source::{MockTicketSource, ticket};
