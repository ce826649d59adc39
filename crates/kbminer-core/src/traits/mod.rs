// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the three external services a mining pass talks to.
//!
//! All adapters use `#[async_trait]` so the pipeline can hold them as
//! `Arc<dyn Trait>` and tests can swap in mocks.

pub mod generator;
pub mod knowledge_base;
pub mod tickets;

pub use generator::ArticleGenerator;
pub use knowledge_base::KnowledgeBase;
pub use tickets::TicketSource;
