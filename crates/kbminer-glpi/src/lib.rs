// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GLPI knowledge-base adapter for kbminer.
//!
//! Opens a REST session with the application and user tokens, creates
//! inactive `KnowbaseItem` drafts, and closes the session.

pub mod client;
pub mod types;

pub use client::{GlpiClient, attribution_footer};
