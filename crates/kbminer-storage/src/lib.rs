// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local persistence for kbminer.
//!
//! The only durable state is a newline-delimited file of ticket identifiers
//! whose articles were created. It is loaded into a set at startup and only
//! ever appended to.

pub mod history;

pub use history::HistoryStore;
