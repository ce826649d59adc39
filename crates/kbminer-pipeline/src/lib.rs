// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mining pass orchestration.
//!
//! A pass fetches candidate tickets, drops the ones already in history,
//! opens one helpdesk session, and walks the rest one at a time:
//! generate a draft, create the article, record the id. Only database,
//! authentication, and history failures end a pass early; everything else
//! skips the ticket and leaves it for the next run.

pub mod filter;
pub mod pass;

pub use filter::{Selection, select_new};
pub use pass::MiningPass;
