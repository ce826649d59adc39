// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for kbminer.
//!
//! Error bodies returned by the AI endpoint and the helpdesk API are logged
//! verbatim for the operator, so they pass through [`redact`] first.

pub mod redact;

pub use redact::{REDACTED, redact};
