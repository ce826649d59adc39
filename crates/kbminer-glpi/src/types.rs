// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GLPI REST API wire types.

use serde::{Deserialize, Serialize};

/// Body of a successful `initSession` call.
#[derive(Debug, Clone, Deserialize)]
pub struct InitSessionResponse {
    pub session_token: String,
}

/// Envelope for item creation: GLPI expects the fields under `input`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest<T> {
    pub input: T,
}

/// A knowledge-base article as submitted to `POST /KnowbaseItem`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KnowbaseItemInput {
    pub name: String,
    /// HTML body.
    pub answer: String,
    pub is_faq: u8,
    pub is_active: u8,
}

impl KnowbaseItemInput {
    /// Drafts are never FAQ entries and start unpublished for human review.
    pub fn draft(name: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answer: answer.into(),
            is_faq: 0,
            is_active: 0,
        }
    }
}

/// Body of a `201 Created` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResponse {
    pub id: u64,
    #[serde(default)]
    pub message: Option<String>,
}
