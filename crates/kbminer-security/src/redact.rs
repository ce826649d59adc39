// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Regex-based**: known credential shapes (API keys, bearer and helpdesk tokens).
//! 2. **Exact-match**: the configured secrets themselves.

use std::sync::LazyLock;

use regex::Regex;

/// Known secret patterns to redact from output.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // OpenRouter keys: sk-or-v1-...
        r"sk-or-v1-[a-zA-Z0-9]{16,}",
        // Generic secret keys: sk-...
        r"sk-[a-zA-Z0-9_\-]{20,}",
        // Bearer tokens in headers
        r"Bearer\s+[a-zA-Z0-9._\-]{10,}",
        // Helpdesk user tokens: `Authorization: user_token <token>`
        r"user_token\s+[a-zA-Z0-9]{10,}",
        // Session tokens echoed back in JSON bodies
        r#""session_token"\s*:\s*"[^"]+""#,
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Redact secrets from a string using regex patterns and exact configured values.
pub fn redact(input: &str, secrets: &[&str]) -> String {
    let mut result = input.to_string();

    for pattern in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).into_owned();
    }

    // Longest first so a secret containing another is replaced whole.
    let mut sorted: Vec<&str> = secrets.iter().copied().filter(|s| !s.is_empty()).collect();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.len()));
    for secret in sorted {
        result = result.replace(secret, REDACTED);
    }

    result
}
