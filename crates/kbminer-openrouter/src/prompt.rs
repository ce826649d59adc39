// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instruction prompt sent with every ticket.

use kbminer_core::Ticket;

const ARTICLE_PROMPT: &str = r#"Act as an IT documentation specialist.
Analyze this resolved ticket and write a knowledge-base article from it.

PROBLEM: {title}
APPLIED SOLUTION: {resolution}

RULES:
1. Is it an INCIDENT? (e.g. WhatsApp down, 404 error, printer offline) -> PRODUCE THE JSON.
2. Is it a PROJECT, MEETING or TASK? -> RETURN {"ignore": true}.

JSON FORMAT:
{
    "title": "Explanatory title (e.g. How to fix the WhatsApp outage)",
    "content": "<p>Step-by-step instructions formatted as HTML...</p>",
    "ignore": false
}"#;

/// Render the prompt for `ticket`.
///
/// The ticket text is substituted as-is; nothing is escaped.
pub fn build_prompt(ticket: &Ticket) -> String {
    ARTICLE_PROMPT
        .replace("{title}", &ticket.title)
        .replace("{resolution}", &ticket.resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket {
            id: 12,
            title: "WhatsApp down".into(),
            resolution: "Restarted the messaging gateway and re-linked the device".into(),
        }
    }

    #[test]
    fn prompt_embeds_title_and_resolution() {
        let prompt = build_prompt(&ticket());
        assert!(prompt.contains("PROBLEM: WhatsApp down"));
        assert!(prompt.contains(
            "APPLIED SOLUTION: Restarted the messaging gateway and re-linked the device"
        ));
        assert!(!prompt.contains("{title}"));
        assert!(!prompt.contains("{resolution}"));
    }

    #[test]
    fn prompt_describes_the_reply_contract() {
        let prompt = build_prompt(&ticket());
        assert!(prompt.contains(r#"{"ignore": true}"#));
        assert!(prompt.contains(r#""title":"#));
        assert!(prompt.contains(r#""content":"#));
    }
}
