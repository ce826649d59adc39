// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end mining pass tests over mock adapters.

use std::time::Duration;

use kbminer_core::{KbError, RunOutcome, RunSummary};
use kbminer_test_utils::{
    GeneratorReply, MockGenerator, MockKnowledgeBase, TestHarness, ticket,
};
use tracing_test::traced_test;

fn completed(outcome: RunOutcome) -> RunSummary {
    match outcome {
        RunOutcome::Completed(summary) => summary,
        other => panic!("expected a completed pass, got {other:?}"),
    }
}

#[tokio::test]
async fn created_article_is_recorded_once() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(101, "WhatsApp down")])
        .with_generator(MockGenerator::new().with_reply(
            101,
            GeneratorReply::article("Fix WhatsApp outage", "<p>Restart the gateway</p>"),
        ))
        .build()
        .await
        .unwrap();

    let summary = completed(harness.run().await.unwrap());

    assert_eq!(summary.created, 1);
    assert_eq!(harness.history_lines().await, vec!["101"]);
    let created = harness.knowledge_base.created().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].source_ticket_id, 101);
    assert_eq!(created[0].title, "Fix WhatsApp outage");
    assert_eq!(harness.knowledge_base.sessions_closed(), 1);
}

#[tokio::test]
async fn ignored_ticket_is_not_created_or_recorded() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(102, "Quarterly planning meeting")])
        .with_generator(MockGenerator::new().with_reply(102, GeneratorReply::ignore()))
        .build()
        .await
        .unwrap();

    let summary = completed(harness.run().await.unwrap());

    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.created, 0);
    assert_eq!(harness.knowledge_base.create_attempts(), 0);
    assert!(harness.history_lines().await.is_empty());
}

#[tokio::test]
async fn rejected_auth_processes_nothing() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(103, "Printer offline"), ticket(104, "VPN drops")])
        .with_knowledge_base(MockKnowledgeBase::new().rejecting_auth())
        .build()
        .await
        .unwrap();

    let err = harness.run().await.unwrap_err();

    assert!(matches!(err, KbError::Auth { .. }));
    assert!(err.is_fatal());
    assert!(harness.generator.seen().await.is_empty());
    assert!(harness.history_lines().await.is_empty());
}

#[tokio::test]
async fn known_ticket_never_reaches_the_generator() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(200, "Email bouncing"), ticket(201, "Disk full")])
        .with_history(&["200"])
        .build()
        .await
        .unwrap();

    let summary = completed(harness.run().await.unwrap());

    assert_eq!(harness.generator.seen().await, vec![201]);
    assert_eq!(summary.already_processed, 1);
    assert_eq!(summary.candidates, 1);
    assert_eq!(harness.history_lines().await, vec!["200", "201"]);
}

#[tokio::test]
async fn all_known_is_nothing_new_without_session() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(300, "Email bouncing")])
        .with_history(&["300"])
        .build()
        .await
        .unwrap();

    let outcome = harness.run().await.unwrap();

    assert_eq!(outcome, RunOutcome::NothingNew { fetched: 1 });
    assert_eq!(harness.knowledge_base.sessions_opened(), 0);
}

#[tokio::test]
async fn empty_fetch_is_nothing_new() {
    let harness = TestHarness::builder().build().await.unwrap();
    assert_eq!(
        harness.run().await.unwrap(),
        RunOutcome::NothingNew { fetched: 0 }
    );
}

#[tokio::test]
async fn failures_skip_ticket_and_continue() {
    let harness = TestHarness::builder()
        .with_tickets(vec![
            ticket(401, "Unparsable reply"),
            ticket(402, "Provider timeout"),
            ticket(403, "Helpdesk rejects"),
            ticket(404, "Works fine"),
        ])
        .with_generator(
            MockGenerator::new()
                .with_reply(401, GeneratorReply::Unusable)
                .with_reply(402, GeneratorReply::ProviderError),
        )
        .with_knowledge_base(MockKnowledgeBase::new().failing_for(403))
        .build()
        .await
        .unwrap();

    let summary = completed(harness.run().await.unwrap());

    assert_eq!(summary.failed, 3);
    assert_eq!(summary.created, 1);
    assert_eq!(harness.generator.seen().await, vec![401, 402, 403, 404]);
    assert_eq!(harness.history_lines().await, vec!["404"]);
    assert_eq!(harness.knowledge_base.sessions_closed(), 1);
}

#[tokio::test]
async fn database_failure_aborts_before_session() {
    let harness = TestHarness::builder()
        .with_failing_source()
        .build()
        .await
        .unwrap();

    let err = harness.run().await.unwrap_err();

    assert!(matches!(err, KbError::Database { .. }));
    assert_eq!(harness.knowledge_base.sessions_opened(), 0);
}

#[tokio::test]
async fn ticket_limit_reaches_the_source() {
    let harness = TestHarness::builder()
        .with_tickets((1..=5).map(|id| ticket(id, "Password reset")).collect())
        .with_ticket_limit(2)
        .build()
        .await
        .unwrap();

    let summary = completed(harness.run().await.unwrap());

    assert_eq!(harness.source.requested_limits().await, vec![2]);
    assert_eq!(summary.fetched, 2);
}

#[tokio::test]
async fn second_run_skips_what_the_first_created() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(500, "Shared drive unmapped")])
        .build()
        .await
        .unwrap();

    completed(harness.run().await.unwrap());
    let second = harness.run().await.unwrap();

    assert_eq!(second, RunOutcome::NothingNew { fetched: 1 });
    assert_eq!(harness.history_lines().await, vec!["500"]);
}

#[tokio::test]
async fn repeated_id_in_one_batch_is_processed_once() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(600, "Wi-Fi down"), ticket(600, "Wi-Fi down")])
        .build()
        .await
        .unwrap();

    let summary = completed(harness.run().await.unwrap());

    assert_eq!(summary.candidates, 1);
    assert_eq!(harness.history_lines().await, vec!["600"]);
}

#[tokio::test]
#[traced_test]
async fn pass_logs_progress() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(700, "Outlook crashes")])
        .build()
        .await
        .unwrap();

    harness.run().await.unwrap();

    assert!(logs_contain("history filter applied"));
    assert!(logs_contain("knowledge-base article created"));
    assert!(logs_contain("mining pass finished"));
}

#[tokio::test(start_paused = true)]
async fn delay_is_applied_between_tickets_only() {
    let harness = TestHarness::builder()
        .with_tickets(vec![
            ticket(301, "VPN drops"),
            ticket(302, "Printer offline"),
            ticket(303, "Mailbox full"),
        ])
        .with_ticket_delay(Duration::from_secs(3))
        .build()
        .await
        .unwrap();

    let start = tokio::time::Instant::now();
    let summary = completed(harness.run().await.unwrap());

    assert_eq!(summary.created, 3);
    assert_eq!(start.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn single_ticket_is_not_delayed() {
    let harness = TestHarness::builder()
        .with_tickets(vec![ticket(304, "VPN drops")])
        .with_ticket_delay(Duration::from_secs(3))
        .build()
        .await
        .unwrap();

    let start = tokio::time::Instant::now();
    let summary = completed(harness.run().await.unwrap());

    assert_eq!(summary.created, 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}
