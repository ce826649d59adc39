// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History filtering of fetched tickets.

use std::collections::HashSet;

use kbminer_core::Ticket;
use kbminer_storage::HistoryStore;

/// Result of splitting a fetched batch against history.
#[derive(Debug, Default)]
pub struct Selection {
    /// Tickets to process, in fetch order.
    pub pending: Vec<Ticket>,
    /// Tickets skipped because history already lists them.
    pub already_processed: usize,
    /// Repeats of an id earlier in the same batch.
    pub duplicates: usize,
}

/// Keep tickets whose id is not in `history`, first occurrence wins.
pub fn select_new(fetched: Vec<Ticket>, history: &HistoryStore) -> Selection {
    let mut selection = Selection::default();
    let mut batch = HashSet::new();

    for ticket in fetched {
        let key = ticket.history_key();
        if history.contains(&key) {
            selection.already_processed += 1;
        } else if !batch.insert(key) {
            selection.duplicates += 1;
        } else {
            selection.pending.push(ticket);
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: i64) -> Ticket {
        Ticket {
            id,
            title: format!("ticket {id}"),
            resolution: "resolved by restarting the service".into(),
        }
    }

    async fn history_with(ids: &[&str]) -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        std::fs::write(&path, ids.join("\n")).unwrap();
        let store = HistoryStore::load(&path).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn known_ids_are_dropped() {
        let (_dir, history) = history_with(&["1", "3"]).await;
        let selection = select_new(vec![ticket(1), ticket(2), ticket(3), ticket(4)], &history);

        let ids: Vec<i64> = selection.pending.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(selection.already_processed, 2);
    }

    #[tokio::test]
    async fn repeated_ids_keep_first_occurrence() {
        let (_dir, history) = history_with(&[]).await;
        let mut second = ticket(5);
        second.title = "later copy".into();
        let selection = select_new(vec![ticket(5), ticket(6), second], &history);

        assert_eq!(selection.pending.len(), 2);
        assert_eq!(selection.pending[0].title, "ticket 5");
        assert_eq!(selection.duplicates, 1);
    }

    #[tokio::test]
    async fn everything_known_leaves_nothing() {
        let (_dir, history) = history_with(&["8", "9"]).await;
        let selection = select_new(vec![ticket(8), ticket(9)], &history);
        assert!(selection.pending.is_empty());
        assert_eq!(selection.already_processed, 2);
    }
}
