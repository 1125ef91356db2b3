//! In-memory meeting store.
//!
//! Holds every processed meeting for the lifetime of the process. There is
//! no persistence: a restart starts from an empty store. Reads hand out
//! clones so callers never hold the lock across await points.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Meeting, MeetingOverview};

/// Process-wide store of completed meetings.
///
/// Insertion order is tracked separately from the id lookup so the listing
/// can serve most-recent-first without sorting.
#[derive(Debug, Default)]
pub struct MeetingStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    order: Vec<Uuid>,
    by_id: HashMap<Uuid, Meeting>,
}

impl MeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed meeting.
    pub async fn put(&self, meeting: Meeting) {
        let mut inner = self.inner.write().await;
        inner.order.push(meeting.id);
        inner.by_id.insert(meeting.id, meeting);
    }

    /// Full record for one meeting, or `None` when the id is unknown.
    pub async fn get(&self, id: Uuid) -> Option<Meeting> {
        self.inner.read().await.by_id.get(&id).cloned()
    }

    /// Listing entries for all meetings, most recent first.
    pub async fn list(&self) -> Vec<MeetingOverview> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.by_id.get(id))
            .map(Meeting::overview)
            .collect()
    }

    /// Number of stored meetings.
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FactCheck, Improvements, Summary, TaskList};
    use chrono::Utc;

    fn meeting(filename: &str) -> Meeting {
        Meeting {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            timestamp: Utc::now(),
            transcription: "Speaker 1: Hello.".to_string(),
            summary: Summary {
                overview: format!("Overview for {filename}"),
                ..Summary::default()
            },
            tasks: TaskList::default(),
            improvements: Improvements::default(),
            fact_check: FactCheck::default(),
        }
    }

    #[tokio::test]
    async fn put_then_get_returns_the_meeting() {
        let store = MeetingStore::new();
        let m = meeting("kickoff.mp3");
        let id = m.id;

        store.put(m).await;

        let found = store.get(id).await.unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.filename, "kickoff.mp3");
    }

    #[tokio::test]
    async fn get_unknown_id_returns_none() {
        let store = MeetingStore::new();
        store.put(meeting("kickoff.mp3")).await;
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn list_returns_most_recent_first() {
        let store = MeetingStore::new();
        let first = meeting("first.wav");
        let second = meeting("second.wav");
        let third = meeting("third.wav");
        let ids = [first.id, second.id, third.id];

        store.put(first).await;
        store.put(second).await;
        store.put(third).await;

        let listing = store.list().await;
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].id, ids[2]);
        assert_eq!(listing[1].id, ids[1]);
        assert_eq!(listing[2].id, ids[0]);
    }

    #[tokio::test]
    async fn list_entries_carry_truncated_summaries() {
        let store = MeetingStore::new();
        let mut m = meeting("long.wav");
        m.summary.overview = "y".repeat(400);
        store.put(m).await;

        let listing = store.list().await;
        assert!(listing[0].summary.ends_with("..."));
        assert!(listing[0].summary.chars().count() < 400);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MeetingStore::new();
        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }
}
