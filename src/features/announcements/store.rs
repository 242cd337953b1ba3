//! Storage for pending previews
//!
//! The preview manager only talks to the [`PreviewStore`] trait so the backing map
//! can be swapped (tests, or a shared store if the bot is ever sharded).

use dashmap::DashMap;

use super::ids::PreviewId;
use super::manager::PendingAnnouncement;

/// Key-value store of pending announcements
pub trait PreviewStore: Send + Sync {
    fn insert(&self, entry: PendingAnnouncement);

    fn get(&self, id: &PreviewId) -> Option<PendingAnnouncement>;

    fn remove(&self, id: &PreviewId) -> Option<PendingAnnouncement>;

    /// Remove the entry only if `predicate` holds, as one atomic step.
    fn remove_if(
        &self,
        id: &PreviewId,
        predicate: &dyn Fn(&PendingAnnouncement) -> bool,
    ) -> Option<PendingAnnouncement>;

    /// Drop every entry for which `keep` is false; returns how many were dropped.
    fn retain(&self, keep: &dyn Fn(&PendingAnnouncement) -> bool) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-memory store backed by a sharded concurrent map
#[derive(Default)]
pub struct InMemoryPreviewStore {
    entries: DashMap<PreviewId, PendingAnnouncement>,
}

impl InMemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewStore for InMemoryPreviewStore {
    fn insert(&self, entry: PendingAnnouncement) {
        self.entries.insert(entry.id, entry);
    }

    fn get(&self, id: &PreviewId) -> Option<PendingAnnouncement> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    fn remove(&self, id: &PreviewId) -> Option<PendingAnnouncement> {
        self.entries.remove(id).map(|(_, entry)| entry)
    }

    fn remove_if(
        &self,
        id: &PreviewId,
        predicate: &dyn Fn(&PendingAnnouncement) -> bool,
    ) -> Option<PendingAnnouncement> {
        self.entries
            .remove_if(id, |_, entry| predicate(entry))
            .map(|(_, entry)| entry)
    }

    fn retain(&self, keep: &dyn Fn(&PendingAnnouncement) -> bool) -> usize {
        let mut dropped = 0;
        self.entries.retain(|_, entry| {
            let kept = keep(entry);
            if !kept {
                dropped += 1;
            }
            kept
        });
        dropped
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
