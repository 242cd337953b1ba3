//! Pending preview lifecycle
//!
//! A preview is created when the author has supplied text, and is resolved exactly
//! once: by the owner pressing Send or Cancel, or by expiring. Resolution removes the
//! entry in the same atomic step that checks ownership, so a double click can only
//! ever be honoured once.

use chrono::{DateTime, Utc};
use log::debug;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use std::sync::Arc;
use std::time::Duration;

use super::ids::PreviewId;
use super::store::PreviewStore;

/// An announcement waiting for its author to confirm or cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnnouncement {
    pub id: PreviewId,
    pub owner_id: UserId,
    pub guild_id: Option<GuildId>,
    pub destination: ChannelId,
    /// Text with `{channel}`/`{role}` already substituted
    pub body: String,
    pub ping_everyone: bool,
    pub mention_role: Option<RoleId>,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to open a preview
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub owner_id: UserId,
    pub guild_id: Option<GuildId>,
    pub destination: ChannelId,
    pub body: String,
    pub ping_everyone: bool,
    pub mention_role: Option<RoleId>,
}

/// Result of trying to resolve a preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The requester owns the preview; it has been removed from the store
    Granted(PendingAnnouncement),
    /// The preview exists but belongs to someone else; left untouched
    NotOwner,
    /// Unknown, already resolved, or past its lifetime
    Expired,
}

#[derive(Clone)]
pub struct PreviewManager {
    store: Arc<dyn PreviewStore>,
    ttl: Duration,
}

impl PreviewManager {
    pub fn new(store: Arc<dyn PreviewStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn store(&self) -> &Arc<dyn PreviewStore> {
        &self.store
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a preview under a fresh id
    pub fn create(&self, announcement: NewAnnouncement) -> PendingAnnouncement {
        let entry = PendingAnnouncement {
            id: PreviewId::new(),
            owner_id: announcement.owner_id,
            guild_id: announcement.guild_id,
            destination: announcement.destination,
            body: announcement.body,
            ping_everyone: announcement.ping_everyone,
            mention_role: announcement.mention_role,
            created_at: Utc::now(),
        };
        debug!(
            "Preview {} created by {} for channel {}",
            entry.id, entry.owner_id, entry.destination
        );
        self.store.insert(entry.clone());
        entry
    }

    /// Resolve a preview on behalf of `requester`.
    ///
    /// Existence is checked before ownership.
    pub fn claim(&self, id: &PreviewId, requester: UserId) -> Claim {
        let now = Utc::now();

        if let Some(entry) = self.store.remove_if(id, &|e| e.owner_id == requester) {
            if self.is_expired(&entry, now) {
                debug!("Preview {id} claimed after expiry");
                return Claim::Expired;
            }
            return Claim::Granted(entry);
        }

        match self.store.get(id) {
            Some(entry) if self.is_expired(&entry, now) => {
                self.store.remove(id);
                Claim::Expired
            }
            Some(_) => Claim::NotOwner,
            None => Claim::Expired,
        }
    }

    /// Look up a preview without resolving it. Expired entries are reported as absent.
    pub fn peek(&self, id: &PreviewId) -> Option<PendingAnnouncement> {
        self.store
            .get(id)
            .filter(|entry| !self.is_expired(entry, Utc::now()))
    }

    /// Drop every preview older than the configured lifetime
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        self.store.retain(&|entry| !self.is_expired(entry, now))
    }

    pub fn pending_count(&self) -> usize {
        self.store.len()
    }

    fn is_expired(&self, entry: &PendingAnnouncement, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(entry.created_at);
        age.to_std().map(|age| age >= self.ttl).unwrap_or(false)
    }
}
