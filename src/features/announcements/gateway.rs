//! Platform operations the announcement flow depends on
//!
//! The flow never touches serenity's HTTP client directly; it goes through
//! [`AnnouncementGateway`], which the bot implements over serenity and tests
//! implement with an in-memory fake.

use async_trait::async_trait;
use chrono::Utc;
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId, RoleId};

use super::manager::PendingAnnouncement;
use super::reply::AnnouncementCard;
use crate::core::error::GatewayError;

/// The parts of a channel the flow cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelType,
}

impl ChannelSummary {
    /// Only text and announcement channels can receive announcements
    pub fn is_postable(&self) -> bool {
        matches!(self.kind, ChannelType::Text | ChannelType::News)
    }
}

/// Mentions the platform is allowed to turn into pings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MentionPolicy {
    pub everyone: bool,
    pub role: Option<RoleId>,
}

impl MentionPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !self.everyone && self.role.is_none()
    }
}

/// A fully built announcement ready to post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingAnnouncement {
    pub card: AnnouncementCard,
    /// Plain content carrying the pings; embeds never notify anyone
    pub content: Option<String>,
    pub mentions: MentionPolicy,
}

impl OutgoingAnnouncement {
    /// Build the message for a confirmed preview, stamped with the time it is sent
    pub fn from_pending(pending: &PendingAnnouncement) -> Self {
        let mentions = MentionPolicy {
            everyone: pending.ping_everyone,
            role: pending.mention_role,
        };

        let mut pings = Vec::new();
        if mentions.everyone {
            pings.push("@everyone".to_string());
        }
        if let Some(role) = mentions.role {
            pings.push(format!("<@&{}>", role.0));
        }

        OutgoingAnnouncement {
            card: AnnouncementCard::new(&pending.body, Utc::now()),
            content: (!pings.is_empty()).then(|| pings.join(" ")),
            mentions,
        }
    }
}

#[async_trait]
pub trait AnnouncementGateway: Send + Sync {
    /// Resolve a channel, trying the guild first and a global lookup second
    async fn fetch_channel(
        &self,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
    ) -> Result<ChannelSummary, GatewayError>;

    /// Post the announcement, honouring exactly the given mention policy
    async fn send_announcement(
        &self,
        channel_id: ChannelId,
        announcement: &OutgoingAnnouncement,
    ) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::announcements::ids::PreviewId;
    use serenity::model::id::UserId;

    fn pending(ping_everyone: bool, mention_role: Option<RoleId>) -> PendingAnnouncement {
        PendingAnnouncement {
            id: PreviewId::new(),
            owner_id: UserId(1),
            guild_id: None,
            destination: ChannelId(2),
            body: "Hello".to_string(),
            ping_everyone,
            mention_role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_postable_kinds() {
        let mut channel = ChannelSummary {
            id: ChannelId(1),
            name: "news".to_string(),
            kind: ChannelType::Text,
        };
        assert!(channel.is_postable());
        channel.kind = ChannelType::News;
        assert!(channel.is_postable());
        channel.kind = ChannelType::Voice;
        assert!(!channel.is_postable());
        channel.kind = ChannelType::Category;
        assert!(!channel.is_postable());
    }

    #[test]
    fn test_no_pings_by_default() {
        let outgoing = OutgoingAnnouncement::from_pending(&pending(false, None));
        assert!(outgoing.mentions.is_empty());
        assert!(outgoing.content.is_none());
        assert_eq!(outgoing.card.body, "Hello");
    }

    #[test]
    fn test_everyone_and_role_are_explicit() {
        let outgoing = OutgoingAnnouncement::from_pending(&pending(true, Some(RoleId(7))));
        assert_eq!(
            outgoing.mentions,
            MentionPolicy {
                everyone: true,
                role: Some(RoleId(7))
            }
        );
        assert_eq!(outgoing.content.as_deref(), Some("@everyone <@&7>"));
    }

    #[test]
    fn test_role_only() {
        let outgoing = OutgoingAnnouncement::from_pending(&pending(false, Some(RoleId(7))));
        assert!(!outgoing.mentions.everyone);
        assert_eq!(outgoing.content.as_deref(), Some("<@&7>"));
    }

    #[test]
    fn test_card_is_stamped_at_send_time() {
        let mut stale = pending(false, None);
        stale.created_at = Utc::now() - chrono::Duration::minutes(10);

        let before = Utc::now();
        let outgoing = OutgoingAnnouncement::from_pending(&stale);
        assert!(outgoing.card.timestamp >= before);
        assert!(outgoing.card.timestamp > stale.created_at);
    }
}
