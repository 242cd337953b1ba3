//! Announcement embed builder
//!
//! Shared by the ephemeral preview and the message posted to the channel, so the
//! author sees exactly what will be sent.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::core::truncate_for_embed;
use crate::features::announcements::AnnouncementCard;
use serenity::builder::CreateEmbed;
use serenity::model::Timestamp;

/// Build the embed for an announcement: title, accent color, description, timestamp.
pub fn announcement_embed(card: &AnnouncementCard) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.title(&card.title);
    embed.color(card.color);
    embed.description(truncate_for_embed(&card.body));
    if let Ok(timestamp) = Timestamp::from_unix_timestamp(card.timestamp.timestamp()) {
        embed.timestamp(timestamp);
    }
    embed
}
