//! Replies the announcement flow asks the adapter to send

use chrono::{DateTime, Utc};

use super::ids::{ComposeDraft, PreviewId};

pub const ANNOUNCEMENT_TITLE: &str = "📢 Announcement";
pub const ANNOUNCEMENT_COLOR: u32 = 0x5865F2;

/// Visual content of an announcement, shared by the preview and the posted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementCard {
    pub title: String,
    pub body: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
}

impl AnnouncementCard {
    pub fn new(body: &str, timestamp: DateTime<Utc>) -> Self {
        AnnouncementCard {
            title: ANNOUNCEMENT_TITLE.to_string(),
            body: body.to_string(),
            color: ANNOUNCEMENT_COLOR,
            timestamp,
        }
    }
}

/// Preview shown to the author with Send/Cancel controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCard {
    pub id: PreviewId,
    pub card: AnnouncementCard,
}

/// How to answer an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionReply {
    /// Ephemeral reply; a preview carries its Send/Cancel buttons
    Private {
        content: String,
        preview: Option<PreviewCard>,
    },
    /// Open the compose modal
    Modal(ComposeDraft),
    /// Replace the message the button sits on, clearing embeds and buttons
    Update { content: String },
}

impl InteractionReply {
    pub fn private(content: impl Into<String>) -> Self {
        InteractionReply::Private {
            content: content.into(),
            preview: None,
        }
    }

    pub fn update(content: impl Into<String>) -> Self {
        InteractionReply::Update {
            content: content.into(),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            InteractionReply::Private { content, .. } | InteractionReply::Update { content } => {
                Some(content)
            }
            InteractionReply::Modal(_) => None,
        }
    }

    pub fn preview(&self) -> Option<&PreviewCard> {
        match self {
            InteractionReply::Private { preview, .. } => preview.as_ref(),
            _ => None,
        }
    }
}
