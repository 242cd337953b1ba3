//! Preview identifiers and component custom ids
//!
//! Interaction state travels through Discord as component custom ids. Each id is
//! decoded once at the boundary into a typed record.

use serde::{Deserialize, Serialize};
use serenity::model::id::{ChannelId, RoleId};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Custom id prefix for the compose modal
pub const MODAL_PREFIX: &str = "announce-modal:";
/// Custom id of the text input inside the compose modal
pub const MESSAGE_INPUT_ID: &str = "announce-message";
/// Custom id prefix for the Send button
pub const CONFIRM_PREFIX: &str = "announce-confirm:";
/// Custom id prefix for the Cancel button
pub const CANCEL_PREFIX: &str = "announce-cancel:";

/// Discord rejects custom ids longer than this
pub const CUSTOM_ID_LIMIT: usize = 100;

/// Opaque, unguessable preview identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(Uuid);

impl PreviewId {
    pub fn new() -> Self {
        PreviewId(Uuid::new_v4())
    }
}

impl Default for PreviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PreviewId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(PreviewId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    Confirm,
    Cancel,
}

/// A Send/Cancel button attached to a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewButton {
    pub action: PreviewAction,
    pub id: PreviewId,
}

impl PreviewButton {
    pub fn confirm(id: PreviewId) -> Self {
        PreviewButton {
            action: PreviewAction::Confirm,
            id,
        }
    }

    pub fn cancel(id: PreviewId) -> Self {
        PreviewButton {
            action: PreviewAction::Cancel,
            id,
        }
    }

    pub fn custom_id(&self) -> String {
        let prefix = match self.action {
            PreviewAction::Confirm => CONFIRM_PREFIX,
            PreviewAction::Cancel => CANCEL_PREFIX,
        };
        format!("{prefix}{}", self.id)
    }

    /// Parse a button custom id; `None` for ids this bot did not issue
    pub fn parse(custom_id: &str) -> Option<Self> {
        let (action, rest) = if let Some(rest) = custom_id.strip_prefix(CONFIRM_PREFIX) {
            (PreviewAction::Confirm, rest)
        } else if let Some(rest) = custom_id.strip_prefix(CANCEL_PREFIX) {
            (PreviewAction::Cancel, rest)
        } else {
            return None;
        };
        let id = rest.parse().ok()?;
        Some(PreviewButton { action, id })
    }
}

/// Options chosen on the slash command, carried through the compose modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeDraft {
    #[serde(rename = "d")]
    destination: u64,
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    mention_channel: Option<u64>,
    #[serde(rename = "e", default)]
    ping_everyone: bool,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    mention_role: Option<u64>,
}

impl ComposeDraft {
    pub fn new(
        destination: ChannelId,
        mention_channel: Option<ChannelId>,
        ping_everyone: bool,
        mention_role: Option<RoleId>,
    ) -> Self {
        ComposeDraft {
            destination: destination.0,
            mention_channel: mention_channel.map(|c| c.0),
            ping_everyone,
            mention_role: mention_role.map(|r| r.0),
        }
    }

    pub fn destination(&self) -> ChannelId {
        ChannelId(self.destination)
    }

    pub fn mention_channel(&self) -> Option<ChannelId> {
        self.mention_channel.map(ChannelId)
    }

    pub fn ping_everyone(&self) -> bool {
        self.ping_everyone
    }

    pub fn mention_role(&self) -> Option<RoleId> {
        self.mention_role.map(RoleId)
    }

    pub fn custom_id(&self) -> String {
        // Serializing a struct of integers and bools cannot fail
        let json = serde_json::to_string(self).unwrap_or_default();
        format!("{MODAL_PREFIX}{json}")
    }

    /// Decode a modal custom id; `None` for foreign or malformed ids
    pub fn parse(custom_id: &str) -> Option<Self> {
        let json = custom_id.strip_prefix(MODAL_PREFIX)?;
        serde_json::from_str(json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_ids_are_unique() {
        assert_ne!(PreviewId::new(), PreviewId::new());
    }

    #[test]
    fn test_button_custom_id_format() {
        let id: PreviewId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(
            PreviewButton::confirm(id).custom_id(),
            "announce-confirm:67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(
            PreviewButton::cancel(id).custom_id(),
            "announce-cancel:67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[test]
    fn test_button_parse() {
        let id = PreviewId::new();
        let parsed = PreviewButton::parse(&format!("announce-cancel:{id}")).unwrap();
        assert_eq!(parsed.action, PreviewAction::Cancel);
        assert_eq!(parsed.id, id);
    }

    #[test]
    fn test_button_parse_rejects_foreign_ids() {
        assert!(PreviewButton::parse("persona_chef").is_none());
        assert!(PreviewButton::parse("announce-confirm:").is_none());
        assert!(PreviewButton::parse("announce-confirm:not-a-uuid").is_none());
        assert!(PreviewButton::parse("announce-delete:67e55044-10b1-426f-9247-bb680e5fe0c8").is_none());
    }

    #[test]
    fn test_draft_custom_id_fits_discord_limit() {
        // Largest possible snowflakes
        let draft = ComposeDraft::new(
            ChannelId(u64::MAX),
            Some(ChannelId(u64::MAX)),
            true,
            Some(RoleId(u64::MAX)),
        );
        assert!(draft.custom_id().len() <= CUSTOM_ID_LIMIT, "{}", draft.custom_id());
    }

    #[test]
    fn test_draft_decodes_with_named_fields() {
        let draft = ComposeDraft::parse(r#"announce-modal:{"d":10,"e":true,"r":30}"#).unwrap();
        assert_eq!(draft.destination(), ChannelId(10));
        assert_eq!(draft.mention_channel(), None);
        assert!(draft.ping_everyone());
        assert_eq!(draft.mention_role(), Some(RoleId(30)));
    }

    #[test]
    fn test_draft_parse_rejects_garbage() {
        assert!(ComposeDraft::parse("announce-modal:123").is_none());
        assert!(ComposeDraft::parse("help_feedback_modal").is_none());
        assert!(ComposeDraft::parse(r#"announce-modal:{"m":1}"#).is_none());
    }
}
