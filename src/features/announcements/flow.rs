//! The /announce flow: compose → preview → confirm/cancel
//!
//! Each entry point takes a normalized inbound event, talks to the platform through
//! an [`AnnouncementGateway`], and returns the [`InteractionReply`] to send back.
//! User-facing failures are turned into replies here; nothing is propagated.

use log::{error, info, warn};
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use std::sync::Arc;

use super::gateway::{AnnouncementGateway, ChannelSummary, OutgoingAnnouncement};
use super::ids::{ComposeDraft, PreviewAction, PreviewButton};
use super::manager::{Claim, NewAnnouncement, PendingAnnouncement, PreviewManager};
use super::permissions::MemberAccess;
use super::render::render_mentions;
use super::reply::{AnnouncementCard, InteractionReply, PreviewCard};
use super::store::PreviewStore;
use crate::core::error::{AnnounceError, GatewayError};
use crate::core::response::MODAL_INPUT_LIMIT;
use crate::core::Config;

const CHANNEL_NOT_FOUND: &str = "Could not find the selected channel.";
const CONFIRM_CHANNEL_INVALID: &str = "Could not send: target channel unavailable or invalid.";

/// Where the command asked the announcement to go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Picked on the command and resolved by the platform alongside it
    Resolved(ChannelSummary),
    /// Picked on the command but not included in the resolved data
    Unresolved(ChannelId),
    /// Not picked; use the configured default channel
    Default,
}

/// A `/announce` invocation
#[derive(Debug, Clone)]
pub struct AnnounceRequest {
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub access: MemberAccess,
    pub destination: Destination,
    pub message: Option<String>,
    pub mention_channel: Option<ChannelId>,
    pub mention_role: Option<RoleId>,
    pub ping_everyone: bool,
}

/// Submission of the compose modal
#[derive(Debug, Clone)]
pub struct ModalSubmission {
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub access: MemberAccess,
    pub draft: ComposeDraft,
    pub text: String,
}

/// A Send or Cancel click on a preview
#[derive(Debug, Clone)]
pub struct ButtonPress {
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub access: MemberAccess,
    pub button: PreviewButton,
}

pub struct Announcer {
    previews: PreviewManager,
    allowed_role: Option<RoleId>,
    default_channel: Option<ChannelId>,
}

impl Announcer {
    pub fn new(
        previews: PreviewManager,
        allowed_role: Option<RoleId>,
        default_channel: Option<ChannelId>,
    ) -> Self {
        Self {
            previews,
            allowed_role,
            default_channel,
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn PreviewStore>) -> Self {
        Self::new(
            PreviewManager::new(store, config.preview_ttl),
            config.allowed_role_id,
            config.default_channel_id,
        )
    }

    pub fn previews(&self) -> &PreviewManager {
        &self.previews
    }

    /// Handle the slash command
    pub async fn handle_command(
        &self,
        gateway: &dyn AnnouncementGateway,
        request: AnnounceRequest,
    ) -> InteractionReply {
        let user_id = request.user_id;
        self.command(gateway, request).await.unwrap_or_else(|e| {
            info!("/announce from {user_id} rejected: {e}");
            InteractionReply::private(e.to_string())
        })
    }

    /// Handle the compose modal
    pub async fn handle_modal(
        &self,
        gateway: &dyn AnnouncementGateway,
        submission: ModalSubmission,
    ) -> InteractionReply {
        let user_id = submission.user_id;
        self.modal(gateway, submission).await.unwrap_or_else(|e| {
            info!("Compose modal from {user_id} rejected: {e}");
            InteractionReply::private(e.to_string())
        })
    }

    /// Handle a Send/Cancel click
    pub async fn handle_button(
        &self,
        gateway: &dyn AnnouncementGateway,
        press: ButtonPress,
    ) -> InteractionReply {
        let id = press.button.id;
        match self.button(gateway, press).await {
            Ok(reply) => reply,
            Err(e) if e.is_terminal() => {
                info!("[{id}] Preview closed: {e}");
                InteractionReply::update(e.to_string())
            }
            Err(e) => {
                info!("[{id}] Preview action refused: {e}");
                InteractionReply::private(e.to_string())
            }
        }
    }

    async fn command(
        &self,
        gateway: &dyn AnnouncementGateway,
        request: AnnounceRequest,
    ) -> Result<InteractionReply, AnnounceError> {
        self.authorize(&request.access)?;

        let destination = match request.destination {
            Destination::Resolved(channel) => channel,
            Destination::Unresolved(channel_id) => {
                self.resolve_channel(gateway, request.guild_id, channel_id)
                    .await?
            }
            Destination::Default => {
                let channel_id = self.default_channel.ok_or_else(|| {
                    AnnounceError::Validation(
                        "Please choose a channel to post the announcement in.".to_string(),
                    )
                })?;
                self.resolve_channel(gateway, request.guild_id, channel_id)
                    .await?
            }
        };
        if !destination.is_postable() {
            return Err(AnnounceError::Validation(
                "Please choose a Text or Announcement channel.".to_string(),
            ));
        }

        let Some(text) = request.message.filter(|m| !m.trim().is_empty()) else {
            return Ok(InteractionReply::Modal(ComposeDraft::new(
                destination.id,
                request.mention_channel,
                request.ping_everyone,
                request.mention_role,
            )));
        };

        Ok(self.open_preview(
            NewAnnouncement {
                owner_id: request.user_id,
                guild_id: request.guild_id,
                destination: destination.id,
                body: render_mentions(&text, request.mention_channel, request.mention_role),
                ping_everyone: request.ping_everyone,
                mention_role: request.mention_role,
            },
            &destination,
        ))
    }

    async fn modal(
        &self,
        gateway: &dyn AnnouncementGateway,
        submission: ModalSubmission,
    ) -> Result<InteractionReply, AnnounceError> {
        self.authorize(&submission.access)?;

        let text = submission.text.trim();
        if text.is_empty() {
            return Err(AnnounceError::Validation(
                "Message cannot be empty.".to_string(),
            ));
        }
        if text.chars().count() > MODAL_INPUT_LIMIT as usize {
            return Err(AnnounceError::Validation(format!(
                "Message is too long (max {MODAL_INPUT_LIMIT} characters)."
            )));
        }

        let draft = submission.draft;
        let destination = self
            .resolve_channel(gateway, submission.guild_id, draft.destination())
            .await?;
        if !destination.is_postable() {
            return Err(AnnounceError::Validation(
                "Selected channel is not a text/announcement channel.".to_string(),
            ));
        }

        Ok(self.open_preview(
            NewAnnouncement {
                owner_id: submission.user_id,
                guild_id: submission.guild_id,
                destination: destination.id,
                body: render_mentions(text, draft.mention_channel(), draft.mention_role()),
                ping_everyone: draft.ping_everyone(),
                mention_role: draft.mention_role(),
            },
            &destination,
        ))
    }

    async fn button(
        &self,
        gateway: &dyn AnnouncementGateway,
        press: ButtonPress,
    ) -> Result<InteractionReply, AnnounceError> {
        let id = press.button.id;
        match press.button.action {
            PreviewAction::Cancel => {
                claimed(self.previews.claim(&id, press.user_id))?;
                info!("[{id}] Announcement cancelled by {}", press.user_id);
                Ok(InteractionReply::update("Announcement cancelled."))
            }
            PreviewAction::Confirm => {
                // Permissions may have changed since the preview was opened
                self.authorize(&press.access)?;
                let pending = claimed(self.previews.claim(&id, press.user_id))?;
                self.deliver(gateway, pending).await
            }
        }
    }

    /// Post a claimed preview. The entry is already gone, so this runs at most once.
    async fn deliver(
        &self,
        gateway: &dyn AnnouncementGateway,
        pending: PendingAnnouncement,
    ) -> Result<InteractionReply, AnnounceError> {
        let id = pending.id;
        let channel = match gateway
            .fetch_channel(pending.guild_id, pending.destination)
            .await
        {
            Ok(channel) if channel.is_postable() => channel,
            Ok(channel) => {
                warn!(
                    "[{id}] Channel {} is no longer postable ({:?})",
                    channel.id, channel.kind
                );
                return Err(AnnounceError::NotFound(CONFIRM_CHANNEL_INVALID.to_string()));
            }
            Err(e) => {
                warn!("[{id}] Failed to fetch channel during confirm: {e}");
                return Err(AnnounceError::NotFound(CONFIRM_CHANNEL_INVALID.to_string()));
            }
        };

        let outgoing = OutgoingAnnouncement::from_pending(&pending);
        match gateway.send_announcement(channel.id, &outgoing).await {
            Ok(()) => {
                info!(
                    "[{id}] Announcement by {} sent to #{} ({})",
                    pending.owner_id, channel.name, channel.id
                );
                Ok(InteractionReply::update(format!(
                    "Announcement sent to #{}.",
                    channel.name
                )))
            }
            Err(e) => {
                error!("[{id}] Failed to send announcement to {}: {e}", channel.id);
                Err(AnnounceError::Transport(format!(
                    "Could not send the announcement to #{}. Please run /announce again.",
                    channel.name
                )))
            }
        }
    }

    fn open_preview(
        &self,
        announcement: NewAnnouncement,
        destination: &ChannelSummary,
    ) -> InteractionReply {
        let entry = self.previews.create(announcement);
        InteractionReply::Private {
            content: format!("Preview — will send to #{}.", destination.name),
            preview: Some(PreviewCard {
                id: entry.id,
                card: AnnouncementCard::new(&entry.body, entry.created_at),
            }),
        }
    }

    fn authorize(&self, access: &MemberAccess) -> Result<(), AnnounceError> {
        if access.permits(self.allowed_role) {
            Ok(())
        } else {
            Err(AnnounceError::PermissionDenied)
        }
    }

    async fn resolve_channel(
        &self,
        gateway: &dyn AnnouncementGateway,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
    ) -> Result<ChannelSummary, AnnounceError> {
        gateway
            .fetch_channel(guild_id, channel_id)
            .await
            .map_err(|e| {
                if let GatewayError::Transport(_) = e {
                    warn!("Failed to fetch channel {channel_id}: {e}");
                }
                AnnounceError::NotFound(CHANNEL_NOT_FOUND.to_string())
            })
    }
}

fn claimed(claim: Claim) -> Result<PendingAnnouncement, AnnounceError> {
    match claim {
        Claim::Granted(pending) => Ok(pending),
        Claim::NotOwner => Err(AnnounceError::NotOwner),
        Claim::Expired => Err(AnnounceError::Expired),
    }
}
