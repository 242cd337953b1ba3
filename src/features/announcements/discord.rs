//! Serenity adapter for the announcement flow
//!
//! Turns serenity interactions into the flow's inbound events, implements
//! [`AnnouncementGateway`] over the HTTP client and cache, and renders
//! [`InteractionReply`] values back onto interactions.

use async_trait::async_trait;
use log::debug;
use serenity::builder::{
    CreateAllowedMentions, CreateComponents, CreateInteractionResponse, ParseValue,
};
use serenity::cache::Cache;
use serenity::http::Http;
use serenity::model::application::component::{ActionRowComponent, ButtonStyle, InputTextStyle};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::modal::ModalSubmitInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::{Channel, GuildChannel};
use serenity::model::id::{ChannelId, GuildId, RoleId};
use serenity::prelude::Context;
use std::sync::Arc;

use super::flow::{AnnounceRequest, ButtonPress, Destination, ModalSubmission};
use super::gateway::{AnnouncementGateway, ChannelSummary, MentionPolicy, OutgoingAnnouncement};
use super::ids::{ComposeDraft, PreviewButton, PreviewId, MESSAGE_INPUT_ID};
use super::permissions::MemberAccess;
use super::reply::InteractionReply;
use crate::commands::slash::{get_bool_option, get_channel_option, get_role_option, get_string_option};
use crate::core::error::GatewayError;
use crate::core::{announcement_embed, MODAL_INPUT_LIMIT};

/// [`AnnouncementGateway`] backed by serenity's cache and HTTP client
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityGateway {
    pub fn new(ctx: &Context) -> Self {
        Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
        }
    }
}

#[async_trait]
impl AnnouncementGateway for SerenityGateway {
    async fn fetch_channel(
        &self,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
    ) -> Result<ChannelSummary, GatewayError> {
        if let Some(channel) = self.cache.guild_channel(channel_id) {
            return Ok(guild_channel_summary(&channel));
        }

        if let Some(guild_id) = guild_id {
            match guild_id.channels(&self.http).await {
                Ok(channels) => {
                    if let Some(channel) = channels.get(&channel_id) {
                        return Ok(guild_channel_summary(channel));
                    }
                }
                Err(e) => debug!("Guild lookup of channel {channel_id} in {guild_id} failed: {e}"),
            }
        }

        let channel = self
            .http
            .get_channel(channel_id.0)
            .await
            .map_err(|e| GatewayError::Transport(e.into()))?;

        match channel {
            Channel::Guild(channel) => Ok(guild_channel_summary(&channel)),
            Channel::Category(category) => Ok(ChannelSummary {
                id: category.id,
                name: category.name,
                kind: category.kind,
            }),
            Channel::Private(private) => Ok(ChannelSummary {
                id: private.id,
                name: private.name(),
                kind: private.kind,
            }),
            _ => Err(GatewayError::NotFound),
        }
    }

    async fn send_announcement(
        &self,
        channel_id: ChannelId,
        announcement: &OutgoingAnnouncement,
    ) -> Result<(), GatewayError> {
        let embed = announcement_embed(&announcement.card);
        let mentions = announcement.mentions;

        channel_id
            .send_message(&self.http, |m| {
                if let Some(content) = &announcement.content {
                    m.content(content);
                }
                m.set_embed(embed)
                    .allowed_mentions(|am| apply_mention_policy(am, mentions))
            })
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::Transport(e.into()))
    }
}

/// Allow exactly the pings the policy names; nothing is parsed from the content
pub fn apply_mention_policy(
    allowed: &mut CreateAllowedMentions,
    policy: MentionPolicy,
) -> &mut CreateAllowedMentions {
    allowed.empty_parse();
    if policy.everyone {
        allowed.parse(ParseValue::Everyone);
    }
    match policy.role {
        Some(role) => allowed.roles(vec![role]),
        None => allowed.empty_roles(),
    }
}

fn guild_channel_summary(channel: &GuildChannel) -> ChannelSummary {
    ChannelSummary {
        id: channel.id,
        name: channel.name.clone(),
        kind: channel.kind,
    }
}

/// Normalize a `/announce` invocation
pub fn announce_request(command: &ApplicationCommandInteraction) -> AnnounceRequest {
    let options = &command.data.options;

    let destination = match get_channel_option(options, "channel").map(ChannelId) {
        Some(id) => match command.data.resolved.channels.get(&id) {
            Some(partial) => Destination::Resolved(ChannelSummary {
                id,
                name: partial.name.clone().unwrap_or_else(|| id.to_string()),
                kind: partial.kind,
            }),
            None => Destination::Unresolved(id),
        },
        None => Destination::Default,
    };

    AnnounceRequest {
        user_id: command.user.id,
        guild_id: command.guild_id,
        access: MemberAccess::from_member(command.member.as_ref()),
        destination,
        message: get_string_option(options, "message"),
        mention_channel: get_channel_option(options, "mention").map(ChannelId),
        mention_role: get_role_option(options, "role").map(RoleId),
        ping_everyone: get_bool_option(options, "ping_everyone").unwrap_or(false),
    }
}

/// Normalize a compose modal submission; `None` for modals this feature did not open
pub fn modal_submission(modal: &ModalSubmitInteraction) -> Option<ModalSubmission> {
    let draft = ComposeDraft::parse(&modal.data.custom_id)?;

    let mut text = String::new();
    for action_row in &modal.data.components {
        for component in &action_row.components {
            if let ActionRowComponent::InputText(input) = component {
                if input.custom_id == MESSAGE_INPUT_ID {
                    text = input.value.clone();
                }
            }
        }
    }

    Some(ModalSubmission {
        user_id: modal.user.id,
        guild_id: modal.guild_id,
        access: MemberAccess::from_member(modal.member.as_ref()),
        draft,
        text,
    })
}

/// Normalize a Send/Cancel click; `None` for buttons this feature did not create
pub fn button_press(component: &MessageComponentInteraction) -> Option<ButtonPress> {
    let button = PreviewButton::parse(&component.data.custom_id)?;
    Some(ButtonPress {
        user_id: component.user.id,
        guild_id: component.guild_id,
        access: MemberAccess::from_member(component.member.as_ref()),
        button,
    })
}

/// Send/Cancel buttons for a preview
pub fn preview_buttons(id: PreviewId) -> CreateComponents {
    CreateComponents::default()
        .create_action_row(|row| {
            row.create_button(|button| {
                button
                    .custom_id(PreviewButton::confirm(id).custom_id())
                    .label("Send")
                    .style(ButtonStyle::Success)
            })
            .create_button(|button| {
                button
                    .custom_id(PreviewButton::cancel(id).custom_id())
                    .label("Cancel")
                    .style(ButtonStyle::Secondary)
            })
        })
        .to_owned()
}

/// Fill an interaction response from a flow reply
pub fn build_response<'a, 'b>(
    response: &'b mut CreateInteractionResponse<'a>,
    reply: &InteractionReply,
) -> &'b mut CreateInteractionResponse<'a> {
    match reply {
        InteractionReply::Private { content, preview } => response
            .kind(InteractionResponseType::ChannelMessageWithSource)
            .interaction_response_data(|message| {
                message.content(content).ephemeral(true);
                if let Some(preview) = preview {
                    message
                        .add_embed(announcement_embed(&preview.card))
                        .set_components(preview_buttons(preview.id));
                }
                message
            }),
        InteractionReply::Update { content } => response
            .kind(InteractionResponseType::UpdateMessage)
            .interaction_response_data(|message| {
                message
                    .content(content)
                    .set_embeds(Vec::new())
                    .components(|c| c) // Clear components
            }),
        InteractionReply::Modal(draft) => response
            .kind(InteractionResponseType::Modal)
            .interaction_response_data(|modal| {
                modal
                    .custom_id(draft.custom_id())
                    .title("Compose announcement")
                    .components(|c| {
                        c.create_action_row(|row| {
                            row.create_input_text(|input| {
                                input
                                    .custom_id(MESSAGE_INPUT_ID)
                                    .label("Announcement message")
                                    .style(InputTextStyle::Paragraph)
                                    .required(true)
                                    .max_length(MODAL_INPUT_LIMIT)
                            })
                        })
                    })
            }),
    }
}
