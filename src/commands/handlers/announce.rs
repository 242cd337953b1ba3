//! Announce command handler
//!
//! Handles: announce
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::features::announcements::discord::{announce_request, build_response};
use crate::features::announcements::SerenityGateway;

/// Handler for /announce
pub struct AnnounceHandler;

#[async_trait]
impl SlashCommandHandler for AnnounceHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["announce"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let request = announce_request(command);
        debug!(
            "[{request_id}] /announce from {} in {:?} to {:?}",
            request.user_id, request.guild_id, request.destination
        );

        let gateway = SerenityGateway::new(serenity_ctx);
        let reply = ctx.announcer.handle_command(&gateway, request).await;

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                build_response(response, &reply)
            })
            .await?;

        info!("[{request_id}] /announce answered for user {}", command.user.id);
        Ok(())
    }
}
