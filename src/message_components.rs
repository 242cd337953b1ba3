use anyhow::Result;
use log::{info, warn};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::modal::ModalSubmitInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::features::announcements::discord::{build_response, button_press, modal_submission};
use crate::features::announcements::{Announcer, SerenityGateway};

/// Handler for all message component and modal interactions
pub struct MessageComponentHandler {
    announcer: Arc<Announcer>,
}

impl MessageComponentHandler {
    pub fn new(announcer: Arc<Announcer>) -> Self {
        Self { announcer }
    }

    /// Handle all types of component interactions
    pub async fn handle_component_interaction(&self, ctx: &Context, interaction: &MessageComponentInteraction) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        let user_id = interaction.user.id;

        info!("Processing component interaction: {custom_id} from user: {user_id}");

        let Some(press) = button_press(interaction) else {
            warn!("Unknown component interaction: {custom_id}");
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content("Unknown component interaction.").ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        };

        let gateway = SerenityGateway::new(ctx);
        let reply = self.announcer.handle_button(&gateway, press).await;

        interaction
            .create_interaction_response(&ctx.http, |response| build_response(response, &reply))
            .await?;

        Ok(())
    }

    /// Handle modal submit interactions
    pub async fn handle_modal_submit(&self, ctx: &Context, interaction: &ModalSubmitInteraction) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        let user_id = interaction.user.id;

        info!("Processing modal submit: {custom_id} from user: {user_id}");

        let Some(submission) = modal_submission(interaction) else {
            warn!("Unknown modal submission: {custom_id}");
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content("Unknown modal submission.").ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        };

        let gateway = SerenityGateway::new(ctx);
        let reply = self.announcer.handle_modal(&gateway, submission).await;

        interaction
            .create_interaction_response(&ctx.http, |response| build_response(response, &reply))
            .await?;

        Ok(())
    }
}
