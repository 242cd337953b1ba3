use crate::commands::context::CommandContext;
use crate::commands::handlers::create_all_handlers;
use crate::commands::registry::CommandRegistry;
use crate::features::announcements::Announcer;
use anyhow::Result;
use log::{debug, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommandHandler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
}

impl CommandHandler {
    pub fn new(announcer: Arc<Announcer>) -> Self {
        CommandHandler {
            registry: CommandRegistry::with_handlers(create_all_handlers()),
            context: Arc::new(CommandContext::new(announcer)),
        }
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.context
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn handle_slash_command(&self, ctx: &Context, command: &ApplicationCommandInteraction) -> Result<()> {
        let request_id = Uuid::new_v4();
        let guild_id = command.guild_id.map(|id| id.to_string()).unwrap_or_else(|| "DM".to_string());

        info!(
            "[{}] 📥 Slash command received | Command: {} | User: {} | Channel: {} | Guild: {}",
            request_id, command.data.name, command.user.id, command.channel_id, guild_id
        );

        let Some(handler) = self.registry.get(&command.data.name) else {
            warn!("[{}] Unknown slash command: {}", request_id, command.data.name);
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| message.content("Unknown command.").ephemeral(true))
                })
                .await?;
            return Ok(());
        };

        debug!("[{}] 🎯 Dispatching /{}", request_id, command.data.name);
        handler.handle(self.context.clone(), ctx, command, request_id).await?;

        info!("[{}] ✅ Slash command completed: {}", request_id, command.data.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::announcements::{InMemoryPreviewStore, PreviewManager};
    use std::time::Duration;

    fn announcer() -> Arc<Announcer> {
        let previews = PreviewManager::new(Arc::new(InMemoryPreviewStore::new()), Duration::from_secs(60));
        Arc::new(Announcer::new(previews, None, None))
    }

    #[test]
    fn test_handler_registers_announce() {
        let handler = CommandHandler::new(announcer());
        assert!(handler.registry().contains("announce"));
        assert_eq!(handler.registry().len(), 1);
    }

    #[test]
    fn test_context_shares_announcer() {
        let announcer = announcer();
        let handler = CommandHandler::new(announcer.clone());
        assert!(Arc::ptr_eq(&handler.context().announcer, &announcer));
    }
}
