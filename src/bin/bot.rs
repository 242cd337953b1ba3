use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use herald::command_handler::CommandHandler;
use herald::core::Config;
use herald::features::announcements::discord::build_response;
use herald::features::announcements::{
    Announcer, InMemoryPreviewStore, InteractionReply, PreviewManager,
};
use herald::features::spawn_health_server;
use herald::message_components::MessageComponentHandler;

/// How often stale previews are swept
const PREVIEW_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

const COMMAND_FAILURE: &str = "There was an error executing that command.";
const MODAL_FAILURE: &str = "There was an error submitting the announcement.";
const COMPONENT_FAILURE: &str = "There was an error handling your action.";

struct Handler {
    command_handler: Arc<CommandHandler>,
    component_handler: Arc<MessageComponentHandler>,
}

impl Handler {
    fn new(command_handler: CommandHandler, component_handler: MessageComponentHandler) -> Self {
        Handler {
            command_handler: Arc::new(command_handler),
            component_handler: Arc::new(component_handler),
        }
    }
}

/// Answer with a private failure message, as a follow-up if the interaction was already answered
macro_rules! reply_failure {
    ($ctx:expr, $interaction:expr, $message:expr) => {{
        let reply = InteractionReply::private($message);
        if $interaction
            .create_interaction_response(&$ctx.http, |response| build_response(response, &reply))
            .await
            .is_err()
        {
            if let Err(e) = $interaction
                .create_followup_message(&$ctx.http, |message| message.content($message).ephemeral(true))
                .await
            {
                warn!("Could not deliver failure reply: {e}");
            }
        }
    }};
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );
                    reply_failure!(ctx, command, COMMAND_FAILURE);
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self
                    .component_handler
                    .handle_component_interaction(&ctx, &component)
                    .await
                {
                    error!(
                        "Error handling component interaction '{}': {}",
                        component.data.custom_id, e
                    );
                    reply_failure!(ctx, component, COMPONENT_FAILURE);
                }
            }
            Interaction::ModalSubmit(modal) => {
                if let Err(e) = self
                    .component_handler
                    .handle_modal_submit(&ctx, &modal)
                    .await
                {
                    error!("Error handling modal submit '{}': {}", modal.data.custom_id, e);
                    reply_failure!(ctx, modal, MODAL_FAILURE);
                }
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            error!("Create a .env file with TOKEN=your_bot_token");
            std::process::exit(1);
        }
    };

    info!("Starting Herald announcement bot...");

    let previews = PreviewManager::new(Arc::new(InMemoryPreviewStore::new()), config.preview_ttl);
    info!(
        "⏳ Previews expire after {} minutes",
        config.preview_ttl.as_secs() / 60
    );

    // Sweep expired previews in the background
    let sweeper = previews.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PREVIEW_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sweeper.purge_expired();
            if purged > 0 {
                debug!("Swept {purged} expired previews");
            }
        }
    });

    if let Some(port) = config.health_port {
        if let Err(e) = spawn_health_server(port, previews.clone()).await {
            error!("Failed to start health server on port {port}: {e}");
        }
    }

    let announcer = Arc::new(Announcer::new(
        previews,
        config.allowed_role_id,
        config.default_channel_id,
    ));

    if config.disable_login {
        warn!("DISABLE_LOGIN is set; not connecting to Discord. Press Ctrl+C to exit.");
        tokio::signal::ctrl_c().await?;
        info!("Shutting down");
        return Ok(());
    }

    let handler = Handler::new(
        CommandHandler::new(announcer.clone()),
        MessageComponentHandler::new(announcer),
    );

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
