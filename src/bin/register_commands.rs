//! Registers the slash command set in one or more guilds
//!
//! Usage: cargo run --bin register-commands
//!
//! Reads TOKEN, CLIENT_ID and GUILD_IDS (or GUILD_ID) from the environment.

use dotenvy::dotenv;
use log::{error, info};
use serenity::http::Http;

use herald::commands::slash::register_guild_commands;
use herald::core::RegistrarConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match RegistrarConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };

    let http = Http::new_with_application_id(&config.discord_token, config.client_id);

    info!(
        "Registering commands in {} guild(s)...",
        config.guild_ids.len()
    );

    let mut failed = 0usize;
    for guild_id in &config.guild_ids {
        match register_guild_commands(&http, *guild_id).await {
            Ok(count) => info!("✅ Registered {count} command(s) in guild {guild_id}"),
            Err(e) => {
                failed += 1;
                error!("❌ Failed to register commands in guild {guild_id}: {e}");
            }
        }
    }

    if failed > 0 {
        error!(
            "Registration failed for {failed} of {} guild(s)",
            config.guild_ids.len()
        );
        std::process::exit(1);
    }

    info!("Done.");
}
