//! # Slash Commands (/)
//!
//! Command definitions and guild registration.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Register against a bare HTTP client so the registrar can run without a gateway session
//! - 1.0.0: Initial `/announce` definition

pub mod announce;

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serenity::model::application::interaction::application_command::CommandDataOption;
use serenity::model::id::GuildId;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();

    // Announcement commands
    commands.extend(announce::create_commands());

    commands
}

/// Registers all slash commands for a specific guild, replacing what was there
pub async fn register_guild_commands(http: &Http, guild_id: GuildId) -> Result<usize> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    guild_id
        .set_application_commands(http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(count)
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Utility function to get channel option from slash command
pub fn get_channel_option(options: &[CommandDataOption], name: &str) -> Option<u64> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .and_then(|s| s.parse().ok())
}

/// Utility function to get role option from slash command
pub fn get_role_option(options: &[CommandDataOption], name: &str) -> Option<u64> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .and_then(|s| s.parse().ok())
}

/// Utility function to get boolean option from slash command
pub fn get_bool_option(options: &[CommandDataOption], name: &str) -> Option<bool> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_bool())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(name: &str, value: serde_json::Value) -> CommandDataOption {
        serde_json::from_value(json!({
            "name": name,
            "type": 3,
            "value": value,
        }))
        .unwrap()
    }

    #[test]
    fn test_create_slash_commands() {
        let commands = create_slash_commands();

        let command_names: Vec<String> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();

        assert_eq!(command_names, vec!["announce".to_string()]);
    }

    #[test]
    fn test_option_getters() {
        let options = vec![
            option("message", json!("Hello {channel}")),
            option("channel", json!("1234567890")),
            option("role", json!("42")),
            option("ping_everyone", json!(true)),
        ];

        assert_eq!(
            get_string_option(&options, "message").as_deref(),
            Some("Hello {channel}")
        );
        assert_eq!(get_channel_option(&options, "channel"), Some(1234567890));
        assert_eq!(get_role_option(&options, "role"), Some(42));
        assert_eq!(get_bool_option(&options, "ping_everyone"), Some(true));
        assert_eq!(get_string_option(&options, "missing"), None);
        assert_eq!(get_bool_option(&options, "message"), None);
    }
}
