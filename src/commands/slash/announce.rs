//! # Announce Command
//!
//! `/announce` with destination, message, mention targets and ping toggle.
//! The command is visible to everyone in a guild; who may use it is decided at
//! runtime against the configured allowed role.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Optional `channel` (falls back to `DEFAULT_CHANNEL_ID`), optional `message` opens a modal
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::channel::ChannelType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_announce_command()]
}

fn create_announce_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("announce")
        .description("Compose an announcement and preview it before posting")
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("channel")
                .description("Channel to post the announcement in")
                .kind(CommandOptionType::Channel)
                .channel_types(&[ChannelType::Text, ChannelType::News])
                .required(false)
        })
        .create_option(|option| {
            option
                .name("message")
                .description("Announcement text; leave empty to open the composer")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .create_option(|option| {
            option
                .name("mention")
                .description("Channel substituted for {channel}")
                .kind(CommandOptionType::Channel)
                .channel_types(&[ChannelType::Text, ChannelType::News])
                .required(false)
        })
        .create_option(|option| {
            option
                .name("ping_everyone")
                .description("Ping @everyone with the announcement")
                .kind(CommandOptionType::Boolean)
                .required(false)
        })
        .create_option(|option| {
            option
                .name("role")
                .description("Role substituted for {role} and pinged")
                .kind(CommandOptionType::Role)
                .required(false)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_announce_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let announce = &commands[0];
        let name = announce.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "announce");
        assert_eq!(announce.0.get("dm_permission").unwrap().as_bool(), Some(false));
        assert!(announce.0.get("default_member_permissions").is_none());
    }

    #[test]
    fn test_announce_options() {
        let commands = create_commands();
        let options = commands[0].0.get("options").unwrap().as_array().unwrap();

        let names: Vec<&str> = options
            .iter()
            .map(|opt| opt.get("name").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["channel", "message", "mention", "ping_everyone", "role"]);

        // Channel = 7, String = 3, Boolean = 5, Role = 8
        let kinds: Vec<u64> = options
            .iter()
            .map(|opt| opt.get("type").unwrap().as_u64().unwrap())
            .collect();
        assert_eq!(kinds, vec![7, 3, 7, 5, 8]);

        for option in options {
            assert_eq!(option.get("required").unwrap().as_bool(), Some(false));
        }
    }

    #[test]
    fn test_channel_options_limited_to_text_and_news() {
        let commands = create_commands();
        let options = commands[0].0.get("options").unwrap().as_array().unwrap();

        for option in options.iter().filter(|opt| opt.get("type").unwrap().as_u64() == Some(7)) {
            let kinds = option.get("channel_types").unwrap().as_array().unwrap();
            assert_eq!(kinds.len(), 2);
        }
    }
}
