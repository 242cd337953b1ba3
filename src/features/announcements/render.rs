//! Placeholder substitution for announcement text

use serenity::model::id::{ChannelId, RoleId};

pub const CHANNEL_PLACEHOLDER: &str = "{channel}";
pub const ROLE_PLACEHOLDER: &str = "{role}";

/// Replace every `{channel}` with a channel link and every `{role}` with a role mention.
///
/// Placeholders without a target are left as typed.
pub fn render_mentions(text: &str, channel: Option<ChannelId>, role: Option<RoleId>) -> String {
    let mut rendered = text.to_string();
    if let Some(channel) = channel {
        rendered = rendered.replace(CHANNEL_PLACEHOLDER, &format!("<#{}>", channel.0));
    }
    if let Some(role) = role {
        rendered = rendered.replace(ROLE_PLACEHOLDER, &format!("<@&{}>", role.0));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_targets_is_identity() {
        for text in ["", "plain text", "{channel} and {role}", "multi\nline\n{x}"] {
            assert_eq!(render_mentions(text, None, None), text);
        }
    }

    #[test]
    fn test_replaces_every_channel_occurrence() {
        assert_eq!(
            render_mentions("{channel} {channel}", Some(ChannelId(1)), None),
            "<#1> <#1>"
        );
    }

    #[test]
    fn test_replaces_role() {
        assert_eq!(
            render_mentions("Hey {role}, see {role}", None, Some(RoleId(9))),
            "Hey <@&9>, see <@&9>"
        );
    }

    #[test]
    fn test_absent_target_leaves_placeholder() {
        assert_eq!(
            render_mentions("{channel} {role}", Some(ChannelId(2)), None),
            "<#2> {role}"
        );
        assert_eq!(
            render_mentions("{channel} {role}", None, Some(RoleId(3))),
            "{channel} <@&3>"
        );
    }

    #[test]
    fn test_empty_text_with_targets() {
        assert_eq!(render_mentions("", Some(ChannelId(1)), Some(RoleId(2))), "");
    }

    #[test]
    fn test_placeholders_are_case_sensitive() {
        assert_eq!(
            render_mentions("{Channel} {channel}}", Some(ChannelId(4)), None),
            "{Channel} <#4>}"
        );
    }
}
