//! OAuth2 invite URL construction

use serenity::model::permissions::Permissions;

/// Permissions the bot needs to post announcements: Send Messages + Embed Links
pub fn invite_permissions() -> Permissions {
    Permissions::SEND_MESSAGES | Permissions::EMBED_LINKS
}

/// Build the bot invite URL for an application id
pub fn invite_url(client_id: u64) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={client_id}&permissions={}&scope=bot%20applications.commands",
        invite_permissions().bits()
    )
}
