//! Environment configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add preview lifetime and health port settings
//! - 1.0.0: Initial implementation with token, allowed role and default channel

use anyhow::{anyhow, bail, Context as _, Result};
use serenity::model::id::{ChannelId, GuildId, RoleId};
use std::str::FromStr;
use std::time::Duration;

/// Default lifetime of an unconfirmed preview
pub const DEFAULT_PREVIEW_TTL_MINUTES: u64 = 15;

/// Runtime configuration for the bot binary
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub allowed_role_id: Option<RoleId>,
    pub default_channel_id: Option<ChannelId>,
    pub health_port: Option<u16>,
    pub disable_login: bool,
    pub preview_ttl: Duration,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));

        let discord_token = get("TOKEN").or_else(|| get("DISCORD_TOKEN")).ok_or_else(|| {
            anyhow!("Missing TOKEN in environment. Create a .env file with TOKEN=your_bot_token")
        })?;

        let allowed_role_id = parse_optional::<u64>("ALLOWED_ROLE_ID", get("ALLOWED_ROLE_ID"))?
            .map(RoleId);
        let default_channel_id =
            parse_optional::<u64>("DEFAULT_CHANNEL_ID", get("DEFAULT_CHANNEL_ID"))?.map(ChannelId);
        let health_port = parse_optional::<u16>("HEALTH_PORT", get("HEALTH_PORT"))?;

        let disable_login = get("DISABLE_LOGIN").map(|v| is_truthy(&v)).unwrap_or(false);

        let ttl_minutes = parse_optional::<u64>("PREVIEW_TTL_MINUTES", get("PREVIEW_TTL_MINUTES"))?
            .unwrap_or(DEFAULT_PREVIEW_TTL_MINUTES);
        if ttl_minutes == 0 {
            bail!("PREVIEW_TTL_MINUTES must be greater than zero");
        }

        Ok(Config {
            discord_token,
            allowed_role_id,
            default_channel_id,
            health_port,
            disable_login,
            preview_ttl: Duration::from_secs(ttl_minutes * 60),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Settings for the command registrar binary
#[derive(Debug, Clone)]
pub struct RegistrarConfig {
    pub discord_token: String,
    pub client_id: u64,
    pub guild_ids: Vec<GuildId>,
}

impl RegistrarConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));

        let token = get("TOKEN").or_else(|| get("DISCORD_TOKEN"));
        let (Some(discord_token), Some(client_id)) = (token, get("CLIENT_ID")) else {
            bail!("Missing TOKEN or CLIENT_ID in environment. Create a .env file (see .env.example).");
        };
        let client_id = parse_id("CLIENT_ID", &client_id)?;

        // GUILD_IDS wins over the single-guild GUILD_ID
        let raw = get("GUILD_IDS").or_else(|| get("GUILD_ID")).unwrap_or_default();
        let guild_ids = parse_id_list(&raw)?.into_iter().map(GuildId).collect::<Vec<_>>();
        if guild_ids.is_empty() {
            bail!(
                "No guild(s) provided. Set GUILD_ID for a single guild or GUILD_IDS for multiple (comma or space separated)."
            );
        }

        Ok(RegistrarConfig {
            discord_token,
            client_id,
            guild_ids,
        })
    }
}

/// Read `CLIENT_ID` for the invite printer
pub fn client_id_from_lookup<F>(lookup: F) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = non_blank(lookup("CLIENT_ID")).ok_or_else(|| anyhow!("Missing CLIENT_ID in .env"))?;
    parse_id("CLIENT_ID", &raw)
}

/// Split a comma/whitespace separated list of snowflakes
pub fn parse_id_list(raw: &str) -> Result<Vec<u64>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_id("guild id", s))
        .collect()
}

fn parse_id(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("{name} is not a valid Discord id: {raw:?}"))
}

fn parse_optional<T>(name: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|v| {
        v.parse::<T>()
            .with_context(|| format!("{name} has an invalid value: {v:?}"))
    })
    .transpose()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
