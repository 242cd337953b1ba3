//! Slash command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use super::context::CommandContext;

/// A handler for one or more slash commands.
///
/// Handlers are looked up by name in a [`CommandRegistry`](super::CommandRegistry)
/// and must answer the interaction themselves. An `Err` is logged by the event
/// handler, which then tries a generic private failure reply. `request_id` is
/// the id the dispatcher logged the interaction under.
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Names this handler answers to
    fn command_names(&self) -> &'static [&'static str];

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn SlashCommandHandler) {}
}
