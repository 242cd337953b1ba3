//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: AnnounceHandler

pub mod announce;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![Arc::new(announce::AnnounceHandler)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_defined_command_has_a_handler() {
        let handlers = create_all_handlers();
        for command in crate::commands::slash::create_slash_commands() {
            let name = command.0.get("name").unwrap().as_str().unwrap().to_string();
            assert!(
                handlers.iter().any(|h| h.command_names().contains(&name.as_str())),
                "No handler for /{name}"
            );
        }
    }
}
