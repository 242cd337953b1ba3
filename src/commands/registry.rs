//! Command handler registry
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Command name → handler lookup
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a set of handlers
    pub fn with_handlers(handlers: impl IntoIterator<Item = Arc<dyn SlashCommandHandler>>) -> Self {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler under every name it declares. A later handler wins on a name clash.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered names (not handlers)
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn command_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use anyhow::Result;
    use async_trait::async_trait;
    use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
    use serenity::prelude::Context;
    use uuid::Uuid;

    struct StubHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl SlashCommandHandler for StubHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _serenity_ctx: &Context,
            _command: &ApplicationCommandInteraction,
            _request_id: Uuid,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get("announce").is_none());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(StubHandler { names: &["announce"] }));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("announce"));
        assert!(registry.get("announce").is_some());
        assert!(!registry.contains("announcement"));
    }

    #[test]
    fn test_handler_with_aliases() {
        let registry = CommandRegistry::with_handlers([
            Arc::new(StubHandler { names: &["announce", "broadcast"] }) as Arc<dyn SlashCommandHandler>,
        ]);

        assert_eq!(registry.len(), 2);
        assert!(Arc::ptr_eq(
            &registry.get("announce").unwrap(),
            &registry.get("broadcast").unwrap()
        ));
    }

    #[test]
    fn test_lists_command_names() {
        let registry = CommandRegistry::with_handlers([
            Arc::new(StubHandler { names: &["announce"] }) as Arc<dyn SlashCommandHandler>,
        ]);

        let names: Vec<&str> = registry.command_names().copied().collect();
        assert_eq!(names, vec!["announce"]);
    }
}
