//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Announcer

use std::sync::Arc;

use crate::features::announcements::Announcer;

/// Shared context for all command handlers
///
/// Holds the announcement flow and, through it, the preview store.
#[derive(Clone)]
pub struct CommandContext {
    pub announcer: Arc<Announcer>,
}

impl CommandContext {
    pub fn new(announcer: Arc<Announcer>) -> Self {
        Self { announcer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
