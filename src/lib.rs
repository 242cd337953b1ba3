// Core layer - shared types and configuration
pub mod core;

// Features layer - announcement flow and health endpoint
pub mod features;

// Component and modal routing
pub mod message_components;

// Application layer
pub mod command_handler;
pub mod commands;

// Re-export core config
pub use core::Config;

// Re-export feature items
pub use features::{spawn_health_server, Announcer, InMemoryPreviewStore, PreviewStore};
