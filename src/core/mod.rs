//! # Core Module
//!
//! Configuration, error types, embed builders and Discord limits for the bot.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add invite URL helper
//! - 1.1.0: Add announcement embed and error taxonomy
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod error;
pub mod invite;
pub mod response;

// Re-export commonly used items
pub use config::{Config, RegistrarConfig};
pub use embeds::announcement_embed;
pub use error::{AnnounceError, GatewayError};
pub use invite::invite_url;
pub use response::{truncate_for_embed, EMBED_LIMIT, MODAL_INPUT_LIMIT};
