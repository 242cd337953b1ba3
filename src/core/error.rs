//! Error types for the announcement flow
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial taxonomy (permission, validation, not found, ownership, expiry, transport)

use thiserror::Error;

/// Failures a user can run into while composing or resolving an announcement.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnounceError {
    #[error("You do not have permission to use this command. Required: Administrator, Manage Server, or the configured allowed role.")]
    PermissionDenied,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("This preview is not yours.")]
    NotOwner,

    #[error("This preview has expired. Please run /announce again.")]
    Expired,

    #[error("{0}")]
    Transport(String),
}

impl AnnounceError {
    /// Whether the error ends the preview flow, so the preview message should be
    /// replaced in place rather than answered privately.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnnounceError::NotFound(_) | AnnounceError::Expired | AnnounceError::Transport(_)
        )
    }
}

/// Errors raised by the platform gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("channel not found")]
    NotFound,

    #[error("platform request failed: {0}")]
    Transport(#[source] anyhow::Error),
}
