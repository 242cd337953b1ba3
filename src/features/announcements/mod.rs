//! # Feature: Announcements
//!
//! `/announce` composes an announcement, previews it privately with Send/Cancel
//! buttons, and posts it to a text or announcement channel once confirmed.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Preview lifetime with lazy expiry and background sweep
//! - 1.1.0: Modal composer, `{channel}`/`{role}` placeholders, explicit mention policy
//! - 1.0.0: Initial preview/confirm flow

pub mod discord;
pub mod flow;
pub mod gateway;
pub mod ids;
pub mod manager;
pub mod permissions;
pub mod render;
pub mod reply;
pub mod store;

pub use discord::SerenityGateway;
pub use flow::{AnnounceRequest, Announcer, ButtonPress, Destination, ModalSubmission};
pub use gateway::{AnnouncementGateway, ChannelSummary, MentionPolicy, OutgoingAnnouncement};
pub use ids::{ComposeDraft, PreviewAction, PreviewButton, PreviewId};
pub use manager::{Claim, NewAnnouncement, PendingAnnouncement, PreviewManager};
pub use permissions::MemberAccess;
pub use render::render_mentions;
pub use reply::{AnnouncementCard, InteractionReply, PreviewCard};
pub use store::{InMemoryPreviewStore, PreviewStore};
