//! # Features
//!
//! - **announcements**: compose, preview and post announcements
//! - **health**: optional HTTP liveness endpoint

pub mod announcements;
pub mod health;

pub use announcements::{Announcer, InMemoryPreviewStore, PreviewStore};
pub use health::spawn_health_server;
