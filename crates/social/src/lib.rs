//! Social-feed module.
//!
//! Ingests posts from a [`SocialFeed`], announces them on the event bus, and
//! serves them to collaborators through the validated [`SocialApi`].

pub mod api;
pub mod events;
pub mod feed;
pub mod model;
pub mod module;
pub mod schema;
mod service;

pub use api::SocialApi;
pub use feed::{SampleFeed, SocialFeed};
pub use model::SocialPost;
pub use module::SocialModule;

/// Module name; namespace of every social topic.
pub const MODULE: &str = "social";
