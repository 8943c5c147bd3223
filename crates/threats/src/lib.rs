//! Threat-analysis module.
//!
//! Serves analyzed threats through the validated [`ThreatsApi`] and listens
//! for high-risk social posts published by the social module.

pub mod api;
pub mod classifier;
pub mod events;
pub mod feed;
pub mod model;
pub mod module;
pub mod schema;
mod service;

pub use api::ThreatsApi;
pub use classifier::{KeywordClassifier, ThreatClassifier};
pub use feed::{SampleThreatFeed, ThreatFeed};
pub use model::{RelatedPost, Threat, ThreatLocation};
pub use module::ThreatsModule;

/// Module name; namespace of every threat topic.
pub const MODULE: &str = "threats";
