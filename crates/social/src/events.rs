//! Social event catalog.
//!
//! Topic names are part of the module's public contract. Bump
//! [`CATALOG_VERSION`] whenever one is added, renamed or removed.

use watchtower_events::Topic;

pub const CATALOG_VERSION: u32 = 1;

/// Payload: the full list of posts returned by a recent-data fetch.
pub const DATA_LOADED: Topic = Topic::new("social/dataLoaded");

/// Payload: `{ "error": "<message>" }`.
pub const DATA_ERROR: Topic = Topic::new("social/dataError");

/// Payload: one post whose `riskLevel` is `high`.
pub const NEW_HIGH_RISK_POST: Topic = Topic::new("social/newHighRiskPost");

pub const ALL: &[Topic] = &[DATA_LOADED, DATA_ERROR, NEW_HIGH_RISK_POST];
