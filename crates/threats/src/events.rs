//! Threat event catalog. Bump [`CATALOG_VERSION`] on any change to the set.

use watchtower_events::Topic;

pub const CATALOG_VERSION: u32 = 1;

/// Payload: the full list of analyzed threats.
pub const ANALYSIS_LOADED: Topic = Topic::new("threats/analysisLoaded");

/// Payload: `{ "error": "<message>" }`.
pub const ANALYSIS_ERROR: Topic = Topic::new("threats/analysisError");

/// Payload: one threat whose `riskLevel` is `high`.
pub const NEW_HIGH_RISK_THREAT: Topic = Topic::new("threats/newHighRiskThreat");

pub const ALL: &[Topic] = &[ANALYSIS_LOADED, ANALYSIS_ERROR, NEW_HIGH_RISK_THREAT];
