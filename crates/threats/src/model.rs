use serde::{Deserialize, Serialize};
use watchtower_core::RiskLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatLocation {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Social post cited as evidence for a threat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedPost {
    pub id: String,
    pub platform: String,
    pub username: String,
    pub content: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// An analyzed threat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    pub id: String,
    pub title: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub timestamp: String,
    pub location: ThreatLocation,
    pub related_posts: Vec<RelatedPost>,
}
