use serde::{Deserialize, Serialize};
use watchtower_core::RiskLevel;

/// A post collected from a social platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    pub platform: String,
    pub username: String,
    pub content: String,
    /// RFC 3339 publication time.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub risk_level: RiskLevel,
}

impl SocialPost {
    pub fn is_geotagged(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn is_from(&self, platform: &str) -> bool {
        self.platform.eq_ignore_ascii_case(platform)
    }
}
