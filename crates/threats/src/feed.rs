//! Data sources behind the threat service.

use std::time::Duration;

use async_trait::async_trait;
use watchtower_core::RiskLevel;
use watchtower_runtime::RuntimeConfig;

use crate::model::{RelatedPost, Threat, ThreatLocation};

#[async_trait]
pub trait ThreatFeed: Send + Sync {
    async fn threats(&self) -> anyhow::Result<Vec<Threat>>;
}

/// Fixed set of fixture threats served after a simulated delay.
#[derive(Debug, Clone)]
pub struct SampleThreatFeed {
    latency: Duration,
    threats: Vec<Threat>,
}

impl SampleThreatFeed {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            threats: sample_threats(),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.simulated_latency)
    }

    pub fn with_threats(mut self, threats: Vec<Threat>) -> Self {
        self.threats = threats;
        self
    }
}

#[async_trait]
impl ThreatFeed for SampleThreatFeed {
    async fn threats(&self) -> anyhow::Result<Vec<Threat>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.threats.clone())
    }
}

fn related(id: &str, platform: &str, username: &str, content: &str, timestamp: &str, location: &str) -> RelatedPost {
    RelatedPost {
        id: id.to_string(),
        platform: platform.to_string(),
        username: username.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        location: Some(location.to_string()),
    }
}

fn threat(
    id: &str,
    title: &str,
    description: &str,
    risk_level: RiskLevel,
    timestamp: &str,
    (address, latitude, longitude): (&str, f64, f64),
    related_posts: Vec<RelatedPost>,
) -> Threat {
    Threat {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        risk_level,
        timestamp: timestamp.to_string(),
        location: ThreatLocation {
            address: address.to_string(),
            latitude,
            longitude,
        },
        related_posts,
    }
}

fn sample_threats() -> Vec<Threat> {
    vec![
        threat(
            "1",
            "Major Fire in Downtown District",
            "Multiple reports of a large fire at a warehouse in the downtown area. Fire department has been dispatched.",
            RiskLevel::High,
            "2023-11-10T14:30:00Z",
            ("Downtown District", 37.7849, -122.4294),
            vec![
                related(
                    "1",
                    "twitter",
                    "@emergency_alert",
                    "Large fire reported at downtown warehouse. Multiple fire engines responding. #emergency",
                    "2023-11-10T14:30:00Z",
                    "Downtown District",
                ),
                related(
                    "6",
                    "instagram",
                    "downtown_resident",
                    "Huge flames visible from my apartment window. Hearing sirens everywhere. Stay safe!",
                    "2023-11-10T14:32:00Z",
                    "Downtown District",
                ),
            ],
        ),
        threat(
            "2",
            "Protest Activity at City Hall",
            "Gathering of approximately 200 protesters at City Hall Plaza. Currently peaceful but monitoring for potential escalation.",
            RiskLevel::Medium,
            "2023-11-10T13:15:00Z",
            ("City Hall Plaza", 37.7793, -122.4193),
            vec![
                related(
                    "2",
                    "instagram",
                    "city_watch",
                    "Protest gathering at City Hall. Approximately 200 people present. Peaceful so far.",
                    "2023-11-10T13:15:00Z",
                    "City Hall Plaza",
                ),
                related(
                    "7",
                    "twitter",
                    "@protest_organizer",
                    "Join us at City Hall to make our voices heard! Peaceful protest for justice. #CityHallProtest",
                    "2023-11-10T12:45:00Z",
                    "City Hall Plaza",
                ),
            ],
        ),
        threat(
            "3",
            "Flash Flooding on Main Street",
            "Heavy rainfall has caused flash flooding on Main Street. Multiple vehicles stranded and road partially blocked.",
            RiskLevel::High,
            "2023-11-10T12:45:00Z",
            ("Main Street", 37.7830, -122.4104),
            vec![
                related(
                    "3",
                    "tiktok",
                    "weather_watcher",
                    "Flash flooding on Main Street after heavy rain. Cars stuck, needs immediate attention! #flooding",
                    "2023-11-10T12:45:00Z",
                    "Main Street",
                ),
                related(
                    "8",
                    "twitter",
                    "@stranded_driver",
                    "My car is stuck in water on Main St. Water level rising quickly. Need help! @CityRescue",
                    "2023-11-10T12:50:00Z",
                    "Main Street",
                ),
            ],
        ),
    ]
}
