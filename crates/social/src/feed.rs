//! Data sources behind the social service.

use std::time::Duration;

use async_trait::async_trait;
use watchtower_core::RiskLevel;
use watchtower_runtime::RuntimeConfig;

use crate::model::SocialPost;

/// Where posts come from. Real platform connectors live outside this crate.
#[async_trait]
pub trait SocialFeed: Send + Sync {
    async fn recent_posts(&self) -> anyhow::Result<Vec<SocialPost>>;
}

/// Fixed set of fixture posts served after a simulated delay.
#[derive(Debug, Clone)]
pub struct SampleFeed {
    latency: Duration,
    posts: Vec<SocialPost>,
}

impl SampleFeed {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            posts: sample_posts(),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.simulated_latency)
    }

    /// Serve `posts` instead of the bundled fixtures.
    pub fn with_posts(mut self, posts: Vec<SocialPost>) -> Self {
        self.posts = posts;
        self
    }
}

#[async_trait]
impl SocialFeed for SampleFeed {
    async fn recent_posts(&self) -> anyhow::Result<Vec<SocialPost>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.posts.clone())
    }
}

fn post(
    id: &str,
    platform: &str,
    username: &str,
    content: &str,
    timestamp: &str,
    (location, latitude, longitude): (&str, f64, f64),
    risk_level: RiskLevel,
) -> SocialPost {
    SocialPost {
        id: id.to_string(),
        platform: platform.to_string(),
        username: username.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        location: Some(location.to_string()),
        latitude: Some(latitude),
        longitude: Some(longitude),
        risk_level,
    }
}

fn sample_posts() -> Vec<SocialPost> {
    vec![
        post(
            "1",
            "twitter",
            "@emergency_alert",
            "Large fire reported at downtown warehouse. Multiple fire engines responding. #emergency",
            "2023-11-10T14:30:00Z",
            ("Downtown District", 37.7849, -122.4294),
            RiskLevel::High,
        ),
        post(
            "2",
            "instagram",
            "city_watch",
            "Protest gathering at City Hall. Approximately 200 people present. Peaceful so far.",
            "2023-11-10T13:15:00Z",
            ("City Hall Plaza", 37.7793, -122.4193),
            RiskLevel::Medium,
        ),
        post(
            "3",
            "tiktok",
            "weather_watcher",
            "Flash flooding on Main Street after heavy rain. Cars stuck, needs immediate attention! #flooding",
            "2023-11-10T12:45:00Z",
            ("Main Street", 37.7830, -122.4104),
            RiskLevel::High,
        ),
        post(
            "4",
            "twitter",
            "@traffic_alert",
            "Multi-vehicle accident on Highway 101 Northbound. Traffic backed up for miles. #traffic",
            "2023-11-10T11:20:00Z",
            ("Highway 101 Northbound", 37.7650, -122.4350),
            RiskLevel::Medium,
        ),
        post(
            "5",
            "instagram",
            "neighborhood_watch",
            "Suspicious activity reported near Central Park. Group of individuals loitering near the playground.",
            "2023-11-10T10:05:00Z",
            ("Central Park", 37.7695, -122.4810),
            RiskLevel::Low,
        ),
    ]
}
