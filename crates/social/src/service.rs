//! Internal service layer. Not validated; only the API crosses the boundary.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};
use watchtower_events::{EventBus, Topic};

use crate::events;
use crate::feed::SocialFeed;
use crate::model::SocialPost;

pub(crate) struct SocialService {
    feed: Arc<dyn SocialFeed>,
    bus: EventBus,
}

impl SocialService {
    pub(crate) fn new(feed: Arc<dyn SocialFeed>, bus: EventBus) -> Self {
        Self { feed, bus }
    }

    /// Fetch recent posts and announce them.
    pub(crate) async fn fetch_recent(&self) -> anyhow::Result<Vec<SocialPost>> {
        debug!("fetching recent social media data");
        let posts = self.load().await?;

        self.announce(events::DATA_LOADED, &posts);
        for post in posts.iter().filter(|p| p.risk_level.is_high()) {
            self.announce(events::NEW_HIGH_RISK_POST, post);
        }
        Ok(posts)
    }

    pub(crate) async fn fetch_geotagged(&self) -> anyhow::Result<Vec<SocialPost>> {
        debug!("fetching geotagged social media posts");
        let posts = self.load().await?;
        Ok(posts.into_iter().filter(SocialPost::is_geotagged).collect())
    }

    pub(crate) async fn fetch_by_platform(&self, platform: &str) -> anyhow::Result<Vec<SocialPost>> {
        debug!(platform, "fetching posts for platform");
        let posts = self.load().await?;
        Ok(posts.into_iter().filter(|p| p.is_from(platform)).collect())
    }

    async fn load(&self) -> anyhow::Result<Vec<SocialPost>> {
        match self.feed.recent_posts().await {
            Ok(posts) => Ok(posts),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "social feed failed");
                self.bus
                    .publish(events::DATA_ERROR, &json!({ "error": format!("{err:#}") }));
                Err(err)
            }
        }
    }

    fn announce<T: serde::Serialize + ?Sized>(&self, topic: Topic, payload: &T) {
        if let Err(err) = self.bus.emit(topic, payload) {
            warn!(topic = %topic, error = %err, "could not serialize event payload");
        }
    }
}
