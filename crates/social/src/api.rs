//! Public API of the social module.
//!
//! Every operation hands its result to a validator before returning it, so a
//! caller only ever sees data that matches the published post schema.

use std::sync::Arc;

use watchtower_contracts::{Contract, Validator};
use watchtower_core::{ApiError, ApiResult};
use watchtower_events::EventBus;

use crate::MODULE;
use crate::feed::SocialFeed;
use crate::model::SocialPost;
use crate::schema::social_posts_validator;
use crate::service::SocialService;

const LOCATION: &str = "social/api";

const FETCH_RECENT: Contract = Contract::outgoing("fetchRecentSocialData", LOCATION, MODULE, "client");
const FETCH_GEOTAGGED: Contract = Contract::outgoing("fetchGeotaggedPosts", LOCATION, MODULE, "client");
const FETCH_BY_PLATFORM: Contract =
    Contract::outgoing("fetchSocialMediaByPlatform", LOCATION, MODULE, "client");

/// Operation names exposed by [`SocialApi`].
pub const OPERATIONS: &[&str] = &[
    FETCH_RECENT.action,
    FETCH_GEOTAGGED.action,
    FETCH_BY_PLATFORM.action,
];

pub struct SocialApi {
    service: SocialService,
    posts: Validator,
}

impl SocialApi {
    pub fn new(feed: Arc<dyn SocialFeed>, bus: EventBus) -> Self {
        Self {
            service: SocialService::new(feed, bus),
            posts: social_posts_validator(),
        }
    }

    /// Most recent posts across every platform.
    ///
    /// Publishes `social/dataLoaded`, plus `social/newHighRiskPost` per
    /// high-risk post.
    pub async fn fetch_recent_social_data(&self) -> ApiResult<Vec<SocialPost>> {
        let posts = self.service.fetch_recent().await.map_err(service_error)?;
        Ok(self.posts.validate(posts, &FETCH_RECENT)?)
    }

    /// Posts carrying both a latitude and a longitude.
    pub async fn fetch_geotagged_posts(&self) -> ApiResult<Vec<SocialPost>> {
        let posts = self.service.fetch_geotagged().await.map_err(service_error)?;
        Ok(self.posts.validate(posts, &FETCH_GEOTAGGED)?)
    }

    /// Posts from one platform, matched case-insensitively.
    pub async fn fetch_social_media_by_platform(&self, platform: &str) -> ApiResult<Vec<SocialPost>> {
        let platform = ApiError::require_non_empty("platform", platform)?;
        let posts = self
            .service
            .fetch_by_platform(platform)
            .await
            .map_err(service_error)?;
        Ok(self.posts.validate(posts, &FETCH_BY_PLATFORM)?)
    }
}

impl core::fmt::Debug for SocialApi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SocialApi").field("operations", &OPERATIONS).finish()
    }
}

fn service_error(err: anyhow::Error) -> ApiError {
    ApiError::service(format!("{err:#}"))
}
