//! Contracts guarding the social module boundary.

use watchtower_contracts::{Schema, Validator};
use watchtower_core::RiskLevel;

pub fn social_post_schema() -> Schema {
    Schema::object()
        .required("id", Schema::String)
        .required("platform", Schema::String)
        .required("username", Schema::String)
        .required("content", Schema::String)
        .required("timestamp", Schema::Timestamp)
        .optional("location", Schema::String)
        .optional("latitude", Schema::Number)
        .optional("longitude", Schema::Number)
        .required("riskLevel", RiskLevel::schema())
}

pub fn social_post_validator() -> Validator {
    Validator::new(social_post_schema(), "SocialPost")
}

pub fn social_posts_validator() -> Validator {
    Validator::new(Schema::array_of(social_post_schema()), "SocialPosts")
}
