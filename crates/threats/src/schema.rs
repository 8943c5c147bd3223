//! Contracts guarding the threats module boundary.

use watchtower_contracts::{Schema, Validator};
use watchtower_core::RiskLevel;

fn location_schema() -> Schema {
    Schema::object()
        .required("address", Schema::String)
        .required("latitude", Schema::Number)
        .required("longitude", Schema::Number)
}

fn related_post_schema() -> Schema {
    Schema::object()
        .required("id", Schema::String)
        .required("platform", Schema::String)
        .required("username", Schema::String)
        .required("content", Schema::String)
        .required("timestamp", Schema::Timestamp)
        .optional("location", Schema::String)
}

pub fn threat_schema() -> Schema {
    Schema::object()
        .required("id", Schema::String)
        .required("title", Schema::String)
        .required("description", Schema::String)
        .required("riskLevel", RiskLevel::schema())
        .required("timestamp", Schema::Timestamp)
        .required("location", location_schema())
        .required("relatedPosts", Schema::array_of(related_post_schema()))
}

pub fn threat_validator() -> Validator {
    Validator::new(threat_schema(), "Threat")
}

pub fn threats_validator() -> Validator {
    Validator::new(Schema::array_of(threat_schema()), "Threats")
}

pub fn risk_level_validator() -> Validator {
    Validator::new(RiskLevel::schema(), "RiskLevel")
}
