//! `watchtower-core` — primitives shared by every feature module.
//!
//! No IO and no async here; just the error model of the public module APIs
//! and the risk scale their records share.

pub mod error;
pub mod risk;

pub use error::{ApiError, ApiResult};
pub use risk::RiskLevel;
