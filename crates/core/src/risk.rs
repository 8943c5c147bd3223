use serde::{Deserialize, Serialize};
use watchtower_contracts::Schema;

/// Three-level risk classification shared by posts and threats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Wire literals, most severe first.
    pub const LITERALS: [&'static str; 3] = ["high", "medium", "low"];

    /// Enumeration schema accepting exactly [`RiskLevel::LITERALS`].
    pub fn schema() -> Schema {
        Schema::enumeration(Self::LITERALS)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl core::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_schema_literals() {
        for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
            let json = serde_json::to_value(level).unwrap();
            assert_eq!(json, level.as_str());
            assert!(RiskLevel::LITERALS.contains(&level.as_str()));
        }
    }

    #[test]
    fn severity_orders_low_to_high() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("extreme".parse::<RiskLevel>().is_err());
    }
}
