//! Content classification seam.

use watchtower_core::RiskLevel;

/// Assigns a risk level to free-form post content.
pub trait ThreatClassifier: Send + Sync {
    fn classify(&self, content: &str) -> RiskLevel;
}

const HIGH: &[&str] = &[
    "fire",
    "shooting",
    "explosion",
    "attack",
    "danger",
    "emergency",
    "flood",
    "flooding",
];
const MEDIUM: &[&str] = &["protest", "accident", "crash", "blocked", "crowd", "traffic", "police"];

/// Placeholder heuristic: the most severe keyword found wins, `low` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl ThreatClassifier for KeywordClassifier {
    fn classify(&self, content: &str) -> RiskLevel {
        let content = content.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| content.contains(w));

        if mentions(HIGH) {
            RiskLevel::High
        } else if mentions(MEDIUM) {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}
