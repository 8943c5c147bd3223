//! Call-site metadata attached to a validated boundary crossing.

use serde::{Deserialize, Serialize};

/// Which way data crosses a module boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Data produced by the module and handed to a caller.
    Outgoing,
    /// Data received by the module from another module or collaborator.
    Incoming,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::Outgoing => f.write_str("outgoing"),
            Direction::Incoming => f.write_str("incoming"),
        }
    }
}

/// Contract metadata supplied at the call site.
///
/// It is not stored anywhere; it only travels with a validation attempt so a
/// failure can be traced back to the operation that produced the bad data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contract {
    /// Human-readable operation name (e.g. `fetchThreatAnalysis`).
    pub action: &'static str,
    /// Location tag of the call site (e.g. `threats/api`).
    pub location: &'static str,
    pub direction: Direction,
    /// Module the data comes from.
    pub from: &'static str,
    /// Module (or collaborator) the data goes to.
    pub to: &'static str,
}

impl Contract {
    pub const fn outgoing(
        action: &'static str,
        location: &'static str,
        from: &'static str,
        to: &'static str,
    ) -> Self {
        Self {
            action,
            location,
            direction: Direction::Outgoing,
            from,
            to,
        }
    }

    pub const fn incoming(
        action: &'static str,
        location: &'static str,
        from: &'static str,
        to: &'static str,
    ) -> Self {
        Self {
            action,
            location,
            direction: Direction::Incoming,
            from,
            to,
        }
    }
}

impl core::fmt::Display for Contract {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} @ {}, {} {} -> {}",
            self.action, self.location, self.direction, self.from, self.to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_every_part_of_the_call_site() {
        let contract = Contract::outgoing("fetchThreatAnalysis", "threats/api", "threats", "client");
        assert_eq!(
            contract.to_string(),
            "fetchThreatAnalysis @ threats/api, outgoing threats -> client"
        );
    }

    #[test]
    fn direction_serializes_lowercase() {
        let contract = Contract::incoming("onHighRiskPost", "threats/module", "social", "threats");
        let json = serde_json::to_value(&contract).unwrap();
        assert_eq!(json["direction"], "incoming");
        assert_eq!(json["from"], "social");
    }
}
