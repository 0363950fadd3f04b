//! Lead Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Freshly captured, nobody has reached out yet.
    #[default]
    New,
    /// First contact made.
    Contacted,
    /// Confirmed as a real opportunity.
    Qualified,
    /// A proposal or quotation has been sent.
    Proposal,
    /// Terms are being negotiated.
    Negotiation,
    /// Closed as a customer.
    Won,
    /// Closed without a deal.
    Lost,
}

impl LeadStatus {
    /// Database / wire form of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// All statuses in pipeline order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::New,
            Self::Contacted,
            Self::Qualified,
            Self::Proposal,
            Self::Negotiation,
            Self::Won,
            Self::Lost,
        ]
    }

    /// Whether the lead has left the pipeline.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::UnknownStatus {
                kind: "lead",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_status() {
        assert_eq!("qualified".parse::<LeadStatus>(), Ok(LeadStatus::Qualified));
        assert_eq!("won".parse::<LeadStatus>(), Ok(LeadStatus::Won));
    }

    #[test]
    fn test_parse_unknown_status() {
        let err = "archived".parse::<LeadStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown lead status: archived");
    }

    #[test]
    fn test_serde_matches_as_str() {
        for status in LeadStatus::all() {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_closed_statuses() {
        assert!(LeadStatus::Won.is_closed());
        assert!(LeadStatus::Lost.is_closed());
        assert!(!LeadStatus::Negotiation.is_closed());
    }
}
