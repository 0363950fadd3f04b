//! Status badges.
//!
//! Maps lead, quotation and notification statuses to the label and visual
//! variant list views render them with.

use serde::Serialize;

use crm_common::{LeadStatus, QuotationStatus};

use crate::notifications::NotificationKind;

/// Visual style of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Success,
    Warning,
    Destructive,
    Outline,
}

/// A rendered status badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl StatusBadge {
    fn new(label: &str, variant: BadgeVariant) -> Self {
        Self {
            label: label.to_string(),
            variant,
        }
    }
}

/// Values that render as a status badge.
pub trait HasBadge {
    fn badge(&self) -> StatusBadge;
}

impl HasBadge for LeadStatus {
    fn badge(&self) -> StatusBadge {
        match self {
            Self::New => StatusBadge::new("New", BadgeVariant::Default),
            Self::Contacted => StatusBadge::new("Contacted", BadgeVariant::Secondary),
            Self::Qualified => StatusBadge::new("Qualified", BadgeVariant::Secondary),
            Self::Proposal => StatusBadge::new("Proposal", BadgeVariant::Warning),
            Self::Negotiation => StatusBadge::new("Negotiation", BadgeVariant::Warning),
            Self::Won => StatusBadge::new("Won", BadgeVariant::Success),
            Self::Lost => StatusBadge::new("Lost", BadgeVariant::Destructive),
        }
    }
}

impl HasBadge for QuotationStatus {
    fn badge(&self) -> StatusBadge {
        match self {
            Self::Draft => StatusBadge::new("Draft", BadgeVariant::Outline),
            Self::Sent => StatusBadge::new("Sent", BadgeVariant::Secondary),
            Self::Accepted => StatusBadge::new("Accepted", BadgeVariant::Success),
            Self::Rejected => StatusBadge::new("Rejected", BadgeVariant::Destructive),
            Self::Expired => StatusBadge::new("Expired", BadgeVariant::Warning),
        }
    }
}

impl HasBadge for NotificationKind {
    fn badge(&self) -> StatusBadge {
        match self {
            Self::Info => StatusBadge::new("Info", BadgeVariant::Default),
            Self::Success => StatusBadge::new("Success", BadgeVariant::Success),
            Self::Warning => StatusBadge::new("Warning", BadgeVariant::Warning),
            Self::Error => StatusBadge::new("Error", BadgeVariant::Destructive),
        }
    }
}

/// Badge for a status string of unknown origin.
///
/// Known lead and quotation statuses get their own badge; anything else is
/// shown title-cased with the outline variant.
pub fn badge_for_raw(status: &str) -> StatusBadge {
    if let Ok(lead) = status.parse::<LeadStatus>() {
        return lead.badge();
    }
    if let Ok(quotation) = status.parse::<QuotationStatus>() {
        return quotation.badge();
    }

    StatusBadge {
        label: title_case(status),
        variant: BadgeVariant::Outline,
    }
}

fn title_case(raw: &str) -> String {
    raw.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
