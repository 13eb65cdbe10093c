//! Pricing tiers

use serde::{Deserialize, Serialize};

/// Server-computed pricing classification of a cart line.
///
/// The server flips a line to `wholesale` when its quantity reaches the
/// product's minimum order quantity; the client only ever reads the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    /// Standard per-unit pricing.
    Retail,
    /// Discounted pricing unlocked at or above the MOQ.
    Wholesale,
}

impl PricingTier {
    /// Whether this tier is the discounted wholesale tier.
    #[must_use]
    pub const fn is_wholesale(self) -> bool {
        matches!(self, Self::Wholesale)
    }

    /// Lowercase label, matching the wire value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Wholesale => "wholesale",
        }
    }
}

/// Server-supplied wholesale eligibility hint for a cart line.
///
/// Views render MOQ badges from this pair rather than re-deriving threshold
/// logic client-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleHint {
    /// Whether the product offers a wholesale tier at all.
    pub can_wholesale: bool,
    /// Quantity at which wholesale pricing applies.
    pub moq_required: u32,
}
