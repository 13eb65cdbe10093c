//! Cart snapshots

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    money::Price,
    pricing::{PricingTier, WholesaleHint},
    product::ProductSnapshot,
};

/// Opaque, server-assigned cart line identifier.
///
/// Stable across quantity updates to the same line and unique within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LineId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LineId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cart line with its server-computed pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Server-assigned line id.
    pub line_id: LineId,
    /// Denormalized product data.
    pub product: ProductSnapshot,
    /// Units of the product in this line, always at least 1.
    pub quantity: u32,
    /// Tier the server applied given the quantity and the product's MOQ.
    pub pricing_tier: PricingTier,
    /// Per-unit price at the applied tier.
    pub item_price: Price,
    /// Line total at the applied tier.
    pub subtotal: Price,
    /// Amount saved versus retail pricing.
    pub savings: Price,
    /// Wholesale eligibility hint for MOQ badges.
    pub wholesale: WholesaleHint,
}

/// Aggregate totals the server derives from a cart's items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of line subtotals.
    pub subtotal: Price,
    /// Shipping cost.
    pub shipping: Price,
    /// Total savings across all lines.
    pub savings: Price,
    /// Grand total.
    pub total: Price,
    /// Total unit count across all lines.
    pub total_items: u64,
}

/// Server-authoritative, point-in-time cart state.
///
/// There is deliberately no mutation API here: a snapshot is replaced
/// wholesale by a fresh fetch, never patched, because a quantity change can
/// flip a line's tier and recompute the entire summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    items: Vec<CartLine>,
    summary: CartSummary,
}

impl CartSnapshot {
    /// Assemble a snapshot from server-provided parts.
    #[must_use]
    pub fn new(items: Vec<CartLine>, summary: CartSummary) -> Self {
        Self { items, summary }
    }

    /// The empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines in server order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Server-computed totals.
    #[must_use]
    pub fn summary(&self) -> &CartSummary {
        &self.summary
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.items.iter().find(|line| &line.line_id == line_id)
    }
}
