//! Wire records for the cart endpoints.
//!
//! Cart payloads use camelCase field names on the wire; conversions into the
//! domain models happen here and nowhere else.

use serde::{Deserialize, Serialize};
use storefront::{
    cart::{CartLine, CartSnapshot, CartSummary, LineId},
    money::Price,
    pricing::{PricingTier, WholesaleHint},
    product::ProductSnapshot,
};

/// `GET /api/cart` payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CartPayload {
    #[serde(default)]
    pub items: Vec<CartLineRecord>,
    pub summary: Option<CartSummaryRecord>,
}

/// One cart line on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineRecord {
    pub line_id: String,
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub pricing_tier: PricingTier,
    pub item_price: Price,
    pub subtotal: Price,
    pub savings: Price,
    #[serde(default)]
    pub can_wholesale: bool,
    #[serde(default)]
    pub moq_required: u32,
}

/// Server-computed aggregate totals on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartSummaryRecord {
    pub subtotal: Price,
    pub shipping: Price,
    pub total_savings: Price,
    pub total: Price,
    pub total_items: u64,
}

/// `GET /api/cart/count` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartCountRecord {
    pub total_items: u64,
}

/// `POST /api/cart/add` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddItemRequest<'a> {
    pub product_id: &'a str,
    pub quantity: u32,
}

/// `PUT /api/cart/update/:lineId` body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateItemRequest {
    pub quantity: u32,
}

impl From<CartPayload> for CartSnapshot {
    fn from(payload: CartPayload) -> Self {
        let items = payload.items.into_iter().map(CartLine::from).collect();
        let summary = payload.summary.map(CartSummary::from).unwrap_or_default();

        Self::new(items, summary)
    }
}

impl From<CartLineRecord> for CartLine {
    fn from(record: CartLineRecord) -> Self {
        Self {
            line_id: LineId::from(record.line_id),
            product: record.product,
            quantity: record.quantity,
            pricing_tier: record.pricing_tier,
            item_price: record.item_price,
            subtotal: record.subtotal,
            savings: record.savings,
            wholesale: WholesaleHint {
                can_wholesale: record.can_wholesale,
                moq_required: record.moq_required,
            },
        }
    }
}

impl From<CartSummaryRecord> for CartSummary {
    fn from(record: CartSummaryRecord) -> Self {
        Self {
            subtotal: record.subtotal,
            shipping: record.shipping,
            savings: record.total_savings,
            total: record.total,
            total_items: record.total_items,
        }
    }
}
