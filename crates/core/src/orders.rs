//! Orders

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Price;

/// Opaque, server-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checkout payment method.
///
/// A fixed enumeration: the backend accepts every value, but only
/// cash-on-delivery is available end-to-end today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// Card payment (not yet available).
    Card,
    /// Bank transfer (not yet available).
    BankTransfer,
}

impl PaymentMethod {
    /// Whether this method can actually complete a checkout today.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Cod)
    }

    /// Wire value for this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment method string that matches no known variant.
#[derive(Debug, Error)]
#[error("unknown payment method `{0}`")]
pub struct ParsePaymentMethodError(String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cod" => Ok(Self::Cod),
            "card" => Ok(Self::Card),
            "bank_transfer" => Ok(Self::BankTransfer),
            other => Err(ParsePaymentMethodError(other.to_string())),
        }
    }
}

/// Order lifecycle status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting processing.
    Pending,
    /// Being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
}

impl OrderStatus {
    /// Lowercase label, matching the wire value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A placed order as returned by the order endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Server-assigned id.
    pub id: OrderId,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Method selected at checkout.
    pub payment_method: PaymentMethod,
    /// Total unit count across the order's lines.
    pub item_count: u32,
    /// Server-computed grand total.
    pub total: Price,
    /// Placement time.
    pub created_at: Timestamp,
}

/// Checkout payload assembled by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Resolved delivery address reference.
    pub delivery_address: String,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Optional note for the seller.
    pub notes: Option<String>,
}
