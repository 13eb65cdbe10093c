//! Product snapshots

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque product identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Purchasable and visible.
    Active,
    /// Temporarily hidden from the storefront.
    Inactive,
    /// No longer stocked.
    Discontinued,
}

/// Denormalized product data carried on a cart line.
///
/// Read-only from the client's perspective; the server refreshes it on every
/// cart fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Backend product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Primary image URL, when the product has one.
    pub image: Option<String>,
    /// Units in stock at snapshot time.
    pub stock: u32,
    /// Brand name, when known.
    pub brand: Option<String>,
    /// Lifecycle status.
    pub status: ProductStatus,
}
