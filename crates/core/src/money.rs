//! Prices

use std::fmt;

use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

/// A money amount in minor currency units (cents).
///
/// Amounts arrive from the server already computed; the client carries them
/// opaquely and formats them for display.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Creates a price from minor units.
    #[must_use]
    pub const fn from_minor(value: u64) -> Self {
        Self(value)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Render as a currency string, e.g. `$10.00`.
    #[must_use]
    pub fn formatted(self) -> String {
        Money::from_minor(i64::try_from(self.0).unwrap_or(i64::MAX), iso::USD).to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
