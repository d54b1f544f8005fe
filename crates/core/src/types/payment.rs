//! Payment method accepted at checkout.

use serde::{Deserialize, Serialize};

/// Payment method chosen at checkout.
///
/// Serializes to the wire values the checkout API and the hosted store share
/// (`"COD"`, `"JAZZCASH"`). The value is copied verbatim onto the order row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[serde(rename = "COD")]
    CashOnDelivery,
    /// JazzCash mobile wallet.
    #[serde(rename = "JAZZCASH")]
    JazzCash,
}

impl PaymentMethod {
    /// The wire value stored with the order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "COD",
            Self::JazzCash => "JAZZCASH",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COD" => Ok(Self::CashOnDelivery),
            "JAZZCASH" => Ok(Self::JazzCash),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
