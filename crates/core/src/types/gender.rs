//! Fragrance audience classification.

use serde::{Deserialize, Serialize};

/// Target audience for a fragrance.
///
/// Stored and filtered with SCREAMING case wire values (`"MEN"`, `"WOMEN"`,
/// `"UNISEX"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Men,
    Women,
    #[default]
    Unisex,
}

impl Gender {
    /// The wire value used in catalog rows and query filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "MEN",
            Self::Women => "WOMEN",
            Self::Unisex => "UNISEX",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEN" => Ok(Self::Men),
            "WOMEN" => Ok(Self::Women),
            "UNISEX" => Ok(Self::Unisex),
            _ => Err(format!("invalid gender filter: {s}")),
        }
    }
}
