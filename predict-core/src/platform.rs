//! Venue definitions for the supported prediction markets

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported prediction market venues
///
/// Serialized as the `market_type` / `source` wire literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    /// Polymarket - CLOB-style crypto prediction market
    Polymarket,
    /// Kalshi - US regulated binary-outcome exchange
    Kalshi,
}

impl Platform {
    /// Get a short identifier for the platform (for display)
    pub fn short_name(&self) -> &'static str {
        match self {
            Platform::Kalshi => "K",
            Platform::Polymarket => "P",
        }
    }

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Kalshi => "Kalshi",
            Platform::Polymarket => "Polymarket",
        }
    }

    /// Wire literal used for `market_type` and `source` fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Kalshi => "KALSHI",
            Platform::Polymarket => "POLYMARKET",
        }
    }

    /// Payout of one winning share at settlement, in dollars.
    ///
    /// Both venues settle binary contracts at $1 per winning share
    /// (Polymarket pays 1 USDC, Kalshi pays 100 cents).
    pub fn settlement_payout(&self) -> Decimal {
        match self {
            Platform::Kalshi | Platform::Polymarket => Decimal::ONE,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kalshi" | "k" => Ok(Platform::Kalshi),
            "polymarket" | "poly" | "p" => Ok(Platform::Polymarket),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_literal() {
        assert_eq!(
            serde_json::to_string(&Platform::Polymarket).unwrap(),
            "\"POLYMARKET\""
        );
        let parsed: Platform = serde_json::from_str("\"KALSHI\"").unwrap();
        assert_eq!(parsed, Platform::Kalshi);
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("POLYMARKET".parse::<Platform>().unwrap(), Platform::Polymarket);
        assert_eq!("poly".parse::<Platform>().unwrap(), Platform::Polymarket);
        assert_eq!("k".parse::<Platform>().unwrap(), Platform::Kalshi);
        assert!("manifold".parse::<Platform>().is_err());
    }
}
