//! Unified market and order enumerations shared by both venues

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified lifecycle status of a market across venues
///
/// The canonical values are `open`, `closed` and `settled`. Kalshi lifecycle
/// values without a canonical counterpart (`initialized`, `inactive`,
/// `disputed`, `amended`) travel on the wire as their own literal in
/// [`UnifiedMarketStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnifiedMarketStatus {
    /// Market is open for trading
    Open,
    /// Market is closed but not yet settled
    Closed,
    /// Market has been settled with a final outcome
    Settled,
    /// Venue-native status passed through verbatim
    Other(String),
}

impl UnifiedMarketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            UnifiedMarketStatus::Open => "open",
            UnifiedMarketStatus::Closed => "closed",
            UnifiedMarketStatus::Settled => "settled",
            UnifiedMarketStatus::Other(s) => s.as_str(),
        }
    }

    /// Only an open market accepts orders; pass-through states never do.
    pub fn is_tradable(&self) -> bool {
        matches!(self, UnifiedMarketStatus::Open)
    }

    /// No further orders are accepted once a market leaves `open`
    pub fn is_terminal(&self) -> bool {
        !self.is_tradable()
    }

    /// Whether the status is one of `open`, `closed`, `settled`
    pub fn is_canonical(&self) -> bool {
        !matches!(self, UnifiedMarketStatus::Other(_))
    }

    /// Collapse pass-through states into the three-valued lifecycle.
    ///
    /// A non-canonical state is somewhere between open and final settlement
    /// and is treated as `closed`.
    pub fn canonical(&self) -> UnifiedMarketStatus {
        match self {
            UnifiedMarketStatus::Other(_) => UnifiedMarketStatus::Closed,
            other => other.clone(),
        }
    }

    /// Whether a transition from `self` to `next` follows open -> closed -> settled
    pub fn can_transition_to(&self, next: &UnifiedMarketStatus) -> bool {
        use UnifiedMarketStatus::*;
        matches!(
            (self.canonical(), next.canonical()),
            (Open, Open) | (Open, Closed) | (Closed, Closed)
                | (Closed, Settled)
                | (Settled, Settled)
        )
    }
}

impl From<String> for UnifiedMarketStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "open" => UnifiedMarketStatus::Open,
            "closed" => UnifiedMarketStatus::Closed,
            "settled" => UnifiedMarketStatus::Settled,
            _ => UnifiedMarketStatus::Other(s),
        }
    }
}

impl From<&str> for UnifiedMarketStatus {
    fn from(s: &str) -> Self {
        UnifiedMarketStatus::from(s.to_string())
    }
}

impl From<UnifiedMarketStatus> for String {
    fn from(status: UnifiedMarketStatus) -> Self {
        match status {
            UnifiedMarketStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for UnifiedMarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome side of a binary market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketSide {
    Yes,
    No,
}

impl MarketSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSide::Yes => "YES",
            MarketSide::No => "NO",
        }
    }

    /// Whether a resolved market result (`"yes"` / `"no"`) pays out this side
    pub fn wins(&self, result: &str) -> bool {
        match self {
            MarketSide::Yes => result.eq_ignore_ascii_case("yes"),
            MarketSide::No => result.eq_ignore_ascii_case("no"),
        }
    }
}

impl std::str::FromStr for MarketSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(MarketSide::Yes),
            "no" => Ok(MarketSide::No),
            _ => Err(format!("Unknown market side: {}", s)),
        }
    }
}

/// Direction of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    Buy,
    Sell,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Buy => "BUY",
            OrderDirection::Sell => "SELL",
        }
    }
}

/// Order execution type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
}

/// Fill state of an order, normalized from venue-native order statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderFillState {
    Filled,
    Unfilled,
    Canceled,
    Settled,
}

/// Status filter for order list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusFilter {
    #[default]
    All,
    Filled,
    Unfilled,
    Canceled,
    Settled,
}

impl OrderStatusFilter {
    /// Whether an order in the given fill state passes this filter
    pub fn admits(&self, state: OrderFillState) -> bool {
        match self {
            OrderStatusFilter::All => true,
            OrderStatusFilter::Filled => state == OrderFillState::Filled,
            OrderStatusFilter::Unfilled => state == OrderFillState::Unfilled,
            OrderStatusFilter::Canceled => state == OrderFillState::Canceled,
            OrderStatusFilter::Settled => state == OrderFillState::Settled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_round_trip() {
        for (status, literal) in [
            (UnifiedMarketStatus::Open, "\"open\""),
            (UnifiedMarketStatus::Closed, "\"closed\""),
            (UnifiedMarketStatus::Settled, "\"settled\""),
            (UnifiedMarketStatus::Other("disputed".into()), "\"disputed\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), literal);
            let parsed: UnifiedMarketStatus = serde_json::from_str(literal).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_pass_through_is_not_tradable() {
        let amended = UnifiedMarketStatus::from("amended");
        assert!(!amended.is_tradable());
        assert!(!amended.is_canonical());
        assert_eq!(amended.canonical(), UnifiedMarketStatus::Closed);
        assert!(UnifiedMarketStatus::Open.is_tradable());
    }

    #[test]
    fn test_lifecycle_is_forward_only() {
        use UnifiedMarketStatus::*;
        assert!(Open.can_transition_to(&Closed));
        assert!(Closed.can_transition_to(&Settled));
        assert!(Closed.can_transition_to(&Other("disputed".into())));
        assert!(!Open.can_transition_to(&Settled));
        assert!(!Settled.can_transition_to(&Open));
        assert!(!Closed.can_transition_to(&Open));
    }

    #[test]
    fn test_filter_admits() {
        assert!(OrderStatusFilter::All.admits(OrderFillState::Canceled));
        assert!(OrderStatusFilter::Filled.admits(OrderFillState::Filled));
        assert!(!OrderStatusFilter::Filled.admits(OrderFillState::Unfilled));
        assert_eq!(OrderStatusFilter::default(), OrderStatusFilter::All);
    }

    #[test]
    fn test_side_wins() {
        assert!(MarketSide::Yes.wins("yes"));
        assert!(MarketSide::No.wins("No"));
        assert!(!MarketSide::Yes.wins(""));
    }
}
