//! Polymarket API types
//!
//! Gamma API markets/events and CLOB API markets, tokens and trades. Prices
//! and sizes are exact decimals; the APIs send them either as JSON numbers or
//! as decimal strings and both parse.

use chrono::{DateTime, Utc};
use predict_core::{OrderFillState, UnifiedMarketStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// CLOB order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Matched,
    Unmatched,
    Live,
    Delay,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Normalized fill state of an order in this status
    pub fn fill_state(&self) -> OrderFillState {
        match self {
            OrderStatus::Matched => OrderFillState::Filled,
            OrderStatus::Canceled => OrderFillState::Canceled,
            OrderStatus::Pending
            | OrderStatus::Unmatched
            | OrderStatus::Live
            | OrderStatus::Delay
            | OrderStatus::Unknown => OrderFillState::Unfilled,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "MATCHED" => Ok(OrderStatus::Matched),
            "UNMATCHED" => Ok(OrderStatus::Unmatched),
            "LIVE" => Ok(OrderStatus::Live),
            "DELAY" | "DELAYED" => Ok(OrderStatus::Delay),
            "CANCELED" | "CANCELLED" => Ok(OrderStatus::Canceled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// An event from the Gamma API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolymarketEvent {
    pub id: String,
    pub ticker: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub resolution_source: String,
    pub start_date: Option<DateTime<Utc>>,
    pub creation_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image: String,
    pub icon: String,
    pub active: bool,
    pub closed: bool,
    pub archived: bool,
    pub new: bool,
    pub featured: bool,
    pub restricted: bool,
    pub volume: Decimal,
    pub open_interest: Decimal,
    pub volume_1wk: Decimal,
    pub volume_1mo: Decimal,
    pub volume_1yr: Decimal,
    pub enable_order_book: bool,
    pub neg_risk: bool,
    pub comment_count: i64,
    pub closed_time: Option<String>,
    pub automatically_resolved: bool,
    pub enable_neg_risk: bool,
    pub automatically_active: bool,
    pub neg_risk_augmented: bool,
    pub pending_deployment: bool,
    pub deploying: bool,
}

/// Market reward program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClobReward {
    pub id: String,
    pub condition_id: String,
    pub asset_address: String,
    pub rewards_amount: Decimal,
    pub rewards_daily_rate: Decimal,
    pub start_date: String,
    pub end_date: String,
}

/// A market from the Gamma API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolymarketMarket {
    /// Unique identifier
    pub id: String,

    /// Market question
    pub question: String,

    /// Condition ID (used for CLOB)
    #[serde(default)]
    pub condition_id: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub resolution_source: Option<String>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub description: Option<String>,

    /// Outcomes as a JSON string array (typically `["Yes", "No"]`)
    #[serde(default)]
    pub outcomes: Option<String>,

    /// Outcome prices as a JSON string array (e.g. `["0.65", "0.35"]`)
    #[serde(default)]
    pub outcome_prices: Option<String>,

    /// Total volume as a decimal string
    #[serde(default)]
    pub volume: Option<String>,

    #[serde(default)]
    pub active: Option<bool>,

    #[serde(default)]
    pub closed: Option<bool>,

    #[serde(default)]
    pub archived: Option<bool>,

    #[serde(default)]
    pub accepting_orders: Option<bool>,

    /// CLOB token IDs as a JSON string array (YES first)
    #[serde(default)]
    pub clob_token_ids: Option<String>,

    /// Group item title (for multi-outcome events)
    #[serde(default)]
    pub group_item_title: Option<String>,

    #[serde(default)]
    pub question_id: Option<String>,

    #[serde(default)]
    pub uma_resolution_status: Option<String>,

    #[serde(default)]
    pub neg_risk: Option<bool>,

    #[serde(default)]
    pub order_price_min_tick_size: Option<Decimal>,

    #[serde(default)]
    pub order_min_size: Option<Decimal>,

    #[serde(default)]
    pub last_trade_price: Option<Decimal>,

    #[serde(default)]
    pub best_bid: Option<Decimal>,

    #[serde(default)]
    pub best_ask: Option<Decimal>,

    #[serde(default)]
    pub spread: Option<Decimal>,

    /// Events this market belongs to
    #[serde(default)]
    pub events: Vec<PolymarketEvent>,

    #[serde(default)]
    pub clob_rewards: Vec<ClobReward>,
}

impl PolymarketMarket {
    /// Parse outcome prices from the JSON string
    ///
    /// The API returns prices in various formats:
    /// - JSON array of strings: "[\"0.0115\", \"0.9885\"]"
    /// - JSON array of numbers: "[0.0115, 0.9885]"
    /// - Comma-separated: "0.0115, 0.9885"
    pub fn parse_outcome_prices(&self) -> Option<(Decimal, Decimal)> {
        let prices_str = self.outcome_prices.as_ref()?;

        let parts: Vec<String> = match serde_json::from_str::<Vec<serde_json::Value>>(prices_str) {
            Ok(values) => values
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            Err(_) => prices_str
                .trim_matches(|c| c == '[' || c == ']')
                .split(',')
                .map(|p| p.trim().trim_matches('"').to_string())
                .collect(),
        };

        if parts.len() < 2 {
            return None;
        }

        let yes = Decimal::from_str(parts[0].trim()).ok()?;
        let no = Decimal::from_str(parts[1].trim()).ok()?;
        Some((yes, no))
    }

    /// Parse outcome labels from the JSON string
    pub fn parse_outcomes(&self) -> Vec<String> {
        self.outcomes
            .as_ref()
            .and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
            .unwrap_or_default()
    }

    /// Parse CLOB token IDs; returns (yes_token_id, no_token_id)
    pub fn parse_clob_token_ids(&self) -> Option<(String, String)> {
        let ids_str = self.clob_token_ids.as_ref()?;
        let ids = serde_json::from_str::<Vec<String>>(ids_str).ok()?;
        if ids.len() >= 2 {
            Some((ids[0].clone(), ids[1].clone()))
        } else {
            None
        }
    }

    /// Parse volume from string to Decimal
    pub fn parse_volume(&self) -> Decimal {
        let Some(volume) = self.volume.as_deref() else {
            return Decimal::ZERO;
        };
        Decimal::from_str(volume.trim()).unwrap_or_else(|e| {
            warn!("Invalid volume {:?} on market {}: {}", volume, self.id, e);
            Decimal::ZERO
        })
    }

    /// Title of the event this market belongs to, if any
    pub fn event_title(&self) -> Option<&str> {
        self.events.first().map(|e| e.title.as_str())
    }
}

/// A token (outcome) of a CLOB market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClobToken {
    pub token_id: String,
    pub outcome: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub winner: bool,
}

/// Rewards configuration of a CLOB market
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClobRewardsInfo {
    pub rates: serde_json::Value,
    pub min_size: Decimal,
    pub max_spread: Decimal,
}

/// Market data from CLOB API /markets/{condition_id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClobMarket {
    pub enable_order_book: bool,
    pub active: bool,
    pub closed: bool,
    pub archived: bool,
    pub accepting_orders: bool,
    pub accepting_order_timestamp: Option<String>,
    pub minimum_order_size: Decimal,
    pub minimum_tick_size: Decimal,
    pub condition_id: String,
    pub question_id: String,
    pub question: String,
    pub description: String,
    pub market_slug: String,
    pub end_date_iso: Option<String>,
    pub game_start_time: Option<String>,
    pub seconds_delay: i64,
    pub fpmm: String,
    pub maker_base_fee: Decimal,
    pub taker_base_fee: Decimal,
    pub notifications_enabled: bool,
    pub neg_risk: bool,
    pub neg_risk_market_id: String,
    pub neg_risk_request_id: String,
    pub icon: String,
    pub image: String,
    pub rewards: ClobRewardsInfo,
    #[serde(rename = "is_50_50_outcome")]
    pub is_5050_outcome: bool,
    pub tokens: Vec<ClobToken>,
    pub tags: Vec<String>,
}

/// Unified status of a CLOB market from its flags.
///
/// Open only when active and not closed, settled once closed with a winner
/// token, closed otherwise.
pub fn clob_market_status(
    active: bool,
    closed: bool,
    tokens: &[ClobToken],
) -> UnifiedMarketStatus {
    if active && !closed {
        UnifiedMarketStatus::Open
    } else if closed && tokens.iter().any(|t| t.winner) {
        UnifiedMarketStatus::Settled
    } else {
        UnifiedMarketStatus::Closed
    }
}

impl ClobMarket {
    /// Whether the market is not accepting orders
    pub fn is_closed(&self) -> bool {
        self.closed || !self.accepting_orders
    }

    /// Whether the market is closed and a winner has been flagged
    pub fn is_settled(&self) -> bool {
        self.closed && self.tokens.iter().any(|t| t.winner)
    }

    /// Unified status: open only when active and not closed
    pub fn unified_status(&self) -> UnifiedMarketStatus {
        clob_market_status(self.active, self.closed, &self.tokens)
    }

    /// The token flagged as winner, if any
    pub fn winner(&self) -> Option<&ClobToken> {
        let mut winners = self.tokens.iter().filter(|t| t.winner);
        let first = winners.next();
        if first.is_some() && winners.next().is_some() {
            warn!(
                "Market {} flags more than one winner token, using the first",
                self.condition_id
            );
        }
        first
    }

    /// Winning outcome label, or empty when no token is flagged winner
    pub fn result(&self) -> String {
        self.winner()
            .map(|t| normalize_outcome(&t.outcome))
            .unwrap_or_default()
    }

    /// Find a token by its ID
    pub fn token(&self, token_id: &str) -> Option<&ClobToken> {
        self.tokens.iter().find(|t| t.token_id == token_id)
    }
}

/// Lowercase binary outcome labels ("Yes" -> "yes"); other labels are kept as-is
pub fn normalize_outcome(outcome: &str) -> String {
    let trimmed = outcome.trim();
    if trimmed.eq_ignore_ascii_case("yes") || trimmed.eq_ignore_ascii_case("no") {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Trade query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Funder/platform address to get trades for
    #[serde(rename = "maker_address", default, skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
    /// Condition ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    /// Token ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    /// Unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<i64>,
    /// Unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<i64>,
}

/// Maker side of a trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakerOrder {
    pub order_id: String,
    pub owner: String,
    pub maker_address: String,
    pub matched_amount: Decimal,
    pub price: Decimal,
    pub fee_rate_bps: Decimal,
    pub asset_id: String,
    pub outcome: String,
    pub side: String,
}

/// Settlement status of a trade
///
/// MATCHED -> MINED -> CONFIRMED, with RETRYING and FAILED on the error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Matched,
    Mined,
    Confirmed,
    Retrying,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TradeStatus {
    /// CONFIRMED and FAILED are final
    pub fn is_final(&self) -> bool {
        matches!(self, TradeStatus::Confirmed | TradeStatus::Failed)
    }

    /// Whether the trade still counts towards a holding
    pub fn is_effective(&self) -> bool {
        !matches!(self, TradeStatus::Failed | TradeStatus::Unknown)
    }
}

/// A trade record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub taker_order_id: String,
    /// Condition ID
    pub market: String,
    /// Token ID
    pub asset_id: String,
    /// BUY or SELL
    pub side: String,
    pub size: Decimal,
    pub fee_rate_bps: Decimal,
    pub price: Decimal,
    pub status: TradeStatus,
    pub match_time: String,
    #[serde(default)]
    pub last_update: String,
    pub outcome: String,
    #[serde(default)]
    pub bucket_index: i64,
    /// API key of the taker
    pub owner: String,
    /// Funder address of the taker
    pub maker_address: String,
    #[serde(default)]
    pub transaction_hash: String,
    #[serde(default)]
    pub maker_orders: Vec<MakerOrder>,
    /// TAKER or MAKER
    #[serde(rename = "type", default)]
    pub trader_side: String,
}

impl Trade {
    pub fn notional(&self) -> Decimal {
        self.size * self.price
    }
}

/// Trade list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradesResponse {
    #[serde(default)]
    pub next_cursor: String,
    #[serde(default)]
    pub data: Vec<Trade>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn clob_market(active: bool, closed: bool, winners: [bool; 2]) -> ClobMarket {
        ClobMarket {
            active,
            closed,
            accepting_orders: active && !closed,
            condition_id: "0xcond".to_string(),
            tokens: vec![
                ClobToken {
                    token_id: "111".to_string(),
                    outcome: "Yes".to_string(),
                    price: dec!(0.62),
                    winner: winners[0],
                },
                ClobToken {
                    token_id: "222".to_string(),
                    outcome: "No".to_string(),
                    price: dec!(0.38),
                    winner: winners[1],
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_open_requires_both_flags() {
        assert_eq!(
            clob_market(true, false, [false, false]).unified_status(),
            UnifiedMarketStatus::Open
        );
        assert_eq!(
            clob_market(false, false, [false, false]).unified_status(),
            UnifiedMarketStatus::Closed
        );
    }

    #[test]
    fn test_closed_with_winner_is_settled() {
        let m = clob_market(true, true, [false, true]);
        assert_eq!(m.unified_status(), UnifiedMarketStatus::Settled);
        assert_eq!(m.result(), "no");
        assert!(m.is_settled());
    }

    #[test]
    fn test_closed_without_winner() {
        let m = clob_market(false, true, [false, false]);
        assert_eq!(m.unified_status(), UnifiedMarketStatus::Closed);
        assert_eq!(m.result(), "");
        assert!(m.is_closed());
    }

    #[test]
    fn test_clob_market_parses_numeric_prices() {
        let json = r#"{
            "active": true,
            "closed": false,
            "accepting_orders": true,
            "condition_id": "0xabc",
            "minimum_tick_size": 0.01,
            "is_50_50_outcome": false,
            "tokens": [
                {"token_id": "1", "outcome": "Yes", "price": 0.455, "winner": false},
                {"token_id": "2", "outcome": "No", "price": "0.545", "winner": false}
            ]
        }"#;
        let m: ClobMarket = serde_json::from_str(json).unwrap();
        assert_eq!(m.tokens[0].price, dec!(0.455));
        assert_eq!(m.tokens[1].price, dec!(0.545));
        assert_eq!(m.minimum_tick_size, dec!(0.01));
        assert_eq!(m.token("2").map(|t| t.outcome.as_str()), Some("No"));
    }

    #[test]
    fn test_parse_outcome_prices_formats() {
        let mut m = PolymarketMarket {
            id: "1".to_string(),
            question: "Q?".to_string(),
            outcome_prices: Some("[\"0.0115\", \"0.9885\"]".to_string()),
            ..Default::default()
        };
        assert_eq!(m.parse_outcome_prices(), Some((dec!(0.0115), dec!(0.9885))));

        m.outcome_prices = Some("[0.25, 0.75]".to_string());
        assert_eq!(m.parse_outcome_prices(), Some((dec!(0.25), dec!(0.75))));

        m.outcome_prices = Some("0.4, 0.6".to_string());
        assert_eq!(m.parse_outcome_prices(), Some((dec!(0.4), dec!(0.6))));

        m.outcome_prices = Some("[\"0.4\"]".to_string());
        assert_eq!(m.parse_outcome_prices(), None);
    }

    #[test]
    fn test_parse_clob_token_ids() {
        let m = PolymarketMarket {
            id: "1".to_string(),
            question: "Q?".to_string(),
            clob_token_ids: Some("[\"111\", \"222\"]".to_string()),
            outcomes: Some("[\"Yes\", \"No\"]".to_string()),
            ..Default::default()
        };
        assert_eq!(
            m.parse_clob_token_ids(),
            Some(("111".to_string(), "222".to_string()))
        );
        assert_eq!(m.parse_outcomes(), vec!["Yes", "No"]);
    }

    #[test]
    fn test_order_status_fill_state() {
        assert_eq!(OrderStatus::Matched.fill_state(), OrderFillState::Filled);
        assert_eq!(OrderStatus::Live.fill_state(), OrderFillState::Unfilled);
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Canceled));
        let parsed: OrderStatus = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(parsed, OrderStatus::Unknown);
    }

    #[test]
    fn test_trade_status() {
        assert!(TradeStatus::Confirmed.is_final());
        assert!(!TradeStatus::Mined.is_final());
        assert!(!TradeStatus::Failed.is_effective());
        assert!(TradeStatus::Retrying.is_effective());
    }

    #[test]
    fn test_normalize_outcome() {
        assert_eq!(normalize_outcome("Yes"), "yes");
        assert_eq!(normalize_outcome(" NO "), "no");
        assert_eq!(normalize_outcome("Trump"), "Trump");
    }
}
