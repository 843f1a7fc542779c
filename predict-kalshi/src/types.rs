//! Kalshi API types
//!
//! These types mirror the Kalshi trade API. Prices are integer cents on the
//! wire; use [`cents_to_dollars`] before doing any valuation.

use chrono::{DateTime, Utc};
use predict_core::decimal::blank_as_none;
use predict_core::{MarketSide, OrderFillState, UnifiedMarketStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Convert a cent amount to dollars (0.00 - 1.00 for contract prices)
pub fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Side of a position or order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl From<Side> for MarketSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Yes => MarketSide::Yes,
            Side::No => MarketSide::No,
        }
    }
}

impl From<MarketSide> for Side {
    fn from(side: MarketSide) -> Self {
        match side {
            MarketSide::Yes => Side::Yes,
            MarketSide::No => Side::No,
        }
    }
}

/// Action of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

/// Type of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

/// Status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Resting,
    Canceled,
    Executed,
    Pending,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Normalized fill state of an order in this status
    pub fn fill_state(&self) -> OrderFillState {
        match self {
            OrderStatus::Executed => OrderFillState::Filled,
            OrderStatus::Canceled => OrderFillState::Canceled,
            OrderStatus::Resting | OrderStatus::Pending | OrderStatus::Unknown => {
                OrderFillState::Unfilled
            }
        }
    }
}

/// Time-in-force policy for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    GoodTillCanceled,
    FillOrKill,
    ImmediateOrCancel,
}

/// Lifecycle status of a Kalshi market
///
/// Values outside the documented lifecycle are kept verbatim in
/// [`MarketStatus::Unknown`] so a new venue state never breaks parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarketStatus {
    Initialized,
    Inactive,
    Active,
    Closed,
    Determined,
    Disputed,
    Amended,
    Finalized,
    Unknown(String),
}

impl MarketStatus {
    /// Legacy alias for [`MarketStatus::Active`]
    pub const OPEN: MarketStatus = MarketStatus::Active;
    /// Legacy alias for [`MarketStatus::Finalized`]
    pub const SETTLED: MarketStatus = MarketStatus::Finalized;

    pub fn as_str(&self) -> &str {
        match self {
            MarketStatus::Initialized => "initialized",
            MarketStatus::Inactive => "inactive",
            MarketStatus::Active => "active",
            MarketStatus::Closed => "closed",
            MarketStatus::Determined => "determined",
            MarketStatus::Disputed => "disputed",
            MarketStatus::Amended => "amended",
            MarketStatus::Finalized => "finalized",
            MarketStatus::Unknown(s) => s.as_str(),
        }
    }

    /// Map to the unified status.
    ///
    /// `active` is open, `finalized` is settled, `closed` and `determined` are
    /// closed. Every other value passes through as its own literal.
    pub fn unified(&self) -> UnifiedMarketStatus {
        match self {
            MarketStatus::Active => UnifiedMarketStatus::Open,
            MarketStatus::Finalized => UnifiedMarketStatus::Settled,
            MarketStatus::Closed | MarketStatus::Determined => UnifiedMarketStatus::Closed,
            MarketStatus::Unknown(s) => {
                warn!("Unrecognized Kalshi market status: {}", s);
                UnifiedMarketStatus::Other(s.clone())
            }
            other => {
                debug!("Passing through Kalshi market status: {}", other.as_str());
                UnifiedMarketStatus::Other(other.as_str().to_string())
            }
        }
    }
}

impl Default for MarketStatus {
    fn default() -> Self {
        MarketStatus::Initialized
    }
}

impl From<String> for MarketStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "initialized" => MarketStatus::Initialized,
            "inactive" => MarketStatus::Inactive,
            "active" => MarketStatus::Active,
            "closed" => MarketStatus::Closed,
            "determined" => MarketStatus::Determined,
            "disputed" => MarketStatus::Disputed,
            "amended" => MarketStatus::Amended,
            "finalized" => MarketStatus::Finalized,
            _ => MarketStatus::Unknown(s),
        }
    }
}

impl From<MarketStatus> for String {
    fn from(status: MarketStatus) -> Self {
        match status {
            MarketStatus::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Kalshi market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Market ticker (unique identifier)
    pub ticker: String,

    /// Event ticker this market belongs to
    #[serde(default)]
    pub event_ticker: String,

    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub status: MarketStatus,

    /// "yes", "no", or "" while unresolved
    #[serde(default)]
    pub result: String,

    /// YES bid in cents (1-99)
    #[serde(default)]
    pub yes_bid: i64,

    #[serde(default)]
    pub yes_ask: i64,

    #[serde(default)]
    pub no_bid: i64,

    #[serde(default)]
    pub no_ask: i64,

    /// Last traded YES price in cents
    #[serde(default)]
    pub last_price: i64,

    #[serde(default)]
    pub volume: i64,

    #[serde(default)]
    pub volume_24h: i64,

    #[serde(default)]
    pub open_interest: i64,

    #[serde(default)]
    pub open_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub close_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub expiration_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tick_size: i64,

    #[serde(default)]
    pub risk_limit_cents: i64,
}

impl Market {
    /// Whether the market has been finalized
    pub fn is_settled(&self) -> bool {
        self.status == MarketStatus::Finalized
    }

    /// Whether the market no longer accepts orders
    pub fn is_closed(&self) -> bool {
        matches!(
            self.status,
            MarketStatus::Closed | MarketStatus::Determined | MarketStatus::Finalized
        )
    }

    /// Unified status of this market
    pub fn unified_status(&self) -> UnifiedMarketStatus {
        self.status.unified()
    }

    /// Whether the market resolved to "yes"
    pub fn is_yes_winner(&self) -> bool {
        self.result == "yes"
    }

    /// Get the YES price in dollars
    pub fn yes_price(&self) -> Decimal {
        // Prefer last_price, then the bid/ask midpoint, then whichever side is quoted
        if self.last_price > 0 {
            return cents_to_dollars(self.last_price);
        }
        match (self.yes_bid, self.yes_ask) {
            (bid, ask) if bid > 0 && ask > 0 => cents_to_dollars(bid + ask) / Decimal::from(2),
            (bid, _) if bid > 0 => cents_to_dollars(bid),
            (_, ask) => cents_to_dollars(ask),
        }
    }

    /// Get the NO price in dollars
    pub fn no_price(&self) -> Decimal {
        Decimal::ONE - self.yes_price()
    }

    /// Current price of one side of this market
    pub fn price_for(&self, side: Side) -> Decimal {
        match side {
            Side::Yes => self.yes_price(),
            Side::No => self.no_price(),
        }
    }
}

/// A Kalshi order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub client_order_id: String,
    pub ticker: String,
    pub status: OrderStatus,
    pub side: Side,
    pub action: Action,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub yes_price: i64,
    #[serde(default)]
    pub no_price: i64,
    #[serde(default, with = "blank_as_none")]
    pub yes_price_dollars: Option<Decimal>,
    #[serde(default, with = "blank_as_none")]
    pub no_price_dollars: Option<Decimal>,
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub last_update_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub initial_count: i64,
    #[serde(default, with = "blank_as_none")]
    pub initial_count_fp: Option<Decimal>,
    #[serde(default)]
    pub remaining_count: i64,
    #[serde(default, with = "blank_as_none")]
    pub remaining_count_fp: Option<Decimal>,
    #[serde(default)]
    pub fill_count: i64,
    #[serde(default, with = "blank_as_none")]
    pub fill_count_fp: Option<Decimal>,
    #[serde(default)]
    pub taker_fill_count: i64,
    #[serde(default)]
    pub taker_fill_cost: i64,
    #[serde(default, with = "blank_as_none")]
    pub taker_fill_cost_dollars: Option<Decimal>,
    #[serde(default)]
    pub maker_fill_count: i64,
    #[serde(default)]
    pub maker_fill_cost: i64,
    #[serde(default, with = "blank_as_none")]
    pub maker_fill_cost_dollars: Option<Decimal>,
    #[serde(default)]
    pub taker_fees: i64,
    #[serde(default, with = "blank_as_none")]
    pub taker_fees_dollars: Option<Decimal>,
    #[serde(default)]
    pub maker_fees: i64,
    #[serde(default, with = "blank_as_none")]
    pub maker_fees_dollars: Option<Decimal>,
    #[serde(default)]
    pub queue_position: i64,
    #[serde(default)]
    pub order_group_id: String,
    #[serde(default)]
    pub cancel_order_on_pause: bool,
    #[serde(default, rename = "self_trade_prevention_type")]
    pub self_trade_prevent_type: String,
}

impl Order {
    /// Total number of filled contracts
    pub fn total_fill_count(&self) -> i64 {
        self.taker_fill_count + self.maker_fill_count
    }

    /// Total cost of filled contracts in cents
    pub fn total_fill_cost(&self) -> i64 {
        self.taker_fill_cost + self.maker_fill_cost
    }

    /// Total cost of filled contracts in dollars
    pub fn total_fill_cost_dollars(&self) -> Decimal {
        cents_to_dollars(self.total_fill_cost())
    }

    /// Average fill price in dollars, zero when nothing filled
    pub fn avg_fill_price(&self) -> Decimal {
        let count = self.total_fill_count();
        if count == 0 {
            return Decimal::ZERO;
        }
        self.total_fill_cost_dollars() / Decimal::from(count)
    }

    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Executed
    }

    pub fn is_canceled(&self) -> bool {
        self.status == OrderStatus::Canceled
    }

    pub fn is_resting(&self) -> bool {
        self.status == OrderStatus::Resting
    }
}

/// A user's position in a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    #[serde(default)]
    pub event_ticker: String,
    /// Positive = YES contracts, negative = NO contracts
    #[serde(default)]
    pub position: i64,
    /// Total cost in cents
    #[serde(default)]
    pub total_cost: i64,
    #[serde(default)]
    pub realized_pnl: i64,
    #[serde(default)]
    pub resting_orders_count: i64,
}

impl Position {
    /// Side held, `None` for a flat position
    pub fn side(&self) -> Option<Side> {
        match self.position {
            p if p > 0 => Some(Side::Yes),
            p if p < 0 => Some(Side::No),
            _ => None,
        }
    }

    /// Number of contracts held regardless of side
    pub fn contracts(&self) -> Decimal {
        Decimal::from(self.position.abs())
    }

    pub fn total_cost_dollars(&self) -> Decimal {
        cents_to_dollars(self.total_cost)
    }

    pub fn realized_pnl_dollars(&self) -> Decimal {
        cents_to_dollars(self.realized_pnl)
    }
}

/// Account balance information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Available balance in cents
    pub balance: i64,
    /// Portfolio value in cents
    #[serde(default)]
    pub portfolio_value: i64,
}

impl Balance {
    pub fn balance_dollars(&self) -> Decimal {
        cents_to_dollars(self.balance)
    }
}

/// A trade fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub trade_id: String,
    pub ticker: String,
    pub side: Side,
    pub action: Action,
    pub count: i64,
    pub yes_price: i64,
    pub no_price: i64,
    pub is_taker: bool,
    pub order_id: String,
    pub created_time: DateTime<Utc>,
}

impl Fill {
    /// Price paid per contract for the filled side, in dollars
    pub fn price_dollars(&self) -> Decimal {
        match self.side {
            Side::Yes => cents_to_dollars(self.yes_price),
            Side::No => cents_to_dollars(self.no_price),
        }
    }
}

/// A market settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub ticker: String,
    pub market_result: String,
    pub yes_count: i64,
    pub no_count: i64,
    pub yes_cost: i64,
    pub no_cost: i64,
    pub revenue: i64,
    pub settled_time: DateTime<Utc>,
}

impl Settlement {
    /// Settlement revenue minus what was paid for both sides, in dollars
    pub fn profit_dollars(&self) -> Decimal {
        cents_to_dollars(self.revenue - self.yes_cost - self.no_cost)
    }
}

/// Order book for a market
///
/// Kalshi returns yes/no as arrays of `[price, count]` bids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    #[serde(default)]
    pub ticker: String,
    /// YES bids in integer cents
    #[serde(default)]
    pub yes: Vec<Vec<i64>>,
    /// NO bids in integer cents
    #[serde(default)]
    pub no: Vec<Vec<i64>>,
    /// YES bids as `["price_str", count]`
    #[serde(default)]
    pub yes_dollars: Vec<Vec<serde_json::Value>>,
    /// NO bids as `["price_str", count]`
    #[serde(default)]
    pub no_dollars: Vec<Vec<serde_json::Value>>,
}

/// A parsed price level in the order book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderbookLevel {
    /// Price in cents
    pub price: i64,
    /// Number of contracts
    pub count: i64,
}

impl Orderbook {
    pub fn yes_levels(&self) -> Vec<OrderbookLevel> {
        Self::levels(&self.yes)
    }

    pub fn no_levels(&self) -> Vec<OrderbookLevel> {
        Self::levels(&self.no)
    }

    fn levels(raw: &[Vec<i64>]) -> Vec<OrderbookLevel> {
        raw.iter()
            .filter(|pair| pair.len() >= 2)
            .map(|pair| OrderbookLevel {
                price: pair[0],
                count: pair[1],
            })
            .collect()
    }
}

/// Parameters for creating an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderParams {
    pub ticker: String,
    pub side: Side,
    pub action: Action,
    pub count: i64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yes_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_ts: Option<i64>,
    /// Maximum cost in cents for market orders (implies fill-or-kill)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_max_cost: Option<i64>,
}

/// Common pagination parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Parameters for listing markets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMarketsParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MarketStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tickers: Vec<String>,
}

/// Parameters for listing orders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOrdersParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market(status: &str, result: &str) -> Market {
        serde_json::from_value(serde_json::json!({
            "ticker": "KXBTC-25DEC31-100K",
            "event_ticker": "KXBTC-25DEC31",
            "title": "Bitcoin above 100k?",
            "status": status,
            "result": result,
            "yes_bid": 40,
            "yes_ask": 44,
            "last_price": 0
        }))
        .unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(market("active", "").unified_status(), UnifiedMarketStatus::Open);
        assert_eq!(
            market("finalized", "yes").unified_status(),
            UnifiedMarketStatus::Settled
        );
        assert_eq!(market("closed", "").unified_status(), UnifiedMarketStatus::Closed);
        assert_eq!(
            market("determined", "no").unified_status(),
            UnifiedMarketStatus::Closed
        );
    }

    #[test]
    fn test_status_pass_through() {
        for literal in ["initialized", "inactive", "disputed", "amended", "paused"] {
            let status = market(literal, "").unified_status();
            assert_eq!(status, UnifiedMarketStatus::Other(literal.to_string()));
            assert!(!status.is_tradable());
        }
    }

    #[test]
    fn test_unknown_status_round_trips() {
        let m = market("paused", "");
        assert_eq!(m.status, MarketStatus::Unknown("paused".to_string()));
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["status"], "paused");
    }

    #[test]
    fn test_legacy_aliases() {
        assert_eq!(MarketStatus::OPEN, MarketStatus::Active);
        assert_eq!(MarketStatus::SETTLED, MarketStatus::Finalized);
    }

    #[test]
    fn test_prices_in_dollars() {
        let m = market("active", "");
        assert_eq!(m.yes_price(), dec!(0.42));
        assert_eq!(m.no_price(), dec!(0.58));
        assert_eq!(cents_to_dollars(65), dec!(0.65));
    }

    #[test]
    fn test_closed_and_settled_flags() {
        assert!(market("determined", "yes").is_closed());
        assert!(!market("determined", "yes").is_settled());
        assert!(market("finalized", "yes").is_settled());
        assert!(market("finalized", "yes").is_yes_winner());
        assert!(!market("active", "").is_closed());
    }

    #[test]
    fn test_position_side() {
        let p = Position {
            ticker: "T".to_string(),
            event_ticker: "E".to_string(),
            position: -7,
            total_cost: 350,
            realized_pnl: 0,
            resting_orders_count: 0,
        };
        assert_eq!(p.side(), Some(Side::No));
        assert_eq!(p.contracts(), dec!(7));
        assert_eq!(p.total_cost_dollars(), dec!(3.50));
    }

    #[test]
    fn test_order_fill_helpers() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "order_id": "o-1",
            "ticker": "KXBTC-25DEC31-100K",
            "status": "executed",
            "side": "yes",
            "action": "buy",
            "type": "limit",
            "yes_price": 40,
            "yes_price_dollars": "0.4000",
            "created_time": "2025-01-01T00:00:00Z",
            "taker_fill_count": 3,
            "taker_fill_cost": 120,
            "maker_fill_count": 2,
            "maker_fill_cost": 80
        }))
        .unwrap();
        assert!(order.is_filled());
        assert_eq!(order.total_fill_count(), 5);
        assert_eq!(order.total_fill_cost_dollars(), dec!(2.00));
        assert_eq!(order.avg_fill_price(), dec!(0.40));
        assert_eq!(order.yes_price_dollars, Some(dec!(0.4)));
        assert_eq!(order.status.fill_state(), OrderFillState::Filled);
    }

    #[test]
    fn test_orderbook_levels_skip_malformed() {
        let book = Orderbook {
            ticker: "T".to_string(),
            yes: vec![vec![40, 100], vec![39]],
            no: vec![vec![55, 20]],
            ..Default::default()
        };
        assert_eq!(book.yes_levels(), vec![OrderbookLevel { price: 40, count: 100 }]);
        assert_eq!(book.no_levels().len(), 1);
    }

    #[test]
    fn test_create_order_params_omit_empty() {
        let params = CreateOrderParams {
            ticker: "T".to_string(),
            side: Side::Yes,
            action: Action::Buy,
            count: 10,
            order_type: Some(OrderType::Market),
            yes_price: None,
            no_price: None,
            client_order_id: None,
            time_in_force: Some(TimeInForce::FillOrKill),
            expiration_ts: None,
            buy_max_cost: Some(500),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], "market");
        assert_eq!(json["time_in_force"], "fill_or_kill");
        assert!(json.get("yes_price").is_none());
    }

    #[test]
    fn test_list_params_flatten() {
        let params = ListMarketsParams {
            list: ListParams {
                cursor: Some("abc".to_string()),
                limit: Some(100),
            },
            status: Some(MarketStatus::Active),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["cursor"], "abc");
        assert_eq!(json["status"], "active");
        assert!(json.get("tickers").is_none());
    }
}
