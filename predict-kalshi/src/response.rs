//! Backend response types for Kalshi-backed endpoints
//!
//! Amounts here are integer cents, matching the backend's Kalshi ledger.

use crate::types::cents_to_dollars;
use chrono::{DateTime, Utc};
use predict_core::OrderFillState;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status as stored by the backend (integer on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ApiOrderStatus {
    Pending,
    Resting,
    Filled,
    Canceled,
    PartiallyFilled,
    Settled,
}

impl ApiOrderStatus {
    pub fn code(&self) -> i32 {
        match self {
            ApiOrderStatus::Pending => 0,
            ApiOrderStatus::Resting => 1,
            ApiOrderStatus::Filled => 2,
            ApiOrderStatus::Canceled => 3,
            ApiOrderStatus::PartiallyFilled => 4,
            ApiOrderStatus::Settled => 5,
        }
    }

    /// Normalized fill state; a partial fill still has quantity working
    pub fn fill_state(&self) -> OrderFillState {
        match self {
            ApiOrderStatus::Filled => OrderFillState::Filled,
            ApiOrderStatus::Canceled => OrderFillState::Canceled,
            ApiOrderStatus::Settled => OrderFillState::Settled,
            ApiOrderStatus::Pending | ApiOrderStatus::Resting | ApiOrderStatus::PartiallyFilled => {
                OrderFillState::Unfilled
            }
        }
    }
}

impl TryFrom<i32> for ApiOrderStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ApiOrderStatus::Pending),
            1 => Ok(ApiOrderStatus::Resting),
            2 => Ok(ApiOrderStatus::Filled),
            3 => Ok(ApiOrderStatus::Canceled),
            4 => Ok(ApiOrderStatus::PartiallyFilled),
            5 => Ok(ApiOrderStatus::Settled),
            other => Err(format!("Unknown order status code: {}", other)),
        }
    }
}

impl From<ApiOrderStatus> for i32 {
    fn from(status: ApiOrderStatus) -> i32 {
        status.code()
    }
}

/// Kind of fund flow record (integer on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum FlowType {
    Recharge,
    Withdraw,
    Buy,
    Sell,
    Settle,
    Fee,
    Freeze,
    Unfreeze,
}

impl FlowType {
    pub fn code(&self) -> i32 {
        match self {
            FlowType::Recharge => 1,
            FlowType::Withdraw => 2,
            FlowType::Buy => 3,
            FlowType::Sell => 4,
            FlowType::Settle => 5,
            FlowType::Fee => 6,
            FlowType::Freeze => 7,
            FlowType::Unfreeze => 8,
        }
    }
}

impl TryFrom<i32> for FlowType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(FlowType::Recharge),
            2 => Ok(FlowType::Withdraw),
            3 => Ok(FlowType::Buy),
            4 => Ok(FlowType::Sell),
            5 => Ok(FlowType::Settle),
            6 => Ok(FlowType::Fee),
            7 => Ok(FlowType::Freeze),
            8 => Ok(FlowType::Unfreeze),
            other => Err(format!("Unknown flow type: {}", other)),
        }
    }
}

impl From<FlowType> for i32 {
    fn from(flow: FlowType) -> i32 {
        flow.code()
    }
}

/// An order in the API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub order_id: String,
    pub user_id: String,
    pub ticker: String,
    pub side: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub order_type: String,
    pub yes_price: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub no_price: i64,
    pub count: i64,
    pub filled_count: i64,
    pub filled_cost: i64,
    pub fees_paid: i64,
    pub status: ApiOrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderResponse {
    pub fn filled_cost_dollars(&self) -> Decimal {
        cents_to_dollars(self.filled_cost)
    }

    pub fn fees_paid_dollars(&self) -> Decimal {
        cents_to_dollars(self.fees_paid)
    }
}

/// A Kalshi account in the API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub user_id: String,
    pub balance: i64,
    pub frozen: i64,
    pub total_pnl: i64,
    pub created_at: DateTime<Utc>,
}

impl AccountResponse {
    /// Balance not locked in resting orders, in dollars
    pub fn available_dollars(&self) -> Decimal {
        cents_to_dollars(self.balance - self.frozen)
    }
}

/// A fund flow record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResponse {
    pub id: i64,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub order_id: String,
    pub flow_type: FlowType,
    pub amount: i64,
    pub balance_before: i64,
    pub balance_after: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remark: String,
    pub created_at: DateTime<Utc>,
}

/// A Kalshi market in the API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketResponse {
    pub id: i64,
    pub ticker: String,
    pub event_ticker: String,
    pub title: String,
    pub status: i32,
    pub result: String,
    pub yes_bid: i64,
    pub yes_ask: i64,
    pub last_price: i64,
    pub volume_24h: i64,
    pub open_interest: i64,
    pub close_time: DateTime<Utc>,
    pub expiration_time: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Market list response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListResponse {
    pub markets: Vec<MarketResponse>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cursor: String,
}

/// Orderbook response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderbookResponse {
    pub ticker: String,
    /// `[[price, count], ...]`
    pub yes: Vec<Vec<i64>>,
    /// `[[price, count], ...]`
    pub no: Vec<Vec<i64>>,
}

/// Market settle response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleResponse {
    pub settled_count: i64,
    pub total_revenue: i64,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}
