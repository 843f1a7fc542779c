//! Order request/response contracts exposed to clients

use crate::decimal::blank_as_none;
use crate::error::{PredictError, PredictResult};
use crate::market::{MarketSide, OrderDirection, OrderStatusFilter, OrderType};
use crate::platform::Platform;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request for POST /order/create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    pub user_wallet: String,
    pub market_type: Platform,
    pub token_id: String,
    pub market_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub market_side: MarketSide,
    pub order_direction: OrderDirection,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit_price: Option<Decimal>,
}

impl OrderCreateRequest {
    /// Check the fields each order type depends on
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)?;
        PredictError::require("token_id", &self.token_id)?;
        PredictError::require("market_id", &self.market_id)?;

        match self.order_type {
            OrderType::Limit if self.limit_price.is_none() => {
                return Err(PredictError::invalid_input("limit order requires limit_price"));
            }
            OrderType::Stop if self.stop_price.is_none() => {
                return Err(PredictError::invalid_input("stop order requires stop_price"));
            }
            _ => {}
        }

        if self.token_amount.is_none() && self.shares_amount.is_none() {
            return Err(PredictError::invalid_input(
                "either token_amount or shares_amount is required",
            ));
        }

        for (field, value) in [
            ("token_amount", self.token_amount),
            ("limit_price", self.limit_price),
            ("shares_amount", self.shares_amount),
            ("stop_price", self.stop_price),
            ("take_profit_price", self.take_profit_price),
        ] {
            if let Some(v) = value {
                if v <= Decimal::ZERO {
                    return Err(PredictError::invalid_input(format!(
                        "{} must be positive, got {}",
                        field, v
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Response for POST /order/create; same shape as a listed order
pub type OrderCreateResponse = OrderItem;

/// Request for POST /order/cancel-all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelAllRequest {
    pub user_wallet: String,
}

/// Batch cancellation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelResult {
    pub success_ids: Vec<String>,
    pub failed_ids: Vec<String>,
}

/// Query parameters for GET /order/list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderListQuery {
    pub user_wallet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<OrderStatusFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_type: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// An order as returned by GET /order/list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub user_wallet: String,
    pub order_time: Option<DateTime<Utc>>,
    pub market_type: Platform,
    pub market_account_id: String,
    pub market_id: String,
    pub market_out_id: String,
    pub event_id: String,
    pub market_side: MarketSide,
    pub market_order_id: String,
    pub token_id: String,
    pub token_amount: Decimal,
    pub order_direction: OrderDirection,
    pub order_type: OrderType,
    #[serde(with = "blank_as_none", default)]
    pub limit_price: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub requested_shares: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub shares_amount: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub stop_price: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub take_profit_price: Option<Decimal>,
    pub filled_cost: Decimal,
    pub filled_price: Decimal,
    pub fees_paid: Decimal,
    /// Backend order status literal
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for GET /order/list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub orders: Vec<OrderItem>,
}

/// An order enriched with current price and P&L information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOrderItem {
    pub id: String,
    pub user_wallet: String,
    pub order_time: Option<DateTime<Utc>>,
    pub market_type: Platform,
    pub market_id: String,
    pub market_out_id: String,
    pub event_id: String,
    pub market_side: MarketSide,
    pub token_id: String,
    pub token_amount: Decimal,
    pub order_direction: OrderDirection,
    pub order_type: OrderType,
    #[serde(with = "blank_as_none", default)]
    pub limit_price: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub requested_shares: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub shares_amount: Option<Decimal>,
    pub filled_cost: Decimal,
    pub filled_price: Decimal,
    pub fees_paid: Decimal,
    pub status: String,
    pub current_price: Decimal,
    pub avg_cost: Decimal,
    pub current_value: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
    pub source: Platform,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for GET|POST /order/event-orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOrdersResponse {
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub orders: Vec<EventOrderItem>,
}
