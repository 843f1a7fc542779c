//! Backend response types for Polymarket-backed endpoints

use chrono::{DateTime, Utc};
use predict_core::decimal::blank_as_none;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order in the API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_wallet: String,
    pub order_time: DateTime<Utc>,
    pub market_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market_account_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market_account_key: String,
    pub market_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market_out_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub event_id: String,
    pub market_side: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market_order_id: String,
    pub token_id: String,
    pub token_amount: Decimal,
    pub order_direction: String,
    pub order_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit_price: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub filled_cost: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub filled_price: Option<Decimal>,
    #[serde(with = "blank_as_none", default)]
    pub fees_paid: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn status(&self) -> crate::types::OrderStatus {
        self.status
            .parse()
            .unwrap_or(crate::types::OrderStatus::Unknown)
    }
}

/// Order list response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub total: i64,
    pub page: i32,
    pub page_size: i32,
    pub orders: Vec<Order>,
}

/// Batch cancel response data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelBatchResponse {
    pub success_ids: Vec<String>,
    pub failed_ids: Vec<String>,
}

/// Order sync response data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub synced_count: i64,
    pub message: String,
}

/// A user cash account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_wallet: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A token holding account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAccount {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub token_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market_side: String,
    pub balance: Decimal,
    #[serde(default)]
    pub is_settle: bool,
}

/// Withdraw response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawResponse {
    pub id: String,
    pub user_wallet: String,
    pub amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Result of settling a single token account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleResult {
    pub token: TokenAccount,
    pub success: bool,
    pub message: String,
}

/// Balance response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub usdc: Decimal,
    pub total_tokens: usize,
    pub token_positions: Vec<TokenAccount>,
}

impl BalanceResponse {
    pub fn new(usdc: Decimal, token_positions: Vec<TokenAccount>) -> Self {
        Self {
            usdc,
            total_tokens: token_positions.len(),
            token_positions,
        }
    }
}

/// A token position with P&L
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub token_id: String,
    pub market_id: String,
    pub market_type: String,
    pub market_side: String,
    pub balance: Decimal,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
    pub is_settle: bool,
}

impl Position {
    /// Total cost implied by the average entry price
    pub fn total_cost(&self) -> Decimal {
        self.balance * self.avg_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_token_account_omits_empty() {
        let token = TokenAccount {
            id: String::new(),
            token_id: "111".to_string(),
            market_id: String::new(),
            market_type: String::new(),
            market_side: String::new(),
            balance: dec!(12.5),
            is_settle: false,
        };
        let json = serde_json::to_value(&token).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("market_id").is_none());
        assert!(json.get("market_side").is_none());
        assert_eq!(json["balance"], "12.5");

        let settle = SettleResult {
            token,
            success: true,
            message: "ok".to_string(),
        };
        let json = serde_json::to_value(&settle).unwrap();
        assert_eq!(json["token"]["token_id"], "111");
    }

    #[test]
    fn test_order_parses_blank_fill_fields() {
        let json = r#"{
            "id": "o-1",
            "user_wallet": "0xabc",
            "order_time": "2025-03-01T12:00:00Z",
            "market_type": "POLYMARKET",
            "market_id": "m-1",
            "market_side": "YES",
            "token_id": "111",
            "token_amount": "20",
            "order_direction": "BUY",
            "order_type": "LIMIT",
            "limit_price": "0.4",
            "filled_cost": "",
            "filled_price": "",
            "fees_paid": "0",
            "status": "LIVE",
            "created_at": "2025-03-01T12:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.filled_cost, None);
        assert_eq!(order.fees_paid, Some(dec!(0)));
        assert_eq!(order.limit_price, Some(dec!(0.4)));
        assert_eq!(order.status(), OrderStatus::Live);

        let out = serde_json::to_value(&order).unwrap();
        assert!(out.get("stop_price").is_none());
        assert!(out.get("updated_at").is_none());
        assert_eq!(out["filled_cost"], "");
    }

    #[test]
    fn test_balance_response_counts_tokens() {
        let resp = BalanceResponse::new(dec!(50), Vec::new());
        assert_eq!(resp.total_tokens, 0);
        let position = Position {
            token_id: "111".to_string(),
            market_id: "m-1".to_string(),
            market_type: "POLYMARKET".to_string(),
            market_side: "YES".to_string(),
            balance: dec!(10),
            avg_price: dec!(0.25),
            current_price: dec!(0.5),
            pnl: dec!(2.5),
            pnl_percent: dec!(1),
            is_settle: false,
        };
        assert_eq!(position.total_cost(), dec!(2.5));
    }
}
