//! Service-layer request, query and response contracts
//!
//! These are the decimal-typed shapes a service implementation accepts and
//! returns. Requests carry a `validate()` that rejects missing required
//! fields before any business logic runs.

use predict_core::{
    MarketSide, OrderDirection, OrderStatusFilter, OrderType, Platform, PredictError,
    PredictResult, UnifiedMarketStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order requests
// ============================================================================

/// Order creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    pub user_wallet: String,
    pub market_type: Platform,
    pub token_id: String,
    pub market_id: String,
    #[serde(default)]
    pub event_id: String,
    pub market_side: MarketSide,
    #[serde(default)]
    pub token_amount: Decimal,
    pub order_direction: OrderDirection,
    pub order_type: OrderType,
    #[serde(default)]
    pub limit_price: Decimal,
    #[serde(default)]
    pub shares_amount: Decimal,
    #[serde(default)]
    pub stop_price: Decimal,
    #[serde(default)]
    pub take_profit_price: Decimal,
}

impl OrderCreateRequest {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)?;
        PredictError::require("token_id", &self.token_id)?;
        PredictError::require("market_id", &self.market_id)?;

        for (field, value) in [
            ("token_amount", self.token_amount),
            ("limit_price", self.limit_price),
            ("shares_amount", self.shares_amount),
            ("stop_price", self.stop_price),
            ("take_profit_price", self.take_profit_price),
        ] {
            if value < Decimal::ZERO {
                return Err(PredictError::invalid_input(format!(
                    "{} cannot be negative",
                    field
                )));
            }
        }

        match self.order_type {
            OrderType::Limit if self.limit_price.is_zero() => {
                Err(PredictError::invalid_input("limit order requires limit_price"))
            }
            OrderType::Stop if self.stop_price.is_zero() => {
                Err(PredictError::invalid_input("stop order requires stop_price"))
            }
            _ if self.token_amount.is_zero() && self.shares_amount.is_zero() => Err(
                PredictError::invalid_input("either token_amount or shares_amount is required"),
            ),
            _ => Ok(()),
        }
    }
}

/// Single order cancellation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelRequest {
    pub order_id: String,
}

impl OrderCancelRequest {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("order_id", &self.order_id)
    }
}

/// Batch order cancellation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelBatchRequest {
    pub order_ids: Vec<String>,
}

impl OrderCancelBatchRequest {
    /// At least one non-blank order id is required
    pub fn validate(&self) -> PredictResult<()> {
        if self.order_ids.is_empty() {
            return Err(PredictError::invalid_input("order_ids must not be empty"));
        }
        for id in &self.order_ids {
            PredictError::require("order_ids[]", id)?;
        }
        Ok(())
    }
}

/// Cancel every open order of a wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelAllRequest {
    #[serde(default)]
    pub user_wallet: String,
}

/// Cancel every open order of a wallet in one market
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelMarketRequest {
    #[serde(default)]
    pub user_wallet: String,
    #[serde(default)]
    pub market_out_id: String,
    #[serde(default)]
    pub token_id: String,
}

impl OrderCancelMarketRequest {
    /// The market must be named either by venue id or by token
    pub fn validate(&self) -> PredictResult<()> {
        if self.market_out_id.trim().is_empty() && self.token_id.trim().is_empty() {
            return Err(PredictError::invalid_input(
                "either market_out_id or token_id is required",
            ));
        }
        Ok(())
    }
}

/// Order list query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderListQuery {
    pub user_wallet: String,
    #[serde(default)]
    pub status_filter: OrderStatusFilter,
    #[serde(default)]
    pub market_type: String,
    #[serde(default)]
    pub market_id: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub token_id: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

impl OrderListQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    pub const MAX_PAGE_SIZE: u32 = 100;

    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)?;
        if !self.market_type.is_empty() {
            self.market_type
                .parse::<Platform>()
                .map_err(PredictError::invalid_input)?;
        }
        Ok(())
    }

    /// 1-based page and clamped page size
    pub fn pagination(&self) -> (u32, u32) {
        let page = self.page.max(1);
        let page_size = match self.page_size {
            0 => Self::DEFAULT_PAGE_SIZE,
            n => n.min(Self::MAX_PAGE_SIZE),
        };
        (page, page_size)
    }
}

// ============================================================================
// Account requests
// ============================================================================

/// Recharge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeRequest {
    pub user_wallet: String,
    pub user_tx_hash: String,
    pub chain_id: i64,
    #[serde(default)]
    pub token_symbol: String,
    pub token_amount: Decimal,
    pub token_decimals: u32,
}

impl RechargeRequest {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)?;
        PredictError::require("user_tx_hash", &self.user_tx_hash)?;
        if self.chain_id == 0 {
            return Err(PredictError::invalid_input("chain_id is required"));
        }
        if self.token_decimals == 0 {
            return Err(PredictError::invalid_input("token_decimals is required"));
        }
        if self.token_amount <= Decimal::ZERO {
            return Err(PredictError::invalid_input("token_amount must be positive"));
        }
        Ok(())
    }
}

/// Withdraw request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub user_wallet: String,
    pub chain_id: i64,
    pub amount: Decimal,
}

impl WithdrawRequest {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)?;
        if self.chain_id == 0 {
            return Err(PredictError::invalid_input("chain_id is required"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(PredictError::invalid_input("amount must be positive"));
        }
        Ok(())
    }
}

/// Settle request; an empty token id settles every settleable token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleRequest {
    pub user_wallet: String,
    #[serde(default)]
    pub token_id: String,
}

impl SettleRequest {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)
    }
}

// ============================================================================
// Account queries
// ============================================================================

/// Balance query parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceQuery {
    pub user_wallet: String,
}

impl BalanceQuery {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)
    }
}

/// Account list query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountListQuery {
    pub user_wallet: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub is_settle: Option<bool>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

impl AccountListQuery {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)
    }
}

/// Fund flow list query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowListQuery {
    pub user_wallet: String,
    #[serde(rename = "type", default)]
    pub flow_type: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

impl FlowListQuery {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)
    }
}

/// Selects positions by venue, event and/or token; blank fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFilter {
    /// POLYMARKET or KALSHI
    #[serde(default)]
    pub market_type: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub token_id: String,
}

impl PositionFilter {
    pub fn matches(&self, market_type: Platform, event_id: &str, token_id: &str) -> bool {
        let venue_ok = self.market_type.trim().is_empty()
            || self
                .market_type
                .parse::<Platform>()
                .map(|p| p == market_type)
                .unwrap_or(false);
        let event_ok = self.event_id.is_empty() || self.event_id == event_id;
        let token_ok = self.token_id.is_empty() || self.token_id == token_id;
        venue_ok && event_ok && token_ok
    }
}

/// Position query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionQuery {
    pub user_wallet: String,
    /// When non-empty, only positions matching at least one filter are returned
    #[serde(default)]
    pub filters: Vec<PositionFilter>,
}

impl PositionQuery {
    pub fn validate(&self) -> PredictResult<()> {
        PredictError::require("user_wallet", &self.user_wallet)
    }

    pub fn admits(&self, market_type: Platform, event_id: &str, token_id: &str) -> bool {
        self.filters.is_empty()
            || self
                .filters
                .iter()
                .any(|f| f.matches(market_type, event_id, token_id))
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Settlement result for a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleResult {
    pub token_id: String,
    pub success: bool,
    pub message: String,
}

/// User balance summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub usdc: Decimal,
    pub total_tokens: usize,
    pub token_positions: Vec<TokenPosition>,
}

impl BalanceSummary {
    pub fn new(usdc: Decimal, token_positions: Vec<TokenPosition>) -> Self {
        Self {
            usdc,
            total_tokens: token_positions.len(),
            token_positions,
        }
    }
}

/// A token holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPosition {
    pub token_id: String,
    pub market_id: String,
    pub market_type: Platform,
    pub market_side: MarketSide,
    pub balance: Decimal,
    pub is_settle: bool,
}

/// A single position with P&L
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionItem {
    pub token_id: String,
    pub market_id: String,
    pub market_type: Platform,
    pub market_side: MarketSide,
    pub balance: Decimal,
    pub avg_cost: Decimal,
    pub total_cost: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
    pub is_settle: bool,
    pub market_status: UnifiedMarketStatus,
    pub market_result: String,
}

/// Position list with totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionResponse {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_pnl: Decimal,
    pub total_pnl_percent: Decimal,
    pub position_count: usize,
    pub positions: Vec<PositionItem>,
}

/// Cost basis accumulated from a holding's fills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostInfo {
    pub total_cost: Decimal,
    pub total_shares: Decimal,
    pub avg_cost: Decimal,
}

/// On-chain transaction details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub block_number: u64,
    pub gas_used: u64,
    pub status: u64,
}

impl TransactionDetail {
    /// Receipt status 1 means the transaction succeeded
    pub fn is_success(&self) -> bool {
        self.status == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market_order() -> OrderCreateRequest {
        OrderCreateRequest {
            user_wallet: "0xabc".to_string(),
            market_type: Platform::Polymarket,
            token_id: "111".to_string(),
            market_id: "m-1".to_string(),
            event_id: String::new(),
            market_side: MarketSide::Yes,
            token_amount: dec!(25),
            order_direction: OrderDirection::Buy,
            order_type: OrderType::Market,
            limit_price: Decimal::ZERO,
            shares_amount: Decimal::ZERO,
            stop_price: Decimal::ZERO,
            take_profit_price: Decimal::ZERO,
        }
    }

    #[test]
    fn test_order_create_validation() {
        assert!(market_order().validate().is_ok());

        let mut limit = market_order();
        limit.order_type = OrderType::Limit;
        assert!(limit.validate().is_err());
        limit.limit_price = dec!(0.3);
        assert!(limit.validate().is_ok());

        let mut empty = market_order();
        empty.token_amount = Decimal::ZERO;
        assert!(matches!(
            empty.validate(),
            Err(PredictError::InvalidInput(_))
        ));

        let mut negative = market_order();
        negative.stop_price = dec!(-1);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_cancel_requests() {
        assert!(OrderCancelRequest {
            order_id: String::new()
        }
        .validate()
        .is_err());
        assert!(OrderCancelBatchRequest { order_ids: vec![] }
            .validate()
            .is_err());
        assert!(OrderCancelBatchRequest {
            order_ids: vec!["o-1".to_string()]
        }
        .validate()
        .is_ok());
        assert!(OrderCancelMarketRequest::default().validate().is_err());
    }

    #[test]
    fn test_order_list_query_defaults() {
        let query: OrderListQuery = serde_json::from_str(r#"{"user_wallet":"0xabc"}"#).unwrap();
        assert_eq!(query.status_filter, OrderStatusFilter::All);
        assert_eq!(query.pagination(), (1, OrderListQuery::DEFAULT_PAGE_SIZE));
        assert!(query.validate().is_ok());

        let bad = OrderListQuery {
            market_type: "NYSE".to_string(),
            ..query
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_position_query_filters() {
        let open = PositionQuery {
            user_wallet: "0xabc".to_string(),
            filters: vec![],
        };
        assert!(open.admits(Platform::Kalshi, "e-1", "t-1"));

        let query = PositionQuery {
            user_wallet: "0xabc".to_string(),
            filters: vec![
                PositionFilter {
                    market_type: "KALSHI".to_string(),
                    ..Default::default()
                },
                PositionFilter {
                    event_id: "e-2".to_string(),
                    ..Default::default()
                },
            ],
        };
        assert!(query.admits(Platform::Kalshi, "e-1", "t-1"));
        assert!(query.admits(Platform::Polymarket, "e-2", "t-9"));
        assert!(!query.admits(Platform::Polymarket, "e-1", "t-1"));
    }

    #[test]
    fn test_account_list_query_type_field() {
        let query: AccountListQuery =
            serde_json::from_str(r#"{"user_wallet":"0xabc","type":"token","is_settle":false}"#)
                .unwrap();
        assert_eq!(query.account_type, "token");
        assert_eq!(query.is_settle, Some(false));
    }
}
