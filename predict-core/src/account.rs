//! Account request/response contracts exposed to clients
//!
//! Field names and omit-when-empty rules are part of the wire contract.

use crate::market::{MarketSide, UnifiedMarketStatus};
use crate::platform::Platform;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request for POST /account/recharge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeRequest {
    pub user_wallet: String,
    pub user_tx_hash: String,
    pub chain_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_symbol: String,
    pub token_amount: Decimal,
    pub token_decimals: u32,
}

/// Request for POST /account/withdraw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub user_wallet: String,
    pub chain_id: i64,
    pub amount: Decimal,
}

/// Request for POST /account/settle
///
/// An empty `token_id` settles every settleable token of the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleRequest {
    pub user_wallet: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_id: String,
}

/// Settlement result for a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleResult {
    pub token_id: String,
    pub success: bool,
    pub message: String,
}

/// A token holding as listed in the balance response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPosition {
    pub token_id: String,
    pub market_id: String,
    pub market_type: Platform,
    pub market_side: MarketSide,
    pub balance: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub is_settle: bool,
}

/// Response for GET /account/balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub usdc: Decimal,
    pub total_value: Decimal,
    pub total_tokens: usize,
    pub token_positions: Vec<TokenPosition>,
}

impl BalanceResponse {
    /// Build the response; total value is cash plus the value of every token
    pub fn new(usdc: Decimal, token_positions: Vec<TokenPosition>) -> Self {
        let tokens_value: Decimal = token_positions.iter().map(|t| t.current_value).sum();
        Self {
            usdc,
            total_value: usdc + tokens_value,
            total_tokens: token_positions.len(),
            token_positions,
        }
    }
}

/// A single position with P&L information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionItem {
    pub token_id: String,
    pub market_id: String,
    pub event_id: String,
    pub event_title: String,
    /// Venue the position lives on
    pub source: Platform,
    pub market_type: Platform,
    pub market_side: MarketSide,
    /// Total shares acquired over the life of the position
    pub shares: Decimal,
    /// Shares currently held
    pub balance: Decimal,
    pub avg_cost: Decimal,
    pub total_cost: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub unrealized_pnl: Decimal,
    pub unrealized_pnl_percent: Decimal,
    pub is_settle: bool,
    /// `open`, `closed`, `settled`, or a venue pass-through literal
    pub market_status: UnifiedMarketStatus,
    /// `yes`, `no`, or empty while unresolved
    pub market_result: String,
}

/// Response for GET /account/positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionResponse {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_pnl: Decimal,
    pub total_pnl_percent: Decimal,
    pub position_count: usize,
    pub positions: Vec<PositionItem>,
}

/// Response for GET /account/portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResponse {
    pub total_portfolio_value: Decimal,
    pub usdc_balance: Decimal,
    pub positions_value: Decimal,
    pub total_cost: Decimal,
    pub total_pnl: Decimal,
    pub total_pnl_percent: Decimal,
    pub position_count: usize,
}

/// Response for GET /account/event-pnl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPnLResponse {
    pub event_id: String,
    pub total_cost: Decimal,
    pub current_value: Decimal,
    pub max_profit: Decimal,
    pub unrealized_pnl: Decimal,
    pub pnl_percent: Decimal,
    pub positions: Vec<PositionItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_recharge_omits_empty_symbol() {
        let req = RechargeRequest {
            user_wallet: "0xabc".to_string(),
            user_tx_hash: "0xhash".to_string(),
            chain_id: 137,
            token_symbol: String::new(),
            token_amount: dec!(25.5),
            token_decimals: 6,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("token_symbol").is_none());
        assert_eq!(json["token_amount"], "25.5");
    }

    #[test]
    fn test_balance_response_totals() {
        let token = TokenPosition {
            token_id: "t1".to_string(),
            market_id: "m1".to_string(),
            market_type: Platform::Polymarket,
            market_side: MarketSide::Yes,
            balance: dec!(10),
            current_price: dec!(0.4),
            current_value: dec!(4.0),
            is_settle: false,
        };
        let resp = BalanceResponse::new(dec!(100), vec![token]);
        assert_eq!(resp.total_value, dec!(104));
        assert_eq!(resp.total_tokens, 1);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["token_positions"][0]["market_type"], "POLYMARKET");
        assert_eq!(json["token_positions"][0]["market_side"], "YES");
    }
}
