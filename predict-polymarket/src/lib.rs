//! Polymarket contracts for the prediction-market trading platform
//!
//! `types` mirrors the Polymarket Gamma and CLOB APIs (markets, tokens,
//! trades). `response` holds the shapes the backend returns for its own
//! Polymarket-backed endpoints.

pub mod response;
pub mod types;

pub use response::{
    Account, BalanceResponse, CancelBatchResponse, Order, OrderListResponse, Position,
    SettleResult, SyncResponse, TokenAccount, WithdrawResponse,
};
pub use types::{
    ClobMarket, ClobReward, ClobRewardsInfo, ClobToken, MakerOrder, OrderStatus, PolymarketEvent,
    PolymarketMarket, Trade, TradeParams, TradeStatus, TradesResponse,
};
