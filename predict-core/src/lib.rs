//! Core contracts for the prediction-market trading platform
//!
//! This crate defines the data shapes shared between the backend service and
//! its clients and admin tooling: venue identity, the unified market status,
//! the API envelope, account/order/admin wire contracts, and the exact
//! decimal arithmetic used to value positions.

pub mod account;
pub mod admin;
pub mod decimal;
pub mod error;
pub mod market;
pub mod order;
pub mod platform;
pub mod response;
pub mod valuation;

pub use account::{
    BalanceResponse, EventPnLResponse, PortfolioResponse, PositionItem, PositionResponse,
    RechargeRequest, SettleRequest, SettleResult, TokenPosition, WithdrawRequest,
};
pub use admin::{MarketConfig, MarketConfigStatus, Node, NodeStatus, Wallet, WalletStatus};
pub use error::{PredictError, PredictResult};
pub use market::{
    MarketSide, OrderDirection, OrderFillState, OrderStatusFilter, OrderType, UnifiedMarketStatus,
};
pub use order::{
    CancelResult, EventOrderItem, EventOrdersResponse, OrderCancelAllRequest, OrderCreateRequest,
    OrderCreateResponse, OrderItem, OrderListQuery, OrderListResponse,
};
pub use platform::Platform;
pub use response::{PageData, Response, CODE_FAILED, CODE_SUCCESS, CODE_UNAUTHORIZED};
pub use valuation::{
    max_profit, pnl_percent, value_position, CostBasis, MaxProfitPolicy, PositionCost, Valuation,
};
