//! Kalshi contracts for the prediction-market trading platform
//!
//! `types` mirrors the Kalshi trade API (markets, orders, positions, fills,
//! settlements, order books). `response` holds the shapes the backend returns
//! for its own Kalshi-backed endpoints.

pub mod response;
pub mod types;

pub use response::{
    AccountResponse, ApiOrderStatus, FlowResponse, FlowType, MarketListResponse, MarketResponse,
    OrderResponse, OrderbookResponse, SettleResponse,
};
pub use types::{
    cents_to_dollars, Action, Balance, CreateOrderParams, Fill, ListMarketsParams, ListOrdersParams,
    ListParams, Market, MarketStatus, Order, OrderStatus, OrderType, Orderbook, OrderbookLevel,
    Position, Settlement, Side, TimeInForce,
};
