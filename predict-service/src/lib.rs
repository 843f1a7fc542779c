//! Status and valuation normalization for the prediction-market trading platform
//!
//! Maps venue-native market and order state into the unified model, values
//! positions and orders at current prices, and rolls positions up per event.
//! Everything here is synchronous and pure over its inputs.

pub mod config;
pub mod event_pnl;
pub mod ledger;
pub mod normalizer;
pub mod orders;
pub mod positions;
pub mod types;

pub use config::{ConfigError, NormalizerConfig};
pub use event_pnl::{aggregate_event, group_by_event, EventPnL};
pub use ledger::{cost_by_token, cost_info, CostAccumulator, LedgerFill};
pub use normalizer::{
    classify_order_status, resolve_result, settlement_price, unify_market_status,
    VenueMarketState,
};
pub use orders::{build_event_orders, enrich_order, filter_orders};
pub use positions::{
    build_balance_response, build_portfolio_response, build_position_response,
    value_ledger_position, LedgerPosition, MarketQuote,
};
