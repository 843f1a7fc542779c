//! Position assembly
//!
//! Joins ledger holdings with venue market state and current prices into the
//! unified position contracts.

use crate::normalizer::{
    resolve_result, settlement_price, unify_market_status, VenueMarketState,
};
use crate::types::{self, CostInfo, PositionQuery};
use predict_core::{
    pnl_percent, value_position, BalanceResponse, CostBasis, MarketSide, Platform,
    PortfolioResponse, PositionCost, PositionItem, PositionResponse, PredictError, PredictResult,
    TokenPosition, UnifiedMarketStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A holding as recorded by the order/position ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerPosition {
    pub user_wallet: String,
    pub token_id: String,
    pub market_id: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub event_title: String,
    pub venue: Platform,
    pub side: MarketSide,
    /// Total shares acquired over the life of the holding
    #[serde(default)]
    pub shares: Decimal,
    pub cost: PositionCost,
    #[serde(default)]
    pub is_settle: bool,
}

impl LedgerPosition {
    /// Holding built from accumulated fills
    pub fn from_cost_info(
        user_wallet: impl Into<String>,
        token_id: impl Into<String>,
        market_id: impl Into<String>,
        venue: Platform,
        side: MarketSide,
        info: &CostInfo,
    ) -> Self {
        Self {
            user_wallet: user_wallet.into(),
            token_id: token_id.into(),
            market_id: market_id.into(),
            event_id: String::new(),
            event_title: String::new(),
            venue,
            side,
            shares: info.total_shares,
            cost: PositionCost::new(info.total_shares, CostBasis::TotalCost(info.total_cost)),
            is_settle: false,
        }
    }

    pub fn with_event(
        mut self,
        event_id: impl Into<String>,
        event_title: impl Into<String>,
    ) -> Self {
        self.event_id = event_id.into();
        self.event_title = event_title.into();
        self
    }
}

/// Venue market state and the current price of a holding's token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub state: VenueMarketState,
    pub current_price: Decimal,
}

impl MarketQuote {
    pub fn new(state: VenueMarketState, current_price: Decimal) -> Self {
        Self {
            state,
            current_price,
        }
    }
}

/// Value one holding against its market.
///
/// Settled markets are valued at the settlement payout of the holding's side
/// instead of the last quoted price. The market result is reported only once
/// the market is settled.
pub fn value_ledger_position(
    position: &LedgerPosition,
    quote: &MarketQuote,
) -> PredictResult<PositionItem> {
    position.cost.validate()?;
    if quote.current_price.is_sign_negative() && !quote.current_price.is_zero() {
        return Err(PredictError::invalid_input(format!(
            "negative price for {}: {}",
            position.token_id, quote.current_price
        )));
    }
    if quote.state.platform() != position.venue {
        return Err(PredictError::invalid_input(format!(
            "position {} is on {} but its market state is from {}",
            position.token_id,
            position.venue,
            quote.state.platform()
        )));
    }

    let market_status = unify_market_status(&quote.state);
    let market_result = if market_status == UnifiedMarketStatus::Settled {
        resolve_result(&quote.state)
    } else {
        String::new()
    };
    let price = settlement_price(&quote.state, &position.token_id, position.side)
        .unwrap_or(quote.current_price);
    let valuation = value_position(&position.cost, price);

    Ok(PositionItem {
        token_id: position.token_id.clone(),
        market_id: position.market_id.clone(),
        event_id: position.event_id.clone(),
        event_title: position.event_title.clone(),
        source: position.venue,
        market_type: position.venue,
        market_side: position.side,
        shares: position.shares,
        balance: position.cost.balance,
        avg_cost: position.cost.avg_cost,
        total_cost: position.cost.total_cost,
        current_price: valuation.current_price,
        current_value: valuation.current_value,
        unrealized_pnl: valuation.unrealized_pnl,
        unrealized_pnl_percent: valuation.unrealized_pnl_percent,
        is_settle: position.is_settle,
        market_status,
        market_result,
    })
}

/// Build the position list for a wallet.
///
/// `quotes` is keyed by market id. Every ledger record must belong to the
/// queried wallet and have a quote; otherwise the whole response is rejected.
pub fn build_position_response(
    query: &PositionQuery,
    ledger: &[LedgerPosition],
    quotes: &HashMap<String, MarketQuote>,
) -> PredictResult<PositionResponse> {
    query.validate()?;

    let mut positions = Vec::new();
    for record in ledger {
        if record.user_wallet != query.user_wallet {
            return Err(PredictError::invalid_input(format!(
                "position {} belongs to {}, not {}",
                record.token_id, record.user_wallet, query.user_wallet
            )));
        }
        if !query.admits(record.venue, &record.event_id, &record.token_id) {
            continue;
        }
        let quote = quotes.get(&record.market_id).ok_or_else(|| {
            PredictError::invalid_input(format!("no market quote for {}", record.market_id))
        })?;
        positions.push(value_ledger_position(record, quote)?);
    }

    debug!(
        "Built {} positions for {}",
        positions.len(),
        query.user_wallet
    );
    Ok(position_response(positions))
}

/// Totals over already valued positions
pub fn position_response(positions: Vec<PositionItem>) -> PositionResponse {
    let total_value: Decimal = positions.iter().map(|p| p.current_value).sum();
    let total_cost: Decimal = positions.iter().map(|p| p.total_cost).sum();
    let total_pnl = total_value - total_cost;

    PositionResponse {
        total_value,
        total_cost,
        total_pnl,
        total_pnl_percent: pnl_percent(total_pnl, total_cost),
        position_count: positions.len(),
        positions,
    }
}

/// Portfolio summary: cash plus the value of every position
pub fn build_portfolio_response(
    usdc_balance: Decimal,
    positions: &PositionResponse,
) -> PortfolioResponse {
    PortfolioResponse {
        total_portfolio_value: usdc_balance + positions.total_value,
        usdc_balance,
        positions_value: positions.total_value,
        total_cost: positions.total_cost,
        total_pnl: positions.total_pnl,
        total_pnl_percent: positions.total_pnl_percent,
        position_count: positions.position_count,
    }
}

/// Balance view of valued positions
pub fn build_balance_response(usdc: Decimal, positions: &[PositionItem]) -> BalanceResponse {
    let tokens = positions
        .iter()
        .map(|p| TokenPosition {
            token_id: p.token_id.clone(),
            market_id: p.market_id.clone(),
            market_type: p.market_type,
            market_side: p.market_side,
            balance: p.balance,
            current_price: p.current_price,
            current_value: p.current_value,
            is_settle: p.is_settle,
        })
        .collect();
    BalanceResponse::new(usdc, tokens)
}

impl From<&PositionItem> for types::PositionItem {
    fn from(p: &PositionItem) -> Self {
        types::PositionItem {
            token_id: p.token_id.clone(),
            market_id: p.market_id.clone(),
            market_type: p.market_type,
            market_side: p.market_side,
            balance: p.balance,
            avg_cost: p.avg_cost,
            total_cost: p.total_cost,
            current_price: p.current_price,
            current_value: p.current_value,
            pnl: p.unrealized_pnl,
            pnl_percent: p.unrealized_pnl_percent,
            is_settle: p.is_settle,
            market_status: p.market_status.clone(),
            market_result: p.market_result.clone(),
        }
    }
}

impl From<&PositionResponse> for types::PositionResponse {
    fn from(r: &PositionResponse) -> Self {
        types::PositionResponse {
            total_value: r.total_value,
            total_cost: r.total_cost,
            total_pnl: r.total_pnl,
            total_pnl_percent: r.total_pnl_percent,
            position_count: r.position_count,
            positions: r.positions.iter().map(types::PositionItem::from).collect(),
        }
    }
}
