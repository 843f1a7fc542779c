//! Cost basis accumulation from fills
//!
//! Buys add shares and cost. Sells remove shares and release cost at the
//! running average, so the average entry cost of what is still held does not
//! move on a sell.

use crate::types::CostInfo;
use predict_core::{MarketSide, OrderDirection, PredictError, PredictResult};
use predict_kalshi::types::{Action, Fill as KalshiFill};
use predict_polymarket::Trade;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Token id used for one side of a Kalshi market
pub fn kalshi_token_id(ticker: &str, side: MarketSide) -> String {
    format!("{}-{}", ticker, side.as_str())
}

/// A single execution against a holding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFill {
    pub token_id: String,
    pub direction: OrderDirection,
    pub shares: Decimal,
    pub price: Decimal,
}

impl LedgerFill {
    pub fn buy(token_id: impl Into<String>, shares: Decimal, price: Decimal) -> Self {
        Self {
            token_id: token_id.into(),
            direction: OrderDirection::Buy,
            shares,
            price,
        }
    }

    pub fn sell(token_id: impl Into<String>, shares: Decimal, price: Decimal) -> Self {
        Self {
            token_id: token_id.into(),
            direction: OrderDirection::Sell,
            shares,
            price,
        }
    }

    /// Build from a Polymarket trade; `None` for failed trades or unknown sides
    pub fn from_polymarket_trade(trade: &Trade) -> Option<Self> {
        if !trade.status.is_effective() {
            return None;
        }
        let direction = match trade.side.to_uppercase().as_str() {
            "BUY" => OrderDirection::Buy,
            "SELL" => OrderDirection::Sell,
            _ => {
                debug!("Unknown trade side: {}", trade.side);
                return None;
            }
        };
        Some(Self {
            token_id: trade.asset_id.clone(),
            direction,
            shares: trade.size,
            price: trade.price,
        })
    }

    pub fn from_kalshi_fill(fill: &KalshiFill) -> Self {
        let direction = match fill.action {
            Action::Buy => OrderDirection::Buy,
            Action::Sell => OrderDirection::Sell,
        };
        Self {
            token_id: kalshi_token_id(&fill.ticker, fill.side.into()),
            direction,
            shares: Decimal::from(fill.count),
            price: fill.price_dollars(),
        }
    }
}

/// Running cost basis of one holding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostAccumulator {
    total_cost: Decimal,
    total_shares: Decimal,
}

impl CostAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one fill. Overselling and negative quantities are rejected.
    pub fn apply(
        &mut self,
        direction: OrderDirection,
        shares: Decimal,
        price: Decimal,
    ) -> PredictResult<()> {
        if shares.is_sign_negative() && !shares.is_zero() {
            return Err(PredictError::invalid_input(format!(
                "negative fill size: {}",
                shares
            )));
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(PredictError::invalid_input(format!(
                "negative fill price: {}",
                price
            )));
        }

        match direction {
            OrderDirection::Buy => {
                self.total_shares += shares;
                self.total_cost += shares * price;
            }
            OrderDirection::Sell => {
                if shares > self.total_shares {
                    return Err(PredictError::invalid_input(format!(
                        "sell of {} exceeds held {}",
                        shares, self.total_shares
                    )));
                }
                if shares == self.total_shares {
                    self.total_shares = Decimal::ZERO;
                    self.total_cost = Decimal::ZERO;
                } else {
                    let released = self.avg_cost() * shares;
                    self.total_shares -= shares;
                    self.total_cost -= released;
                }
            }
        }
        Ok(())
    }

    pub fn avg_cost(&self) -> Decimal {
        if self.total_shares.is_zero() {
            Decimal::ZERO
        } else {
            self.total_cost
                .checked_div(self.total_shares)
                .unwrap_or(Decimal::ZERO)
        }
    }

    pub fn cost_info(&self) -> CostInfo {
        CostInfo {
            total_cost: self.total_cost,
            total_shares: self.total_shares,
            avg_cost: self.avg_cost(),
        }
    }
}

/// Cost basis of a single holding from its fills, in execution order
pub fn cost_info<'a, I>(fills: I) -> PredictResult<CostInfo>
where
    I: IntoIterator<Item = &'a LedgerFill>,
{
    let mut acc = CostAccumulator::new();
    for fill in fills {
        acc.apply(fill.direction, fill.shares, fill.price)?;
    }
    Ok(acc.cost_info())
}

/// Cost basis per token from an interleaved fill sequence
///
/// Tokens whose holding nets out to zero are dropped.
pub fn cost_by_token(fills: &[LedgerFill]) -> PredictResult<HashMap<String, CostInfo>> {
    let mut accumulators: HashMap<String, CostAccumulator> = HashMap::new();

    for fill in fills {
        accumulators
            .entry(fill.token_id.clone())
            .or_default()
            .apply(fill.direction, fill.shares, fill.price)
            .map_err(|e| match e {
                PredictError::InvalidInput(msg) => {
                    PredictError::invalid_input(format!("token {}: {}", fill.token_id, msg))
                }
                other => other,
            })?;
    }

    let costs: HashMap<String, CostInfo> = accumulators
        .into_iter()
        .filter(|(_, acc)| !acc.total_shares.is_zero())
        .map(|(token, acc)| (token, acc.cost_info()))
        .collect();
    debug!("Accumulated cost basis for {} tokens", costs.len());
    Ok(costs)
}
