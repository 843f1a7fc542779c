//! Cost, value and P&L arithmetic for positions
//!
//! Everything here is exact decimal arithmetic over immutable inputs. The
//! functions are total: a zero cost basis yields a zero percentage instead of
//! a division fault.

use crate::error::{PredictError, PredictResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-share slack allowed between `avg_cost` and `total_cost / balance`
const AVG_COST_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Which side of the cost basis the caller tracks as ground truth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostBasis {
    /// Average entry cost per share; total cost is derived
    AvgCost(Decimal),
    /// Cumulative cost of the holding; average cost is derived
    TotalCost(Decimal),
}

/// Cost basis of a holding with both sides kept consistent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCost {
    /// Shares held
    pub balance: Decimal,
    /// Average entry cost per share
    pub avg_cost: Decimal,
    /// Total cost basis of the holding
    pub total_cost: Decimal,
}

impl PositionCost {
    /// Build a cost basis, recomputing the side the caller did not supply
    pub fn new(balance: Decimal, basis: CostBasis) -> Self {
        match basis {
            CostBasis::AvgCost(avg_cost) => Self {
                balance,
                avg_cost,
                total_cost: balance * avg_cost,
            },
            CostBasis::TotalCost(total_cost) => Self {
                balance,
                avg_cost: ratio(total_cost, balance),
                total_cost,
            },
        }
    }

    /// Reject inputs that would produce a misleading P&L figure
    pub fn validate(&self) -> PredictResult<()> {
        if self.balance.is_sign_negative() && !self.balance.is_zero() {
            return Err(PredictError::invalid_input(format!(
                "negative balance: {}",
                self.balance
            )));
        }
        if self.total_cost.is_sign_negative() && !self.total_cost.is_zero() {
            return Err(PredictError::invalid_input(format!(
                "negative total cost: {}",
                self.total_cost
            )));
        }
        if self.avg_cost.is_sign_negative() && !self.avg_cost.is_zero() {
            return Err(PredictError::invalid_input(format!(
                "negative average cost: {}",
                self.avg_cost
            )));
        }
        if self.balance > Decimal::ZERO {
            let implied = ratio(self.total_cost, self.balance);
            if (implied - self.avg_cost).abs() > AVG_COST_TOLERANCE {
                return Err(PredictError::invalid_input(format!(
                    "average cost {} disagrees with total cost {} over balance {}",
                    self.avg_cost, self.total_cost, self.balance
                )));
            }
        }
        Ok(())
    }
}

/// Mark-to-market valuation of a holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub unrealized_pnl: Decimal,
    pub unrealized_pnl_percent: Decimal,
}

/// Value a holding at the current price.
///
/// `current_value = balance * price`, `unrealized_pnl = current_value - total_cost`,
/// and the percentage is `pnl / total_cost` (a ratio, `0.5` for +50%), zero
/// when the cost basis is not positive.
pub fn value_position(cost: &PositionCost, current_price: Decimal) -> Valuation {
    let current_value = cost.balance * current_price;
    let unrealized_pnl = current_value - cost.total_cost;

    Valuation {
        current_price,
        current_value,
        unrealized_pnl,
        unrealized_pnl_percent: pnl_percent(unrealized_pnl, cost.total_cost),
    }
}

/// P&L as a fraction of cost, guarded against a zero or negative cost
pub fn pnl_percent(pnl: Decimal, total_cost: Decimal) -> Decimal {
    if total_cost > Decimal::ZERO {
        ratio(pnl, total_cost)
    } else {
        Decimal::ZERO
    }
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// How the best-case profit of a position is bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxProfitPolicy {
    /// `balance * payout - total_cost` per position, summed as-is
    #[default]
    PerPositionSum,
    /// Same as `PerPositionSum` but each position is floored at zero
    FlooredPerPosition,
}

impl fmt::Display for MaxProfitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxProfitPolicy::PerPositionSum => write!(f, "sum"),
            MaxProfitPolicy::FlooredPerPosition => write!(f, "floored"),
        }
    }
}

impl std::str::FromStr for MaxProfitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" | "per_position_sum" => Ok(MaxProfitPolicy::PerPositionSum),
            "floored" | "floor" | "floored_per_position" => {
                Ok(MaxProfitPolicy::FlooredPerPosition)
            }
            _ => Err(format!("Unknown max profit policy: {}", s)),
        }
    }
}

/// Best-case profit of a single position given the payout it would receive
pub fn max_profit(
    balance: Decimal,
    total_cost: Decimal,
    payout_per_share: Decimal,
    policy: MaxProfitPolicy,
) -> Decimal {
    let profit = balance * payout_per_share - total_cost;
    match policy {
        MaxProfitPolicy::PerPositionSum => profit,
        MaxProfitPolicy::FlooredPerPosition => profit.max(Decimal::ZERO),
    }
}
