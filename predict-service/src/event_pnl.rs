//! Event-level P&L aggregation
//!
//! Positions sharing an event id roll up into one aggregate. Totals are plain
//! sums, so the result does not depend on the order positions are supplied.

use predict_core::{
    max_profit, pnl_percent, EventPnLResponse, MaxProfitPolicy, PositionItem, PredictError,
    PredictResult, UnifiedMarketStatus,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregated P&L of an event
#[derive(Debug, Clone, PartialEq)]
pub struct EventPnL {
    pub event_id: String,
    pub total_cost: Decimal,
    pub current_value: Decimal,
    pub unrealized_pnl: Decimal,
    pub pnl_percent: Decimal,
    pub max_profit: Decimal,
    pub positions: Vec<PositionItem>,
}

impl From<EventPnL> for EventPnLResponse {
    fn from(event: EventPnL) -> Self {
        EventPnLResponse {
            event_id: event.event_id,
            total_cost: event.total_cost,
            current_value: event.current_value,
            max_profit: event.max_profit,
            unrealized_pnl: event.unrealized_pnl,
            pnl_percent: event.pnl_percent,
            positions: event.positions,
        }
    }
}

/// Per-share payout a position would receive in its best case
///
/// Open and closed markets can still resolve in the holder's favour, so the
/// venue payout applies. A settled market pays the venue payout to the winning
/// side and nothing to the losing side.
fn best_case_payout(position: &PositionItem) -> Decimal {
    let payout = position.market_type.settlement_payout();
    let settled = position.market_status == UnifiedMarketStatus::Settled;
    if !settled || position.market_result.is_empty() {
        return payout;
    }

    let result = position.market_result.as_str();
    if result.eq_ignore_ascii_case("yes") || result.eq_ignore_ascii_case("no") {
        if position.market_side.wins(result) {
            payout
        } else {
            Decimal::ZERO
        }
    } else {
        // Non-binary outcome label: the settled price already reflects the payout
        position.current_price
    }
}

/// Roll up positions belonging to one event.
///
/// Every position must carry `event_id`, have non-negative balance and cost,
/// and a valuation that agrees with its balance, price and cost. Max profit is computed per position and summed according to
/// `policy`.
pub fn aggregate_event(
    event_id: &str,
    positions: &[PositionItem],
    policy: MaxProfitPolicy,
) -> PredictResult<EventPnL> {
    PredictError::require("event_id", event_id)?;

    let mut total_cost = Decimal::ZERO;
    let mut current_value = Decimal::ZERO;
    let mut best_case = Decimal::ZERO;

    for position in positions {
        if position.event_id != event_id {
            return Err(PredictError::invalid_input(format!(
                "position {} belongs to event {}, not {}",
                position.token_id, position.event_id, event_id
            )));
        }
        if position.balance < Decimal::ZERO || position.total_cost < Decimal::ZERO {
            return Err(PredictError::invalid_input(format!(
                "position {} has negative balance or cost",
                position.token_id
            )));
        }
        if position.current_value != position.balance * position.current_price
            || position.unrealized_pnl != position.current_value - position.total_cost
        {
            return Err(PredictError::invalid_input(format!(
                "position {} has a valuation inconsistent with its balance, price and cost",
                position.token_id
            )));
        }

        total_cost += position.total_cost;
        current_value += position.current_value;
        best_case += max_profit(
            position.balance,
            position.total_cost,
            best_case_payout(position),
            policy,
        );
    }

    let unrealized_pnl = current_value - total_cost;
    debug!(
        "Aggregated event {}: {} positions, cost {}, value {}, max profit {}",
        event_id,
        positions.len(),
        total_cost,
        current_value,
        best_case
    );

    Ok(EventPnL {
        event_id: event_id.to_string(),
        total_cost,
        current_value,
        unrealized_pnl,
        pnl_percent: pnl_percent(unrealized_pnl, total_cost),
        max_profit: best_case,
        positions: positions.to_vec(),
    })
}

/// Split positions by event id and aggregate each group, ordered by event id
///
/// Positions without an event id are skipped.
pub fn group_by_event(
    positions: &[PositionItem],
    policy: MaxProfitPolicy,
) -> PredictResult<Vec<EventPnL>> {
    let mut groups: BTreeMap<&str, Vec<PositionItem>> = BTreeMap::new();
    for position in positions.iter().filter(|p| !p.event_id.is_empty()) {
        groups
            .entry(position.event_id.as_str())
            .or_default()
            .push(position.clone());
    }

    groups
        .into_iter()
        .map(|(event_id, group)| aggregate_event(event_id, &group, policy))
        .collect()
}
