//! Status and settlement normalization across venues
//!
//! Venue-native market state is captured in [`VenueMarketState`] and every
//! caller goes through [`unify_market_status`] and [`resolve_result`] instead
//! of branching on the venue itself. Both functions are total.

use predict_core::{MarketSide, OrderFillState, Platform, UnifiedMarketStatus};
use predict_kalshi::response::ApiOrderStatus;
use predict_kalshi::types::{
    Market as KalshiMarket, MarketStatus, OrderStatus as KalshiOrderStatus,
};
use predict_polymarket::types::{clob_market_status, normalize_outcome};
use predict_polymarket::{ClobMarket, ClobToken, OrderStatus as PolymarketOrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Venue-native market state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "venue", rename_all = "UPPERCASE")]
pub enum VenueMarketState {
    /// CLOB venue: two flags plus a winner flag per outcome token
    Polymarket {
        active: bool,
        closed: bool,
        #[serde(default)]
        tokens: Vec<ClobToken>,
    },
    /// Binary exchange: lifecycle status plus result string
    Kalshi {
        status: MarketStatus,
        #[serde(default)]
        result: String,
    },
}

impl VenueMarketState {
    pub fn platform(&self) -> Platform {
        match self {
            VenueMarketState::Polymarket { .. } => Platform::Polymarket,
            VenueMarketState::Kalshi { .. } => Platform::Kalshi,
        }
    }
}

impl From<&ClobMarket> for VenueMarketState {
    fn from(market: &ClobMarket) -> Self {
        VenueMarketState::Polymarket {
            active: market.active,
            closed: market.closed,
            tokens: market.tokens.clone(),
        }
    }
}

impl From<&KalshiMarket> for VenueMarketState {
    fn from(market: &KalshiMarket) -> Self {
        VenueMarketState::Kalshi {
            status: market.status.clone(),
            result: market.result.clone(),
        }
    }
}

/// Map venue-native state to the unified market status.
///
/// Polymarket is `open` only when active and not closed, `settled` once
/// closed with a winner token, `closed` otherwise. Kalshi maps `active`,
/// `finalized`, `closed` and `determined`; other lifecycle values pass through
/// as their literal.
pub fn unify_market_status(state: &VenueMarketState) -> UnifiedMarketStatus {
    match state {
        VenueMarketState::Polymarket {
            active,
            closed,
            tokens,
        } => clob_market_status(*active, *closed, tokens),
        VenueMarketState::Kalshi { status, .. } => status.unified(),
    }
}

/// Resolved outcome of the market: `"yes"`, `"no"`, or empty while unresolved.
///
/// Polymarket reports the outcome label of the first winner token (binary
/// labels lowercased). Kalshi reports its `result` field as-is. Only
/// authoritative when the market is settled.
pub fn resolve_result(state: &VenueMarketState) -> String {
    match state {
        VenueMarketState::Polymarket { tokens, .. } => {
            let mut winners = tokens.iter().filter(|t| t.winner);
            let Some(first) = winners.next() else {
                return String::new();
            };
            if winners.next().is_some() {
                warn!(
                    "More than one winner token flagged, using {}",
                    first.token_id
                );
            }
            normalize_outcome(&first.outcome)
        }
        VenueMarketState::Kalshi { result, .. } => result.clone(),
    }
}

/// Per-share value of a holding once its market has settled.
///
/// `Some(payout)` for the winning side, `Some(0)` for the losing side, `None`
/// while the market is not settled or no winner is known.
pub fn settlement_price(
    state: &VenueMarketState,
    token_id: &str,
    side: MarketSide,
) -> Option<Decimal> {
    if unify_market_status(state) != UnifiedMarketStatus::Settled {
        return None;
    }

    let payout = state.platform().settlement_payout();
    let won = match state {
        VenueMarketState::Polymarket { tokens, .. } => {
            match tokens.iter().find(|t| t.token_id == token_id) {
                Some(token) => token.winner,
                None => {
                    let result = resolve_result(state);
                    if result.is_empty() {
                        return None;
                    }
                    side.wins(&result)
                }
            }
        }
        VenueMarketState::Kalshi { result, .. } => {
            if result.is_empty() {
                return None;
            }
            side.wins(result)
        }
    };

    Some(if won { payout } else { Decimal::ZERO })
}

/// Classify a stored order status literal into a fill state.
///
/// Backend literals (`filled`, `canceled`, `settled`, ...) are recognized
/// for both venues; otherwise the venue's own vocabulary applies. Kalshi
/// orders may also carry the backend's integer status code.
pub fn classify_order_status(platform: Platform, status: &str) -> OrderFillState {
    let status = status.trim();
    if let Some(state) = classify_backend_literal(status) {
        return state;
    }

    match platform {
        Platform::Polymarket => match status.parse::<PolymarketOrderStatus>() {
            Ok(s) => s.fill_state(),
            Err(_) => {
                debug!("Unrecognized Polymarket order status: {}", status);
                OrderFillState::Unfilled
            }
        },
        Platform::Kalshi => {
            if let Ok(code) = status.parse::<i32>() {
                return match ApiOrderStatus::try_from(code) {
                    Ok(s) => s.fill_state(),
                    Err(e) => {
                        debug!("{}", e);
                        OrderFillState::Unfilled
                    }
                };
            }
            let value = serde_json::Value::String(status.to_lowercase());
            match serde_json::from_value::<KalshiOrderStatus>(value) {
                Ok(s) => s.fill_state(),
                Err(e) => {
                    debug!("Unrecognized Kalshi order status {}: {}", status, e);
                    OrderFillState::Unfilled
                }
            }
        }
    }
}

fn classify_backend_literal(status: &str) -> Option<OrderFillState> {
    match status.to_lowercase().as_str() {
        "filled" => Some(OrderFillState::Filled),
        "canceled" | "cancelled" => Some(OrderFillState::Canceled),
        "settled" => Some(OrderFillState::Settled),
        "unfilled" | "open" | "partially_filled" => Some(OrderFillState::Unfilled),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn token(id: &str, outcome: &str, winner: bool) -> ClobToken {
        ClobToken {
            token_id: id.to_string(),
            outcome: outcome.to_string(),
            price: dec!(0.5),
            winner,
        }
    }

    fn polymarket(active: bool, closed: bool, winners: [bool; 2]) -> VenueMarketState {
        VenueMarketState::Polymarket {
            active,
            closed,
            tokens: vec![token("y", "Yes", winners[0]), token("n", "No", winners[1])],
        }
    }

    fn kalshi(status: &str, result: &str) -> VenueMarketState {
        VenueMarketState::Kalshi {
            status: MarketStatus::from(status.to_string()),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_polymarket_flag_grid() {
        for active in [false, true] {
            for closed in [false, true] {
                for winners in [[false, false], [true, false], [false, true]] {
                    let status = unify_market_status(&polymarket(active, closed, winners));
                    assert!(status.is_canonical());
                    assert_eq!(status == UnifiedMarketStatus::Open, active && !closed);
                    if closed {
                        let expected = if winners.contains(&true) {
                            UnifiedMarketStatus::Settled
                        } else {
                            UnifiedMarketStatus::Closed
                        };
                        assert_eq!(status, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_kalshi_lifecycle() {
        assert_eq!(unify_market_status(&kalshi("active", "")), UnifiedMarketStatus::Open);
        assert_eq!(
            unify_market_status(&kalshi("finalized", "yes")),
            UnifiedMarketStatus::Settled
        );
        assert_eq!(unify_market_status(&kalshi("closed", "")), UnifiedMarketStatus::Closed);
        assert_eq!(
            unify_market_status(&kalshi("determined", "no")),
            UnifiedMarketStatus::Closed
        );
        for literal in ["initialized", "inactive", "disputed", "amended", "paused"] {
            let status = unify_market_status(&kalshi(literal, ""));
            assert_eq!(status.as_str(), literal);
            assert!(!status.is_tradable());
            assert_eq!(status.canonical(), UnifiedMarketStatus::Closed);
        }
    }

    #[test]
    fn test_resolve_result() {
        assert_eq!(resolve_result(&polymarket(true, false, [false, false])), "");
        assert_eq!(resolve_result(&polymarket(false, true, [false, true])), "no");
        assert_eq!(resolve_result(&kalshi("finalized", "yes")), "yes");
        assert_eq!(resolve_result(&kalshi("active", "")), "");
    }

    #[test]
    fn test_settlement_price() {
        let settled = polymarket(false, true, [true, false]);
        assert_eq!(settlement_price(&settled, "y", MarketSide::Yes), Some(Decimal::ONE));
        assert_eq!(settlement_price(&settled, "n", MarketSide::No), Some(Decimal::ZERO));
        assert_eq!(
            settlement_price(&polymarket(true, false, [false, false]), "y", MarketSide::Yes),
            None
        );

        let finalized = kalshi("finalized", "no");
        assert_eq!(settlement_price(&finalized, "T", MarketSide::No), Some(Decimal::ONE));
        assert_eq!(settlement_price(&finalized, "T", MarketSide::Yes), Some(Decimal::ZERO));
        assert_eq!(settlement_price(&kalshi("finalized", ""), "T", MarketSide::Yes), None);
    }

    #[test]
    fn test_classify_order_status() {
        use OrderFillState::*;
        assert_eq!(classify_order_status(Platform::Polymarket, "MATCHED"), Filled);
        assert_eq!(classify_order_status(Platform::Polymarket, "LIVE"), Unfilled);
        assert_eq!(classify_order_status(Platform::Polymarket, "CANCELED"), Canceled);
        assert_eq!(classify_order_status(Platform::Kalshi, "executed"), Filled);
        assert_eq!(classify_order_status(Platform::Kalshi, "resting"), Unfilled);
        assert_eq!(classify_order_status(Platform::Kalshi, "5"), Settled);
        assert_eq!(classify_order_status(Platform::Kalshi, "settled"), Settled);
        assert_eq!(classify_order_status(Platform::Kalshi, "mystery"), Unfilled);
    }

    #[test]
    fn test_state_from_venue_market() {
        let market = ClobMarket {
            active: true,
            closed: false,
            tokens: vec![token("y", "Yes", false)],
            ..Default::default()
        };
        let state = VenueMarketState::from(&market);
        assert_eq!(state.platform(), Platform::Polymarket);
        assert_eq!(unify_market_status(&state), market.unified_status());

        for active in [false, true] {
            for closed in [false, true] {
                for winner in [false, true] {
                    let market = ClobMarket {
                        active,
                        closed,
                        tokens: vec![token("y", "Yes", winner), token("n", "No", false)],
                        ..Default::default()
                    };
                    let state = VenueMarketState::from(&market);
                    assert_eq!(unify_market_status(&state), market.unified_status());
                }
            }
        }

        let json = serde_json::to_value(&kalshi("disputed", "")).unwrap();
        assert_eq!(json["venue"], "KALSHI");
        assert_eq!(json["status"], "disputed");
    }
}
