use itertools::Itertools;
use predict_core::{
    value_position, CostBasis, MarketSide, MaxProfitPolicy, Platform, PositionCost, PositionItem,
    UnifiedMarketStatus,
};
use predict_kalshi::types::MarketStatus;
use predict_polymarket::ClobToken;
use predict_service::{
    aggregate_event, resolve_result, unify_market_status, value_ledger_position, LedgerPosition,
    MarketQuote, VenueMarketState,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn clob_tokens(yes_winner: bool, no_winner: bool) -> Vec<ClobToken> {
    vec![
        ClobToken {
            token_id: "yes-token".to_string(),
            outcome: "Yes".to_string(),
            price: dec!(0.7),
            winner: yes_winner,
        },
        ClobToken {
            token_id: "no-token".to_string(),
            outcome: "No".to_string(),
            price: dec!(0.3),
            winner: no_winner,
        },
    ]
}

fn valued(
    event: &str,
    token: &str,
    balance: Decimal,
    cost: Decimal,
    price: Decimal,
) -> PositionItem {
    let ledger = LedgerPosition {
        user_wallet: "0xabc".to_string(),
        token_id: token.to_string(),
        market_id: format!("m-{}", token),
        event_id: event.to_string(),
        event_title: "Who wins?".to_string(),
        venue: Platform::Polymarket,
        side: MarketSide::Yes,
        shares: balance,
        cost: PositionCost::new(balance, CostBasis::TotalCost(cost)),
        is_settle: false,
    };
    let quote = MarketQuote::new(
        VenueMarketState::Polymarket {
            active: true,
            closed: false,
            tokens: clob_tokens(false, false),
        },
        price,
    );
    value_ledger_position(&ledger, &quote).unwrap()
}

#[test]
fn clob_status_is_open_only_when_active_and_not_closed() {
    for (active, closed, yes_winner, no_winner) in [
        (false, false, false, false),
        (true, false, false, false),
        (false, true, false, false),
        (true, true, false, false),
        (false, true, true, false),
        (true, true, false, true),
        (true, false, true, false),
    ] {
        let state = VenueMarketState::Polymarket {
            active,
            closed,
            tokens: clob_tokens(yes_winner, no_winner),
        };
        let status = unify_market_status(&state);
        assert!(matches!(
            status,
            UnifiedMarketStatus::Open | UnifiedMarketStatus::Closed | UnifiedMarketStatus::Settled
        ));
        assert_eq!(status == UnifiedMarketStatus::Open, active && !closed);
    }
}

#[test]
fn kalshi_lifecycle_maps_to_unified_status() {
    let cases = [
        ("active", UnifiedMarketStatus::Open),
        ("finalized", UnifiedMarketStatus::Settled),
        ("closed", UnifiedMarketStatus::Closed),
        ("determined", UnifiedMarketStatus::Closed),
    ];
    for (native, expected) in cases {
        let state = VenueMarketState::Kalshi {
            status: MarketStatus::from(native.to_string()),
            result: String::new(),
        };
        assert_eq!(unify_market_status(&state), expected);
    }
}

#[test]
fn value_position_examples() {
    let cost = PositionCost {
        balance: dec!(10),
        avg_cost: dec!(2),
        total_cost: dec!(20),
    };
    let v = value_position(&cost, dec!(3));
    assert_eq!(v.current_value, dec!(30));
    assert_eq!(v.unrealized_pnl, dec!(10));
    assert_eq!(v.unrealized_pnl_percent, dec!(0.5));

    let free = PositionCost {
        balance: dec!(5),
        avg_cost: Decimal::ZERO,
        total_cost: Decimal::ZERO,
    };
    assert_eq!(value_position(&free, dec!(1)).unrealized_pnl_percent, Decimal::ZERO);
}

#[test]
fn repeated_valuation_is_bit_identical() {
    let cost = PositionCost::new(dec!(7), CostBasis::TotalCost(dec!(2.33)));
    let first = value_position(&cost, dec!(0.4137));
    let second = value_position(&cost, dec!(0.4137));
    assert_eq!(first, second);
    assert_eq!(first.unrealized_pnl.serialize(), second.unrealized_pnl.serialize());
    assert_eq!(
        first.unrealized_pnl_percent.serialize(),
        second.unrealized_pnl_percent.serialize()
    );
}

#[test]
fn aggregate_event_is_order_independent() {
    let positions = vec![
        valued("e1", "a", dec!(10), dec!(4.2), dec!(0.51)),
        valued("e1", "b", dec!(3), dec!(0.93), dec!(0.27)),
        valued("e1", "c", dec!(12.5), dec!(7), dec!(0.66)),
        valued("e1", "d", dec!(1), Decimal::ZERO, dec!(0.05)),
    ];
    let baseline = aggregate_event("e1", &positions, MaxProfitPolicy::PerPositionSum).unwrap();

    for perm in positions.iter().cloned().permutations(positions.len()) {
        let event = aggregate_event("e1", &perm, MaxProfitPolicy::PerPositionSum).unwrap();
        assert_eq!(event.total_cost, baseline.total_cost);
        assert_eq!(event.current_value, baseline.current_value);
        assert_eq!(event.unrealized_pnl, baseline.unrealized_pnl);
        assert_eq!(event.max_profit, baseline.max_profit);
    }
}

#[test]
fn resolve_result_follows_winner_flag() {
    let unresolved = VenueMarketState::Polymarket {
        active: true,
        closed: false,
        tokens: clob_tokens(false, false),
    };
    assert_eq!(resolve_result(&unresolved), "");

    let resolved = VenueMarketState::Polymarket {
        active: false,
        closed: true,
        tokens: clob_tokens(true, false),
    };
    assert_eq!(unify_market_status(&resolved), UnifiedMarketStatus::Settled);
    assert_eq!(resolve_result(&resolved), "yes");
}

#[test]
fn position_item_survives_the_wire() {
    let mut item = valued("e1", "a", dec!(10.123456), dec!(3.000001), dec!(0.3333));
    item.market_status = UnifiedMarketStatus::Other("disputed".to_string());

    let json = serde_json::to_string(&item).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["balance"], "10.123456");
    assert_eq!(value["market_status"], "disputed");
    assert_eq!(value["source"], "POLYMARKET");

    let back: PositionItem = serde_json::from_str(&json).unwrap();
    assert_eq!(back, item);
    assert_eq!(back.current_value.scale(), item.current_value.scale());
    assert_eq!(back.total_cost.to_string(), "3.000001");
}
