//! Order enrichment
//!
//! Values an order's filled quantity at the current market price, the same
//! way a position is valued.

use crate::normalizer::{classify_order_status, settlement_price};
use crate::positions::MarketQuote;
use crate::types::OrderListQuery;
use predict_core::{
    pnl_percent, EventOrderItem, EventOrdersResponse, OrderDirection, OrderItem,
    OrderStatusFilter, Platform, PredictError, PredictResult,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Shares actually filled on an order
///
/// Derived from the filled cost and average fill price; orders without a fill
/// price have filled nothing.
pub fn filled_shares(order: &OrderItem) -> Decimal {
    if order.filled_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    order
        .filled_cost
        .checked_div(order.filled_price)
        .unwrap_or(Decimal::ZERO)
}

/// Attach current price, value and P&L to an order.
///
/// A BUY gains when the filled shares are worth more than was paid. A SELL
/// gains when the shares sold are now worth less than was received.
pub fn enrich_order(order: &OrderItem, quote: &MarketQuote) -> EventOrderItem {
    let current_price = settlement_price(&quote.state, &order.token_id, order.market_side)
        .unwrap_or(quote.current_price);
    let current_value = filled_shares(order) * current_price;
    let pnl = match order.order_direction {
        OrderDirection::Buy => current_value - order.filled_cost,
        OrderDirection::Sell => order.filled_cost - current_value,
    };

    EventOrderItem {
        id: order.id.clone(),
        user_wallet: order.user_wallet.clone(),
        order_time: order.order_time,
        market_type: order.market_type,
        market_id: order.market_id.clone(),
        market_out_id: order.market_out_id.clone(),
        event_id: order.event_id.clone(),
        market_side: order.market_side,
        token_id: order.token_id.clone(),
        token_amount: order.token_amount,
        order_direction: order.order_direction,
        order_type: order.order_type,
        limit_price: order.limit_price,
        requested_shares: order.requested_shares,
        shares_amount: order.shares_amount,
        filled_cost: order.filled_cost,
        filled_price: order.filled_price,
        fees_paid: order.fees_paid,
        status: order.status.clone(),
        current_price,
        avg_cost: order.filled_price,
        current_value,
        pnl,
        pnl_percent: pnl_percent(pnl, order.filled_cost),
        source: order.market_type,
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}

/// Orders whose normalized fill state passes `filter`
pub fn filter_orders(orders: &[OrderItem], filter: OrderStatusFilter) -> Vec<&OrderItem> {
    orders
        .iter()
        .filter(|o| filter.admits(classify_order_status(o.market_type, &o.status)))
        .collect()
}

fn matches_query(order: &OrderItem, query: &OrderListQuery, venue: Option<Platform>) -> bool {
    venue.map_or(true, |v| order.market_type == v)
        && (query.market_id.is_empty() || order.market_id == query.market_id)
        && (query.event_id.is_empty() || order.event_id == query.event_id)
        && (query.token_id.is_empty() || order.token_id == query.token_id)
}

/// Filter, paginate and enrich a wallet's orders.
///
/// `quotes` is keyed by market id. Orders must belong to the queried wallet
/// and every order on the requested page needs a quote.
pub fn build_event_orders(
    query: &OrderListQuery,
    orders: &[OrderItem],
    quotes: &HashMap<String, MarketQuote>,
) -> PredictResult<EventOrdersResponse> {
    query.validate()?;
    if let Some(foreign) = orders.iter().find(|o| o.user_wallet != query.user_wallet) {
        return Err(PredictError::invalid_input(format!(
            "order {} belongs to {}, not {}",
            foreign.id, foreign.user_wallet, query.user_wallet
        )));
    }

    let venue = if query.market_type.is_empty() {
        None
    } else {
        Some(
            query
                .market_type
                .parse::<Platform>()
                .map_err(PredictError::invalid_input)?,
        )
    };

    let selected: Vec<&OrderItem> = filter_orders(orders, query.status_filter)
        .into_iter()
        .filter(|o| matches_query(o, query, venue))
        .collect();

    let (page, page_size) = query.pagination();
    let skip = (page as usize - 1) * page_size as usize;
    let mut enriched = Vec::new();
    for order in selected.iter().skip(skip).take(page_size as usize) {
        let quote = quotes.get(&order.market_id).ok_or_else(|| {
            PredictError::invalid_input(format!("no market quote for {}", order.market_id))
        })?;
        enriched.push(enrich_order(order, quote));
    }

    debug!(
        "Enriched {} of {} orders for {}",
        enriched.len(),
        selected.len(),
        query.user_wallet
    );
    Ok(EventOrdersResponse {
        total: selected.len() as i64,
        page,
        page_size,
        orders: enriched,
    })
}
