//! Prediction contracts admin tool
//!
//! Reads a JSON snapshot of ledger positions, orders and venue market state,
//! runs the normalizer and prints the unified response contracts.
//!
//! Usage: `predict-cli <snapshot.json> [positions|portfolio|events|orders]`

use anyhow::{bail, Context};
use predict_core::{EventPnLResponse, OrderItem, Response};
use predict_service::types::{OrderListQuery, PositionQuery};
use predict_service::{
    build_event_orders, build_portfolio_response, build_position_response, group_by_event,
    LedgerPosition, MarketQuote, NormalizerConfig,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Input snapshot
#[derive(Debug, Deserialize)]
struct Snapshot {
    user_wallet: String,
    #[serde(default)]
    usdc_balance: Decimal,
    #[serde(default)]
    positions: Vec<LedgerPosition>,
    #[serde(default)]
    orders: Vec<OrderItem>,
    /// Keyed by market id
    #[serde(default)]
    quotes: HashMap<String, MarketQuote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Positions,
    Portfolio,
    Events,
    Orders,
}

impl std::str::FromStr for Report {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positions" => Ok(Report::Positions),
            "portfolio" => Ok(Report::Portfolio),
            "events" => Ok(Report::Events),
            "orders" => Ok(Report::Orders),
            other => bail!("unknown report: {}", other),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,predict_cli=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: predict-cli <snapshot.json> [positions|portfolio|events|orders]")?;
    let report: Report = args.next().as_deref().unwrap_or("positions").parse()?;

    let config = NormalizerConfig::from_env()?;
    info!(
        "Normalizing {} ({:?}, max profit policy {})",
        path, report, config.max_profit_policy
    );

    let raw = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;
    debug!(
        "Snapshot has {} positions, {} orders, {} quotes",
        snapshot.positions.len(),
        snapshot.orders.len(),
        snapshot.quotes.len()
    );

    let output = run(&snapshot, report, &config)?;
    println!("{}", output);
    Ok(())
}

fn run(
    snapshot: &Snapshot,
    report: Report,
    config: &NormalizerConfig,
) -> anyhow::Result<String> {
    if report == Report::Orders {
        let query = OrderListQuery {
            user_wallet: snapshot.user_wallet.clone(),
            ..Default::default()
        };
        return render(build_event_orders(&query, &snapshot.orders, &snapshot.quotes)?);
    }

    let query = PositionQuery {
        user_wallet: snapshot.user_wallet.clone(),
        filters: Vec::new(),
    };
    let positions = build_position_response(&query, &snapshot.positions, &snapshot.quotes)?;

    match report {
        Report::Portfolio => render(build_portfolio_response(snapshot.usdc_balance, &positions)),
        Report::Events => {
            let events: Vec<EventPnLResponse> =
                group_by_event(&positions.positions, config.max_profit_policy)?
                    .into_iter()
                    .map(EventPnLResponse::from)
                    .collect();
            render(events)
        }
        _ => render(positions),
    }
}

fn render<T: Serialize>(data: T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&Response::success(data))?)
}
