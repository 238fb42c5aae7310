//! Splitledger settle CLI
//!
//! Loads a ledger snapshot (members, expenses, rate policy) from a JSON
//! file, computes balances and a settlement plan, and prints them.
//!
//! Usage: cargo run --bin settle -- path/to/ledger.json

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splitledger_core::currency::RatePolicy;
use splitledger_core::engine::SettlementEngine;
use splitledger_core::ledger::{Expense, Member};
use splitledger_rates::FrankfurterClient;
use splitledger_shared::AppConfig;
use splitledger_shared::types::MemberId;

/// On-disk ledger snapshot format.
#[derive(Debug, Deserialize)]
struct LedgerSnapshot {
    members: Vec<Member>,
    expenses: Vec<Expense>,
    policy: RatePolicy,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "splitledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let path = std::env::args()
        .nth(1)
        .context("usage: settle <ledger.json>")?;
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read ledger snapshot {path}"))?;
    let snapshot: LedgerSnapshot =
        serde_json::from_str(&raw).context("failed to parse ledger snapshot")?;

    info!(
        members = snapshot.members.len(),
        expenses = snapshot.expenses.len(),
        reporting = %snapshot.policy.currency,
        "computing settlement"
    );

    let engine = SettlementEngine::new(
        FrankfurterClient::from_config(&config.rates),
        Duration::from_millis(config.rates.timeout_ms),
    );
    let report = engine
        .compute(&snapshot.members, &snapshot.expenses, &snapshot.policy)
        .await?;

    let names: HashMap<MemberId, &str> = snapshot
        .members
        .iter()
        .map(|m| (m.id, m.display_name.as_str()))
        .collect();
    let name = |id: &MemberId| names.get(id).copied().unwrap_or("<unknown>");

    println!(
        "Ledger: {} expenses, {} {} total{}",
        report.summary.expense_count,
        report.summary.total_amount,
        snapshot.policy.currency,
        if report.summary.rates_stale {
            " (stale rates)"
        } else {
            ""
        }
    );

    println!("\nBalances:");
    for balance in &report.balances {
        println!(
            "  {:<20} paid {:>12}  owes {:>12}  net {:>12}",
            name(&balance.member),
            balance.total_paid,
            balance.total_share,
            balance.balance
        );
    }

    println!("\nSettlement plan:");
    if report.settlements.is_empty() {
        println!("  nothing to settle");
    }
    for settlement in &report.settlements {
        println!(
            "  {} pays {} {} to {}",
            name(&settlement.from),
            settlement.amount,
            snapshot.policy.currency,
            name(&settlement.to)
        );
    }

    if !report.summary.currencies.is_empty() {
        println!("\nRates used:");
        for rate in &report.summary.currencies {
            println!(
                "  1 {} = {} {} ({:?})",
                rate.currency, rate.rate, snapshot.policy.currency, rate.origin
            );
        }
    }

    Ok(())
}
