//! Demo 2: Combined Balance
//!
//! Showcases: balance lookup, token conversion factor, OST price points
//!
//! Run: cargo run --bin combined_balance -- <user-uuid>

use std::env;

use colored::*;
use ostkit_rest::OstKitClient;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(user_id) = env::args().nth(1) else {
        eprintln!("usage: combined_balance <user-uuid>");
        std::process::exit(2);
    };

    let mut client = OstKitClient::from_env()?;
    let token = client.token().get()?;
    let combined = client.balances().combined(&user_id)?;

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  BALANCE OF {}", user_id).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();
    println!(
        "  {:<12} {} {}",
        "Available:".yellow(),
        combined.balance.available_balance,
        token.symbol
    );
    println!(
        "  {:<12} {}",
        "Airdropped:".yellow(),
        combined.balance.airdropped_balance
    );
    println!("  {:<12} {} OST", "Value:".yellow(), combined.ost_value.round_dp(6));
    match combined.usd_value {
        Some(usd) => println!("  {:<12} ${}", "".yellow(), usd.round_dp(2)),
        None => println!("  {:<12} {}", "".yellow(), "no USD price point".dimmed()),
    }

    Ok(())
}
