//! Demo 1: Economy User Listing
//!
//! Showcases: signed GET requests, fetch-all pagination, response caching
//!
//! Run: OST_KIT_API_KEY=... OST_KIT_API_SECRET=... cargo run --bin list_users

use colored::*;
use ostkit_rest::{CacheCategory, ListOptions, OrderBy, OstKitClient, SortOrder};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ECONOMY USERS".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let mut client = OstKitClient::from_env()?;
    println!("{} Using {}", "✓".green(), client.base_url());

    let options = ListOptions::new()
        .with_order_by(OrderBy::Name)
        .with_order(SortOrder::Asc);
    let users = client.users().list(&options, true)?;

    println!("{} Fetched {} users\n", "✓".green(), users.len());
    for user in &users {
        let balance = user
            .token_balance
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<22} {} {}", user.name.bold(), user.id.dimmed(), balance.yellow());
    }

    println!();
    println!(
        "  {} users cached",
        client.cache().len(CacheCategory::User).to_string().green()
    );

    Ok(())
}
