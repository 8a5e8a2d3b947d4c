//! Rates command - print exchange rates for a currency

use anyhow::{Context, Result};

use crate::ui;

pub async fn run(base_url: Option<&str>, currency: &str, verbose: bool) -> Result<()> {
    let client = super::build_client(base_url)?;

    let rates = client
        .list_exchange_rates(currency)
        .await
        .with_context(|| format!("Failed to fetch exchange rates for {}", currency))?;

    ui::header(&format!("Exchange Rates for {}", currency.trim()));
    for rate in &rates {
        println!("1 {} = {} {}", rate.from, rate.course, rate.to);
    }

    if verbose {
        ui::key_value("Count", &rates.len().to_string());
    }

    Ok(())
}
