//! Recurrence commands - create, inspect, list and cancel recurring payments

use anyhow::{Context, Result};
use cryptomus_lib::{RecurrenceLookup, RecurrenceRequest};

use crate::ui;

fn lookup(uuid: Option<String>, order_id: Option<String>) -> RecurrenceLookup {
    RecurrenceLookup { uuid, order_id }
}

pub async fn create(
    base_url: Option<&str>,
    request: &RecurrenceRequest,
    verbose: bool,
) -> Result<()> {
    let client = super::build_client(base_url)?;

    let recurrence = client
        .create_recurrence(request)
        .await
        .context("Failed to create recurring payment")?;

    ui::success(&format!("Created recurring payment {}", recurrence.uuid));
    ui::key_value("Status", &recurrence.status);
    ui::key_value("Payment URL", &recurrence.url);
    if verbose {
        ui::json(&recurrence)?;
    }

    Ok(())
}

pub async fn info(
    base_url: Option<&str>,
    uuid: Option<String>,
    order_id: Option<String>,
) -> Result<()> {
    let client = super::build_client(base_url)?;

    let recurrence = client
        .recurrence_info(&lookup(uuid, order_id))
        .await
        .context("Failed to fetch recurring payment")?;

    ui::json(&recurrence)
}

pub async fn list(base_url: Option<&str>, cursor: Option<&str>, verbose: bool) -> Result<()> {
    let client = super::build_client(base_url)?;

    let page = client
        .list_recurrences(cursor)
        .await
        .context("Failed to list recurring payments")?;

    ui::header("Recurring Payments");
    for item in &page.items {
        println!(
            "  {}  {} {}  {}  {}",
            item.uuid, item.amount, item.currency, item.period, item.status
        );
    }

    if verbose {
        ui::key_value("Count", &page.paginate.count.to_string());
        ui::key_value("Per page", &page.paginate.per_page.to_string());
    }
    if let Some(next) = page.next_cursor() {
        ui::info(&format!("More results: --cursor {}", next));
    }

    Ok(())
}

pub async fn cancel(
    base_url: Option<&str>,
    uuid: Option<String>,
    order_id: Option<String>,
    verbose: bool,
) -> Result<()> {
    let client = super::build_client(base_url)?;

    let recurrence = client
        .cancel_recurrence(&lookup(uuid, order_id))
        .await
        .context("Failed to cancel recurring payment")?;

    ui::success(&format!("Cancelled recurring payment {}", recurrence.uuid));
    ui::key_value("Status", &recurrence.status);
    if verbose {
        ui::json(&recurrence)?;
    }

    Ok(())
}
