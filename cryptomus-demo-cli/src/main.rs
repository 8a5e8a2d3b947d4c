//! Cryptomus Demo CLI
//!
//! Command-line interface for exercising the Cryptomus client.
//!
//! Credentials come from the environment (`CRYPTOMUS_MERCHANT_ID`,
//! `CRYPTOMUS_PAYMENT_KEY`, `CRYPTOMUS_PAYOUT_KEY`, `CRYPTOMUS_BASE_URL`,
//! `CRYPTOMUS_TIMEOUT_SECS`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cryptomus_lib::ApiSurface;
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "cryptomus-demo")]
#[command(about = "Cryptomus Demo CLI - exchange rates, recurring payments and webhook checks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the API root (can also be set via CRYPTOMUS_BASE_URL env var)
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print exchange rates for a currency
    Rates {
        /// Currency code (e.g. USDT)
        currency: String,
    },

    /// Manage recurring payments
    Recurrence {
        #[command(subcommand)]
        action: RecurrenceAction,
    },

    /// Verify the signature of a saved webhook body
    VerifyWebhook {
        /// File containing the raw callback body
        file: PathBuf,

        /// Which secret key signed the callback (payment or payout)
        #[arg(short, long, default_value = "payment")]
        surface: ApiSurface,

        /// Re-escape `/` as `\/` before hashing (PHP-style senders)
        #[arg(long)]
        escape_slashes: bool,
    },
}

#[derive(Subcommand)]
enum RecurrenceAction {
    /// Create a recurring payment
    Create {
        /// Amount charged each period
        #[arg(short, long)]
        amount: String,

        /// Currency of the amount
        #[arg(short, long)]
        currency: String,

        /// Name shown to the payer
        #[arg(short, long)]
        name: String,

        /// Billing period (weekly, monthly, three_month)
        #[arg(short, long, default_value = "monthly")]
        period: String,

        /// Order id in your system
        #[arg(long)]
        order_id: Option<String>,

        /// Currency to convert the amount into
        #[arg(long)]
        to_currency: Option<String>,

        /// Callback URL for status updates
        #[arg(long)]
        url_callback: Option<String>,

        /// Days the discounted amount applies for
        #[arg(long, requires = "discount_amount")]
        discount_days: Option<u32>,

        /// Discounted amount
        #[arg(long, requires = "discount_days")]
        discount_amount: Option<String>,

        /// Free-form data echoed back in callbacks
        #[arg(long)]
        additional_data: Option<String>,
    },

    /// Show a recurring payment
    Info {
        /// Recurrence uuid
        #[arg(long)]
        uuid: Option<String>,

        /// Order id in your system
        #[arg(long)]
        order_id: Option<String>,
    },

    /// List recurring payments
    List {
        /// Cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },

    /// Cancel a recurring payment
    Cancel {
        /// Recurrence uuid
        #[arg(long)]
        uuid: Option<String>,

        /// Order id in your system
        #[arg(long)]
        order_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the verbosity flag
    let default_filter = if cli.verbose {
        "cryptomus_demo_cli=debug,cryptomus_lib=debug"
    } else {
        "cryptomus_demo_cli=info,cryptomus_lib=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Rates { currency } => {
            commands::rates::run(base_url, &currency, cli.verbose).await?;
        }
        Commands::Recurrence { action } => match action {
            RecurrenceAction::Create {
                amount,
                currency,
                name,
                period,
                order_id,
                to_currency,
                url_callback,
                discount_days,
                discount_amount,
                additional_data,
            } => {
                let mut request =
                    cryptomus_lib::RecurrenceRequest::new(amount, currency, name, period);
                request.order_id = order_id;
                request.to_currency = to_currency;
                request.url_callback = url_callback;
                request.discount_days = discount_days;
                request.discount_amount = discount_amount;
                request.additional_data = additional_data;
                commands::recurrence::create(base_url, &request, cli.verbose).await?;
            }
            RecurrenceAction::Info { uuid, order_id } => {
                commands::recurrence::info(base_url, uuid, order_id).await?;
            }
            RecurrenceAction::List { cursor } => {
                commands::recurrence::list(base_url, cursor.as_deref(), cli.verbose).await?;
            }
            RecurrenceAction::Cancel { uuid, order_id } => {
                commands::recurrence::cancel(base_url, uuid, order_id, cli.verbose).await?;
            }
        },
        Commands::VerifyWebhook {
            file,
            surface,
            escape_slashes,
        } => {
            commands::verify::run(&file, surface, escape_slashes)?;
        }
    }

    Ok(())
}
