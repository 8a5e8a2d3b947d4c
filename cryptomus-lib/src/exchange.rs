//! Exchange rates.

use serde::{Deserialize, Serialize};

use crate::client::Cryptomus;
use crate::endpoint::EXCHANGE_RATE_LIST;
use crate::transport::{HttpMethod, HttpTransport};
use crate::{CryptomusError, Result};

/// Conversion rate from one currency to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    /// Units of `to` per one unit of `from`, as a decimal string.
    pub course: String,
}

impl<T: HttpTransport> Cryptomus<T> {
    /// List exchange rates from `currency` (e.g. `"USDT"`) to every supported
    /// currency.
    ///
    /// `currency` is trimmed; an empty code fails locally. An empty rate list
    /// is reported as [`CryptomusError::EmptyResult`].
    #[tracing::instrument(skip(self))]
    pub async fn list_exchange_rates(&self, currency: &str) -> Result<Vec<ExchangeRate>> {
        let currency = currency.trim();
        if currency.is_empty() {
            return Err(CryptomusError::invalid_data(
                "currency",
                "currency parameter is required",
            ));
        }

        let rates: Vec<ExchangeRate> = self
            .send::<(), _>(
                HttpMethod::Get,
                EXCHANGE_RATE_LIST,
                &[("currency", currency)],
                None,
            )
            .await?;

        if rates.is_empty() {
            tracing::warn!(currency, "exchange rate list is empty");
            return Err(CryptomusError::EmptyResult);
        }

        Ok(rates)
    }
}
