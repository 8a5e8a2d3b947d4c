//! Recurring payments.
//!
//! Create, look up, list and cancel recurrences. Every call is a POST signed
//! with the payment key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Cryptomus;
use crate::endpoint::{CREATE_RECURRENCE, RECURRENCE_CANCEL, RECURRENCE_INFO, RECURRENCE_LIST};
use crate::transport::{HttpMethod, HttpTransport};
use crate::{CryptomusError, Result};

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Request body for `/recurrence/create`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRequest {
    /// Amount charged each period.
    pub amount: String,
    /// Currency code of `amount` (e.g. `USDT`).
    pub currency: String,
    /// Name shown to the payer.
    pub name: String,
    /// Billing period (e.g. `weekly`, `monthly`, `three_month`).
    pub period: String,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub to_currency: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub url_callback: Option<String>,
    /// Days the discounted amount applies for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_days: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub discount_amount: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub additional_data: Option<String>,
}

impl RecurrenceRequest {
    /// Create a request with the four mandatory fields.
    pub fn new(
        amount: impl Into<String>,
        currency: impl Into<String>,
        name: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            name: name.into(),
            period: period.into(),
            ..Default::default()
        }
    }

    pub fn with_to_currency(mut self, to_currency: impl Into<String>) -> Self {
        self.to_currency = Some(to_currency.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_url_callback(mut self, url_callback: impl Into<String>) -> Self {
        self.url_callback = Some(url_callback.into());
        self
    }

    /// Set a discounted amount for the first `days` days.
    pub fn with_discount(mut self, days: u32, amount: impl Into<String>) -> Self {
        self.discount_days = Some(days);
        self.discount_amount = Some(amount.into());
        self
    }

    pub fn with_additional_data(mut self, data: impl Into<String>) -> Self {
        self.additional_data = Some(data.into());
        self
    }

    /// Check the mandatory fields before dispatch.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("amount", &self.amount),
            ("currency", &self.currency),
            ("name", &self.name),
            ("period", &self.period),
        ] {
            if value.trim().is_empty() {
                return Err(CryptomusError::invalid_data(field, "is required"));
            }
        }
        Ok(())
    }
}

/// Identifies an existing recurrence by uuid or by the merchant's order id.
///
/// Body of `/recurrence/info` and `/recurrence/cancel`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceLookup {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub order_id: Option<String>,
}

impl RecurrenceLookup {
    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            order_id: None,
        }
    }

    pub fn by_order_id(order_id: impl Into<String>) -> Self {
        Self {
            uuid: None,
            order_id: Some(order_id.into()),
        }
    }

    /// At least one identifier must be present.
    pub fn validate(&self) -> Result<()> {
        if is_unset(&self.uuid) && is_unset(&self.order_id) {
            return Err(CryptomusError::invalid_data(
                "uuid",
                "either uuid or order_id must be provided",
            ));
        }
        Ok(())
    }
}

/// A recurring payment as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub amount: String,
    pub currency: String,
    #[serde(default)]
    pub payer_currency: Option<String>,
    #[serde(default)]
    pub payer_amount_usd: Option<String>,
    #[serde(default)]
    pub payer_amount: Option<String>,
    #[serde(default)]
    pub url_callback: Option<String>,
    pub period: String,
    pub status: String,
    pub url: String,
    #[serde(default)]
    pub last_pay_off: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discount_days: Option<u32>,
    #[serde(default)]
    pub discount_amount: Option<String>,
    #[serde(default)]
    pub end_of_discount: Option<DateTime<Utc>>,
    #[serde(default)]
    pub additional_data: Option<String>,
}

/// Pagination block of `/recurrence/list`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginate {
    pub count: u64,
    pub has_pages: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub previous_cursor: Option<String>,
    pub per_page: u64,
}

/// One page of recurrences.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurrencePage {
    pub items: Vec<Recurrence>,
    pub paginate: Paginate,
}

impl RecurrencePage {
    /// Cursor for the following page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.paginate
            .next_cursor
            .as_deref()
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Serialize)]
struct RecurrenceListRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
}

impl<T: HttpTransport> Cryptomus<T> {
    /// Create a recurring payment.
    #[tracing::instrument(skip_all, fields(currency = %request.currency, period = %request.period))]
    pub async fn create_recurrence(&self, request: &RecurrenceRequest) -> Result<Recurrence> {
        request.validate()?;
        self.send(HttpMethod::Post, CREATE_RECURRENCE, &[], Some(request))
            .await
    }

    /// Fetch a recurring payment by uuid or order id.
    ///
    /// Fails locally, without a round trip, when neither is set.
    #[tracing::instrument(skip_all)]
    pub async fn recurrence_info(&self, lookup: &RecurrenceLookup) -> Result<Recurrence> {
        lookup.validate()?;
        self.send(HttpMethod::Post, RECURRENCE_INFO, &[], Some(lookup))
            .await
    }

    /// List recurring payments, one page per call.
    ///
    /// Pass the previous page's [`RecurrencePage::next_cursor`] to continue.
    #[tracing::instrument(skip_all, fields(has_cursor = cursor.is_some()))]
    pub async fn list_recurrences(&self, cursor: Option<&str>) -> Result<RecurrencePage> {
        let payload = RecurrenceListRequest {
            cursor: cursor.filter(|c| !c.is_empty()),
        };
        self.send(HttpMethod::Post, RECURRENCE_LIST, &[], Some(&payload))
            .await
    }

    /// Cancel a recurring payment by uuid or order id.
    ///
    /// Fails locally, without a round trip, when neither is set.
    #[tracing::instrument(skip_all)]
    pub async fn cancel_recurrence(&self, lookup: &RecurrenceLookup) -> Result<Recurrence> {
        lookup.validate()?;
        self.send(HttpMethod::Post, RECURRENCE_CANCEL, &[], Some(lookup))
            .await
    }
}
