//! Canned response bodies.

use serde_json::{json, Value};

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    pub const MERCHANT_ID: &'static str = "8b03432e-385b-4670-8d06-064591096795";
    pub const PAYMENT_KEY: &'static str = "test-payment-key";
    pub const PAYOUT_KEY: &'static str = "test-payout-key";
    pub const RECURRENCE_UUID: &'static str = "afd050e8-35ea-4129-bbdd-73f510bd2bb2";

    /// A recurrence object as returned by the API.
    pub fn recurrence() -> Value {
        json!({
            "uuid": Self::RECURRENCE_UUID,
            "name": "Recurring payment",
            "order_id": "order-1",
            "amount": "5",
            "currency": "USDT",
            "payer_currency": null,
            "payer_amount_usd": "0.00",
            "payer_amount": null,
            "url_callback": "https://example.com/callback",
            "period": "monthly",
            "status": "wait_accept",
            "url": "https://pay.cryptomus.com/recurring/afd050e8",
            "last_pay_off": null,
            "discount_days": 0,
            "discount_amount": null,
            "end_of_discount": null,
            "additional_data": null
        })
    }

    /// Success envelope around [`Self::recurrence`].
    pub fn recurrence_envelope() -> Value {
        json!({ "state": 0, "result": Self::recurrence() })
    }

    /// Success envelope for `/recurrence/list`.
    pub fn recurrence_page_envelope(next_cursor: Option<&str>) -> Value {
        json!({
            "state": 0,
            "result": {
                "items": [Self::recurrence()],
                "paginate": {
                    "count": 1,
                    "hasPages": next_cursor.is_some(),
                    "nextCursor": next_cursor,
                    "previousCursor": null,
                    "perPage": 15
                }
            }
        })
    }

    /// Success envelope for `/exchange-rate/USDT/list` with one rate.
    pub fn exchange_rates_envelope() -> Value {
        json!({
            "state": 0,
            "result": [{ "from": "USDT", "to": "BTC", "course": "0.000015" }]
        })
    }

    /// Logical failure envelope with a validation map.
    pub fn validation_envelope(field: &str, message: &str) -> Value {
        json!({ "state": 1, "errors": { field: [message] } })
    }
}
