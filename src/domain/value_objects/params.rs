use serde::Serialize;
use serde_json::{Map, Value};

use super::payments::QuickPayPayment;
use crate::domain::errors::ApiError;

/// Caller-supplied parameters forwarded verbatim to the gateway as the JSON
/// request body (or query string for list calls).
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestParams(Map<String, Value>);

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Fills a key from configuration only when the caller did not set it.
    pub fn merge_default(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Fails with every key that is absent, null, or an empty string. The
    /// caller must fix the call, not retry.
    pub fn require(&self, keys: &[&str]) -> Result<(), ApiError> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| match self.0.get(**key) {
                None | Some(Value::Null) => true,
                Some(Value::String(text)) => text.is_empty(),
                Some(_) => false,
            })
            .map(|key| key.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::InvalidArgument { missing })
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Everything a caller may hold about a payment when asking for its current
/// snapshot. Resolution precedence: materialized snapshot, then gateway
/// payment id, then create-or-fail from the local order reference.
#[derive(Debug, Clone, Default)]
pub struct PaymentParams {
    pub payment: Option<QuickPayPayment>,
    pub payment_id: Option<i64>,
    pub order_number: Option<String>,
    pub currency: Option<String>,
}

impl PaymentParams {
    pub fn for_payment_id(payment_id: i64) -> Self {
        Self {
            payment_id: Some(payment_id),
            ..Self::default()
        }
    }

    pub fn for_order(order_number: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            order_number: Some(order_number.into()),
            currency: Some(currency.into()),
            ..Self::default()
        }
    }

    /// True when the caller holds no gateway payment at all yet.
    pub fn has_no_payment(&self) -> bool {
        self.payment.is_none() && self.payment_id.is_none()
    }
}
