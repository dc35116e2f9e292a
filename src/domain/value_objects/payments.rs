use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use super::enums::{operation_types::OperationType, payment_states::PaymentState};

pub const STATUS_CODE_APPROVED: i32 = 20000;

/// One action the gateway performed against a payment, with its approval
/// outcome. Constructed only by deserializing gateway JSON, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickPayPaymentOperation {
    pub id: i64,
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    /// Minor currency units. Absent for some operation types; "unknown" stays
    /// distinguishable from "zero".
    #[serde(default)]
    pub amount: Option<i64>,
    /// The gateway encodes this loosely: number, numeric string, null, or
    /// absent.
    #[serde(default, deserialize_with = "deserialize_status_code")]
    pub qp_status_code: Option<i32>,
}

impl QuickPayPaymentOperation {
    /// Approved iff the gateway reported status code 20000. An absent status
    /// code means not approved.
    pub fn is_approved(&self) -> bool {
        self.qp_status_code == Some(STATUS_CODE_APPROVED)
    }
}

/// The gateway's current view of a payment: identity, currency, raw lifecycle
/// state, and the chronological operation history. Reconstructed fresh from
/// gateway JSON on every round-trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickPayPayment {
    pub id: i64,
    pub order_id: String,
    pub currency: String,
    pub state: PaymentState,
    #[serde(default)]
    pub operations: Vec<QuickPayPaymentOperation>,
}

impl QuickPayPayment {
    /// The most recent operation, or None for a payment nothing has acted on.
    pub fn latest_operation(&self) -> Option<&QuickPayPaymentOperation> {
        self.operations.last()
    }

    /// Amount of the most recent approved authorize operation, scanning
    /// newest-first, or 0 when no approved authorize exists.
    pub fn authorized_amount(&self) -> i64 {
        self.operations
            .iter()
            .rev()
            .find(|operation| {
                operation.operation_type == OperationType::Authorize && operation.is_approved()
            })
            .and_then(|operation| operation.amount)
            .unwrap_or(0)
    }
}

/// Hosted payment page URL returned by the link endpoint. Single-use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickPayPaymentLink {
    pub url: String,
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .map(|code| Some(code as i32))
            .ok_or_else(|| de::Error::custom("qp_status_code is not an integer")),
        Some(Value::String(text)) if text.is_empty() => Ok(None),
        Some(Value::String(text)) => text.parse::<i32>().map(Some).map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!(
            "unexpected qp_status_code value: {other}"
        ))),
    }
}
