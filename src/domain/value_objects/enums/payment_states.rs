use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Raw lifecycle state as reported by QuickPay. States the gateway may add in
/// the future land on `Unknown` instead of failing deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Initial,
    New,
    Pending,
    Rejected,
    Processed,
    #[serde(other)]
    Unknown,
}

impl Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            PaymentState::Initial => "initial",
            PaymentState::New => "new",
            PaymentState::Pending => "pending",
            PaymentState::Rejected => "rejected",
            PaymentState::Processed => "processed",
            PaymentState::Unknown => "unknown",
        };
        write!(f, "{}", state)
    }
}
