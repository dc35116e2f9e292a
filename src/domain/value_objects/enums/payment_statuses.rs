use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Local payment status emitted toward the order system. Exactly one of these
/// is produced per reconciliation call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    New,
    Authorized,
    Pending,
    Failed,
    Captured,
    Canceled,
    Unknown,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PaymentStatus::New => "new",
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Captured => "captured",
            PaymentStatus::Canceled => "canceled",
            PaymentStatus::Unknown => "unknown",
        };
        write!(f, "{}", status)
    }
}
