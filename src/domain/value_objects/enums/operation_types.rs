use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Action the gateway performed against a payment. Types this integration does
/// not act on (e.g. session checks) fall into `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Authorize,
    Capture,
    Refund,
    Cancel,
    #[serde(other)]
    Other,
}

impl Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operation_type = match self {
            OperationType::Authorize => "authorize",
            OperationType::Capture => "capture",
            OperationType::Refund => "refund",
            OperationType::Cancel => "cancel",
            OperationType::Other => "other",
        };
        write!(f, "{}", operation_type)
    }
}
