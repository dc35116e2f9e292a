use thiserror::Error;

/// Failure classification for gateway calls. Every variant is surfaced to the
/// caller unmodified; the core never retries or swallows any of them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required parameter bag keys are absent or empty. Fix the call, do not retry.
    #[error("missing required parameters: {}", missing.join(", "))]
    InvalidArgument { missing: Vec<String> },

    /// Request parameters could not be JSON-encoded.
    #[error("could not encode request parameters: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The gateway answered outside 2xx. Carries the raw body for diagnostics.
    #[error("quickpay returned status {status}: {body}")]
    Transport { status: u16, body: String },

    /// Response checksum header present but did not match the recomputed HMAC.
    /// The body must be discarded unparsed; treat as a security event.
    #[error("response checksum mismatch")]
    Integrity,

    /// Response body did not match the gateway contract (unparseable JSON,
    /// missing or ill-typed required field).
    #[error("invalid response from quickpay: {0}")]
    Protocol(String),

    /// The caller asked for something the payment lifecycle cannot answer,
    /// e.g. a status check on a payment that was never created.
    #[error("{0}")]
    Logic(String),

    /// Transport-level failure before any gateway response existed.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    pub fn protocol(err: impl std::fmt::Display) -> Self {
        Self::Protocol(err.to_string())
    }
}
