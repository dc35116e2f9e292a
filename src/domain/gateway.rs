use async_trait::async_trait;
use mockall::automock;

use crate::domain::errors::ApiError;
use crate::domain::value_objects::params::{PaymentParams, RequestParams};
use crate::domain::value_objects::payments::{QuickPayPayment, QuickPayPaymentLink};

/// High-level intents against the QuickPay API. The gateway stays the source
/// of truth for payment state; every call returns a fresh snapshot.
#[async_trait]
#[automock]
pub trait QuickPayGateway {
    /// Resolves a snapshot for the caller's payment reference. With `create`
    /// set, a payment is created from the local order reference when none
    /// exists yet; without it, a missing payment is a logic error and no
    /// request is issued.
    async fn fetch_or_create_payment(
        &self,
        params: &PaymentParams,
        create: bool,
    ) -> Result<QuickPayPayment, ApiError>;

    async fn list_payments(&self, query: &RequestParams) -> Result<Vec<QuickPayPayment>, ApiError>;

    /// Requests a hosted payment page. `continue_url`, `cancel_url`,
    /// `callback_url` and `amount` are required; configured `payment_methods`
    /// and `auto_capture` are merged in as defaults.
    async fn create_payment_link(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPaymentLink, ApiError>;

    /// Authorizes the payment. Requires `card` and `amount`.
    async fn authorize_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError>;

    /// Captures an authorized amount. Requires `amount`.
    async fn capture_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError>;

    /// Refunds a captured amount. Requires `amount`.
    async fn refund_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError>;

    /// Cancels the payment. Requires `amount`.
    async fn cancel_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError>;
}
