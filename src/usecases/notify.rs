use std::sync::Arc;

use tracing::info;

use crate::domain::errors::ApiError;
use crate::domain::gateway::QuickPayGateway;
use crate::domain::value_objects::params::PaymentParams;
use crate::domain::value_objects::payments::QuickPayPayment;

/// Handles an inbound QuickPay callback. The pushed payload is never trusted
/// for status decisions; its only effect is to trigger a fresh fetch of the
/// gateway's authoritative snapshot, which downstream consumers reconcile
/// through the same path as polling.
pub struct NotifyUseCase<G>
where
    G: QuickPayGateway + Send + Sync + 'static,
{
    gateway: Arc<G>,
}

impl<G> NotifyUseCase<G>
where
    G: QuickPayGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Re-fetches the payment bound to the notified order. A callback for a
    /// payment that was never created surfaces as a logic error rather than
    /// creating one.
    pub async fn handle(&self, params: &PaymentParams) -> Result<QuickPayPayment, ApiError> {
        let payment = self.gateway.fetch_or_create_payment(params, false).await?;
        info!(
            payment_id = payment.id,
            state = %payment.state,
            "notify: refreshed payment from gateway"
        );

        Ok(payment)
    }
}
