use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::ApiError;
use crate::domain::gateway::QuickPayGateway;
use crate::domain::value_objects::enums::operation_types::OperationType;
use crate::domain::value_objects::enums::payment_states::PaymentState;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::domain::value_objects::params::PaymentParams;
use crate::domain::value_objects::payments::QuickPayPayment;

/// Maps a gateway snapshot to the local payment status. The latest operation
/// breaks ties for the `new` and `processed` states; a snapshot in those
/// states with an empty history degrades to Failed/Canceled rather than
/// erroring, since the gateway state already proves no successful action
/// occurred.
pub fn reconcile(payment: &QuickPayPayment) -> PaymentStatus {
    match payment.state {
        PaymentState::Initial => PaymentStatus::New,
        PaymentState::New => match payment.latest_operation() {
            Some(operation)
                if operation.operation_type == OperationType::Authorize
                    && operation.is_approved() =>
            {
                PaymentStatus::Authorized
            }
            _ => PaymentStatus::Failed,
        },
        PaymentState::Pending => PaymentStatus::Pending,
        PaymentState::Rejected => PaymentStatus::Failed,
        PaymentState::Processed => match payment.latest_operation() {
            Some(operation)
                if operation.operation_type == OperationType::Capture
                    && operation.is_approved() =>
            {
                PaymentStatus::Captured
            }
            _ => PaymentStatus::Canceled,
        },
        PaymentState::Unknown => PaymentStatus::Unknown,
    }
}

/// Resolves the current local status for a payment reference: fetches the
/// authoritative snapshot (never creating one) and reconciles it.
pub struct PaymentStatusUseCase<G>
where
    G: QuickPayGateway + Send + Sync + 'static,
{
    gateway: Arc<G>,
}

impl<G> PaymentStatusUseCase<G>
where
    G: QuickPayGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn resolve(&self, params: &PaymentParams) -> Result<PaymentStatus, ApiError> {
        // First status check before any payment exists: the answer is New and
        // the gateway is not contacted.
        if params.has_no_payment() {
            debug!("payment_status: no gateway payment yet, marking new");
            return Ok(PaymentStatus::New);
        }

        let payment = self.gateway.fetch_or_create_payment(params, false).await?;
        let status = reconcile(&payment);
        debug!(
            payment_id = payment.id,
            state = %payment.state,
            %status,
            "payment_status: reconciled gateway snapshot"
        );

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateway::MockQuickPayGateway;
    use crate::domain::value_objects::payments::QuickPayPaymentOperation;

    fn payment(state: PaymentState, operations: Vec<QuickPayPaymentOperation>) -> QuickPayPayment {
        QuickPayPayment {
            id: 42,
            order_id: "SHOP-1001".to_string(),
            currency: "DKK".to_string(),
            state,
            operations,
        }
    }

    fn operation(operation_type: OperationType, qp_status_code: Option<i32>) -> QuickPayPaymentOperation {
        QuickPayPaymentOperation {
            id: 1,
            operation_type,
            amount: Some(5400),
            qp_status_code,
        }
    }

    #[test]
    fn initial_is_new_regardless_of_operations() {
        let snapshot = payment(
            PaymentState::Initial,
            vec![operation(OperationType::Capture, Some(20000))],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::New);
    }

    #[test]
    fn new_without_operations_is_failed() {
        assert_eq!(
            reconcile(&payment(PaymentState::New, vec![])),
            PaymentStatus::Failed
        );
    }

    #[test]
    fn new_with_approved_authorize_is_authorized() {
        let snapshot = payment(
            PaymentState::New,
            vec![operation(OperationType::Authorize, Some(20000))],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Authorized);
    }

    #[test]
    fn new_with_declined_authorize_is_failed() {
        let snapshot = payment(
            PaymentState::New,
            vec![operation(OperationType::Authorize, Some(40000))],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Failed);
    }

    #[test]
    fn new_with_authorize_missing_status_code_is_failed() {
        let snapshot = payment(
            PaymentState::New,
            vec![operation(OperationType::Authorize, None)],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Failed);
    }

    #[test]
    fn new_with_non_authorize_latest_operation_is_failed() {
        let snapshot = payment(
            PaymentState::New,
            vec![operation(OperationType::Refund, Some(20000))],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Failed);
    }

    #[test]
    fn pending_is_pending_without_inspecting_operations() {
        let snapshot = payment(
            PaymentState::Pending,
            vec![operation(OperationType::Authorize, Some(40000))],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Pending);
    }

    #[test]
    fn rejected_is_failed() {
        assert_eq!(
            reconcile(&payment(PaymentState::Rejected, vec![])),
            PaymentStatus::Failed
        );
    }

    #[test]
    fn processed_without_operations_is_canceled() {
        assert_eq!(
            reconcile(&payment(PaymentState::Processed, vec![])),
            PaymentStatus::Canceled
        );
    }

    #[test]
    fn processed_with_approved_capture_is_captured() {
        let snapshot = payment(
            PaymentState::Processed,
            vec![
                operation(OperationType::Authorize, Some(20000)),
                operation(OperationType::Capture, Some(20000)),
            ],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Captured);
    }

    #[test]
    fn processed_with_declined_capture_is_canceled() {
        let snapshot = payment(
            PaymentState::Processed,
            vec![operation(OperationType::Capture, Some(40000))],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Canceled);
    }

    #[test]
    fn processed_with_refund_latest_is_canceled() {
        let snapshot = payment(
            PaymentState::Processed,
            vec![
                operation(OperationType::Capture, Some(20000)),
                operation(OperationType::Refund, Some(20000)),
            ],
        );
        assert_eq!(reconcile(&snapshot), PaymentStatus::Canceled);
    }

    #[test]
    fn unrecognized_gateway_state_is_unknown() {
        assert_eq!(
            reconcile(&payment(PaymentState::Unknown, vec![])),
            PaymentStatus::Unknown
        );
    }

    #[tokio::test]
    async fn resolves_new_without_contacting_the_gateway() {
        // No expectations set: any gateway call panics the test.
        let gateway = MockQuickPayGateway::new();
        let usecase = PaymentStatusUseCase::new(Arc::new(gateway));

        let status = usecase.resolve(&PaymentParams::default()).await.unwrap();
        assert_eq!(status, PaymentStatus::New);
    }

    #[tokio::test]
    async fn resolves_pending_from_a_fetched_snapshot() {
        let mut gateway = MockQuickPayGateway::new();
        gateway
            .expect_fetch_or_create_payment()
            .withf(|params, create| params.payment_id == Some(42) && !*create)
            .returning(|_, _| Box::pin(async { Ok(payment(PaymentState::Pending, vec![])) }));

        let usecase = PaymentStatusUseCase::new(Arc::new(gateway));
        let status = usecase
            .resolve(&PaymentParams::for_payment_id(42))
            .await
            .unwrap();

        assert_eq!(status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn surfaces_gateway_errors_unmodified() {
        let mut gateway = MockQuickPayGateway::new();
        gateway
            .expect_fetch_or_create_payment()
            .returning(|_, _| {
                Box::pin(async { Err(ApiError::Logic("payment does not exist".to_string())) })
            });

        let usecase = PaymentStatusUseCase::new(Arc::new(gateway));
        let err = usecase
            .resolve(&PaymentParams::for_payment_id(42))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Logic(_)));
    }
}
