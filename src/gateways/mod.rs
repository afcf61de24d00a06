use crate::domain::payment::PaymentGatewayResult;
use crate::error::GatewayError;
use rust_decimal::Decimal;

pub mod mock;
pub mod paytech;

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// One outbound call, no retries. The key travels as the `Idempotency-Key`
    /// header so the gateway can deduplicate on its side too.
    async fn create_payment(
        &self,
        amount: Decimal,
        idempotency_key: &str,
    ) -> Result<PaymentGatewayResult, GatewayError>;
}
