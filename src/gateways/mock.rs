use crate::domain::payment::PaymentGatewayResult;
use crate::error::GatewayError;
use crate::gateways::PaymentGateway;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    AlwaysSuccess,
    Respond(PaymentGatewayResult),
    Reject { status: u16, body: String },
    Timeout(Duration),
    Unreachable,
    EmptyResult,
}

pub struct MockGateway {
    pub behavior: MockBehavior,
    pub delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockGateway {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_payment(
        &self,
        _amount: Decimal,
        idempotency_key: &str,
    ) -> Result<PaymentGatewayResult, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::AlwaysSuccess => {
                let id = format!("mock_pay_{}", uuid::Uuid::new_v4());
                Ok(PaymentGatewayResult {
                    redirect_url: Some(format!(
                        "https://checkout.mock.local/{}?key={}",
                        id, idempotency_key
                    )),
                    id: Some(id),
                    status: Some("CHECKOUT".to_string()),
                })
            }
            MockBehavior::Respond(result) => Ok(result.clone()),
            MockBehavior::Reject { status, body } => Err(GatewayError::CallFailed {
                status: *status,
                body: body.clone(),
            }),
            MockBehavior::Timeout(after) => Err(GatewayError::TimedOut(*after)),
            MockBehavior::Unreachable => {
                Err(GatewayError::Unavailable("mock connection refused".to_string()))
            }
            MockBehavior::EmptyResult => Err(GatewayError::InvalidResponse(
                "Invalid response from payment API".to_string(),
            )),
        }
    }
}
