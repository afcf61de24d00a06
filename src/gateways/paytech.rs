use crate::config::GatewayConfig;
use crate::domain::payment::{PaymentApiRequest, PaymentApiResponse, PaymentGatewayResult};
use crate::error::GatewayError;
use crate::gateways::PaymentGateway;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use rust_decimal::Decimal;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

const INVALID_RESPONSE: &str = "Invalid response from payment API";

pub struct PaytechGateway {
    pub config: GatewayConfig,
    pub client: reqwest::Client,
}

impl PaytechGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for PaytechGateway {
    fn name(&self) -> &'static str {
        "paytech"
    }

    async fn create_payment(
        &self,
        amount: Decimal,
        idempotency_key: &str,
    ) -> Result<PaymentGatewayResult, GatewayError> {
        let body = PaymentApiRequest::deposit(amount);

        let resp = self
            .client
            .post(self.config.payments_url())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.bearer_token))
            .header(CONTENT_TYPE, "application/json")
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key)
            .json(&body)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => return Err(self.transport_error(e)),
                Err(e) => {
                    tracing::warn!("could not read payment API error body: {}", e);
                    String::new()
                }
            };
            tracing::error!(
                "payment API call failed with status: {} and body: {}",
                status.as_u16(),
                body
            );
            return Err(GatewayError::CallFailed {
                status: status.as_u16(),
                body,
            });
        }

        let raw = resp.bytes().await.map_err(|e| self.transport_error(e))?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(GatewayError::InvalidResponse(INVALID_RESPONSE.to_string()));
        }

        let parsed: PaymentApiResponse = serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!("unparsable payment API response: {}", e);
            GatewayError::InvalidResponse(INVALID_RESPONSE.to_string())
        })?;

        parsed
            .result
            .ok_or_else(|| GatewayError::InvalidResponse(INVALID_RESPONSE.to_string()))
    }
}

impl PaytechGateway {
    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            tracing::error!("payment API timed out after {:?}", self.config.timeout);
            GatewayError::TimedOut(self.config.timeout)
        } else {
            tracing::error!("payment API unreachable: {}", e);
            GatewayError::Unavailable(e.to_string())
        }
    }
}
