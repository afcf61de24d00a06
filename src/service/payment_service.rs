use crate::domain::idempotency::IdempotencyRecord;
use crate::domain::payment::{
    FieldError, PaymentGatewayResult, PaymentRequest, SubmissionOutcome, MIN_AMOUNT,
};
use crate::error::{GatewayError, PaymentError, ProcessingFailure, StoreError};
use crate::gateways::PaymentGateway;
use crate::repo::idempotency_keys_repo::IdempotencyStore;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Clone)]
pub struct PaymentService {
    pub store: Arc<dyn IdempotencyStore>,
    pub gateway: Arc<dyn PaymentGateway>,
}

struct Checkout {
    payment_id: String,
    redirect_url: String,
    status: Option<String>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn IdempotencyStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { store, gateway }
    }

    pub fn generate_idempotency_key(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub async fn submit(&self, req: PaymentRequest) -> Result<SubmissionOutcome, PaymentError> {
        let (amount, key) = match validate_request(&req) {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::warn!("payment form validation failed: {:?}", errors);
                return Ok(SubmissionOutcome::Invalid(errors));
            }
        };

        tracing::info!("processing payment for amount: {} with key: {}", amount, key);

        if self.store.find_by_key(key).await.map_err(PaymentError::Store)?.is_some() {
            tracing::info!("payment already processed for key: {}, skipping", key);
            return Err(PaymentError::DuplicatePayment(key.to_string()));
        }

        let record = match self.store.insert(key).await {
            Ok(record) => record,
            Err(StoreError::DuplicateKey(_)) => {
                tracing::info!("idempotency key {} reserved concurrently, skipping", key);
                return Err(PaymentError::DuplicatePayment(key.to_string()));
            }
            Err(e) => return Err(failed(e.into())),
        };
        tracing::info!("created idempotency key: {}", key);

        match self.complete(record, amount).await {
            Ok(redirect_url) => {
                tracing::info!("payment processed successfully, redirecting to: {}", redirect_url);
                Ok(SubmissionOutcome::Redirect(redirect_url))
            }
            Err(cause) => Err(failed(cause)),
        }
    }

    async fn complete(
        &self,
        record: IdempotencyRecord,
        amount: Decimal,
    ) -> Result<String, ProcessingFailure> {
        let result = self.gateway.create_payment(amount, &record.key).await?;
        let checkout = into_checkout(result)?;

        self.store
            .attach_payment_id(&record, &checkout.payment_id)
            .await?;

        tracing::info!(
            "payment successful - id: {}, status: {}",
            checkout.payment_id,
            checkout.status.as_deref().unwrap_or("UNKNOWN")
        );
        Ok(checkout.redirect_url)
    }
}

fn validate_request(req: &PaymentRequest) -> Result<(Decimal, &str), Vec<FieldError>> {
    let mut errors = Vec::new();

    match req.amount {
        None => errors.push(FieldError::new("amount", "Amount is required")),
        Some(amount) if amount < MIN_AMOUNT => {
            errors.push(FieldError::new("amount", "Amount must be greater than 0"))
        }
        Some(_) => {}
    }
    if req.idempotency_key.is_none() {
        errors.push(FieldError::new("idempotencyKey", "Idempotency key is required"));
    }

    match (req.amount, req.idempotency_key.as_deref()) {
        (Some(amount), Some(key)) if errors.is_empty() => Ok((amount, key)),
        _ => Err(errors),
    }
}

fn into_checkout(result: PaymentGatewayResult) -> Result<Checkout, GatewayError> {
    let redirect_url = result
        .redirect_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            GatewayError::InvalidResponse("No redirect URL provided in API response".to_string())
        })?;
    let payment_id = result
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| GatewayError::InvalidResponse("No payment id provided in API response".to_string()))?;

    Ok(Checkout {
        payment_id,
        redirect_url,
        status: result.status,
    })
}

fn failed(cause: ProcessingFailure) -> PaymentError {
    let err = PaymentError::ProcessingFailed(cause);
    tracing::error!("{}", render_chain(&err));
    err
}

pub fn render_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
