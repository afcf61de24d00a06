use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("idempotency key already exists: {0}")]
    DuplicateKey(String),
    #[error("no idempotency record for key: {0}")]
    NotFound(String),
    #[error("idempotency key {key} is already linked to payment {existing}")]
    PaymentIdConflict { key: String, existing: String },
    #[error("idempotency store query failed: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment API call failed with status {status}")]
    CallFailed { status: u16, body: String },
    #[error("payment API did not respond within {0:?}")]
    TimedOut(Duration),
    #[error("payment API unreachable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ProcessingFailure {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment with idempotency key {0:?} has already been processed")]
    DuplicatePayment(String),
    #[error("payment processing failed: {0}")]
    ProcessingFailed(#[source] ProcessingFailure),
    #[error("idempotency lookup failed: {0}")]
    Store(#[source] StoreError),
}

impl PaymentError {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::DuplicatePayment(_) => "DUPLICATE_PAYMENT",
            PaymentError::ProcessingFailed(_) => "PAYMENT_PROCESSING_FAILED",
            PaymentError::Store(_) => "INTERNAL_ERROR",
        }
    }

    pub fn response_body(&self) -> Option<&str> {
        match self {
            PaymentError::ProcessingFailed(ProcessingFailure::Gateway(GatewayError::CallFailed {
                body,
                ..
            })) => Some(body.as_str()),
            _ => None,
        }
    }
}
