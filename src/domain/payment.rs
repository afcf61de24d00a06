use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: Option<Decimal>,
    pub idempotency_key: Option<String>,
}

impl PaymentRequest {
    pub fn new(amount: Decimal, idempotency_key: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            idempotency_key: Some(idempotency_key.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentForm {
    pub amount: Option<String>,
    #[serde(rename = "idempotencyKey")]
    pub idempotency_key: Option<String>,
}

impl PaymentForm {
    pub fn into_request(self) -> Result<PaymentRequest, Vec<FieldError>> {
        let amount = match self.amount.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match Decimal::from_str(raw) {
                Ok(v) => Some(v),
                Err(_) => return Err(vec![FieldError::new("amount", "Amount must be a number")]),
            },
        };

        Ok(PaymentRequest {
            amount,
            idempotency_key: self.idempotency_key,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Deposit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Currency {
    Eur,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub reference_id: String,
}

impl CustomerInfo {
    pub fn placeholder() -> Self {
        Self {
            email: "customer@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Sweet-Escott".to_string(),
            reference_id: format!("CUST-{}", chrono::Utc::now().timestamp_millis()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentApiRequest {
    pub payment_type: PaymentType,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub currency: Currency,
    pub customer: CustomerInfo,
}

impl PaymentApiRequest {
    pub fn deposit(amount: Decimal) -> Self {
        Self {
            payment_type: PaymentType::Deposit,
            amount,
            currency: Currency::Eur,
            customer: CustomerInfo::placeholder(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentApiResponse {
    pub timestamp: Option<String>,
    pub status: Option<i32>,
    pub result: Option<PaymentGatewayResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentGatewayResult {
    pub id: Option<String>,
    pub redirect_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Redirect(String),
    Invalid(Vec<FieldError>),
}
