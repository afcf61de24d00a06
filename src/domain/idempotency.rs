use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdempotencyRecord {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub payment_id: Option<String>,
}

impl IdempotencyRecord {
    pub fn reserve(key: &str) -> Self {
        Self {
            key: key.to_string(),
            created_at: Utc::now(),
            payment_id: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.payment_id.is_some()
    }
}
