use crate::domain::idempotency::IdempotencyRecord;
use crate::error::StoreError;
use crate::repo::idempotency_keys_repo::IdempotencyStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store with the same uniqueness rules as the Postgres table.
/// Only correct within a single process.
#[derive(Default, Clone)]
pub struct InMemoryIdempotencyStore {
    records: Arc<RwLock<HashMap<String, IdempotencyRecord>>>,
}

impl InMemoryIdempotencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl IdempotencyStore for InMemoryIdempotencyStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<IdempotencyRecord>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn insert(&self, key: &str) -> Result<IdempotencyRecord, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(key) {
            return Err(StoreError::DuplicateKey(key.to_string()));
        }
        let record = IdempotencyRecord::reserve(key);
        records.insert(key.to_string(), record.clone());
        Ok(record)
    }

    async fn attach_payment_id(
        &self,
        record: &IdempotencyRecord,
        payment_id: &str,
    ) -> Result<IdempotencyRecord, StoreError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&record.key)
            .ok_or_else(|| StoreError::NotFound(record.key.clone()))?;

        match stored.payment_id.as_deref() {
            Some(existing) if existing != payment_id => Err(StoreError::PaymentIdConflict {
                key: record.key.clone(),
                existing: existing.to_string(),
            }),
            _ => {
                stored.payment_id = Some(payment_id.to_string());
                Ok(stored.clone())
            }
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
