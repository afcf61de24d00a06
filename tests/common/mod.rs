#![allow(dead_code)]

use payment_checkout::domain::idempotency::IdempotencyRecord;
use payment_checkout::domain::payment::PaymentGatewayResult;
use payment_checkout::error::StoreError;
use payment_checkout::gateways::mock::{MockBehavior, MockGateway};
use payment_checkout::repo::idempotency_keys_repo::IdempotencyStore;
use payment_checkout::repo::in_memory::InMemoryIdempotencyStore;
use payment_checkout::service::payment_service::PaymentService;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryIdempotencyStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IdempotencyStore for CountingStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<IdempotencyRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_key(key).await
    }

    async fn insert(&self, key: &str) -> Result<IdempotencyRecord, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(key).await
    }

    async fn attach_payment_id(
        &self,
        record: &IdempotencyRecord,
        payment_id: &str,
    ) -> Result<IdempotencyRecord, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.attach_payment_id(record, payment_id).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }
}

/// Lookup always misses and insert always loses, as when another instance
/// commits the same key between the two calls.
pub struct LosingRaceStore;

#[async_trait::async_trait]
impl IdempotencyStore for LosingRaceStore {
    async fn find_by_key(&self, _key: &str) -> Result<Option<IdempotencyRecord>, StoreError> {
        Ok(None)
    }

    async fn insert(&self, key: &str) -> Result<IdempotencyRecord, StoreError> {
        Err(StoreError::DuplicateKey(key.to_string()))
    }

    async fn attach_payment_id(
        &self,
        record: &IdempotencyRecord,
        _payment_id: &str,
    ) -> Result<IdempotencyRecord, StoreError> {
        Err(StoreError::NotFound(record.key.clone()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub fn checkout(id: &str, redirect: Option<&str>) -> MockBehavior {
    MockBehavior::Respond(PaymentGatewayResult {
        id: Some(id.to_string()),
        redirect_url: redirect.map(str::to_string),
        status: Some("CHECKOUT".to_string()),
    })
}

pub fn service_with(
    behavior: MockBehavior,
) -> (PaymentService, Arc<CountingStore>, Arc<MockGateway>) {
    let store = Arc::new(CountingStore::default());
    let gateway = Arc::new(MockGateway::new(behavior));
    let service = PaymentService::new(store.clone(), gateway.clone());
    (service, store, gateway)
}
