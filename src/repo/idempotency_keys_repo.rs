use crate::domain::idempotency::IdempotencyRecord;
use crate::error::StoreError;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[async_trait::async_trait]
pub trait IdempotencyStore: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<IdempotencyRecord>, StoreError>;

    /// Fails with [`StoreError::DuplicateKey`] when the key is already recorded,
    /// including when a concurrent insert wins between lookup and insert.
    async fn insert(&self, key: &str) -> Result<IdempotencyRecord, StoreError>;

    async fn attach_payment_id(
        &self,
        record: &IdempotencyRecord,
        payment_id: &str,
    ) -> Result<IdempotencyRecord, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct IdempotencyKeysRepo {
    pub pool: PgPool,
}

fn to_record(r: &PgRow) -> IdempotencyRecord {
    IdempotencyRecord {
        key: r.get("key_value"),
        created_at: r.get("created_at"),
        payment_id: r.get("payment_id"),
    }
}

#[async_trait::async_trait]
impl IdempotencyStore for IdempotencyKeysRepo {
    async fn find_by_key(&self, key: &str) -> Result<Option<IdempotencyRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT key_value, created_at, payment_id FROM idempotency_keys WHERE key_value = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(to_record))
    }

    async fn insert(&self, key: &str) -> Result<IdempotencyRecord, StoreError> {
        let record = IdempotencyRecord::reserve(key);
        let inserted = sqlx::query(
            r#"
            INSERT INTO idempotency_keys (key_value, created_at, payment_id)
            VALUES ($1, $2, NULL)
            RETURNING key_value, created_at, payment_id
            "#,
        )
        .bind(&record.key)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(to_record(&row)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateKey(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn attach_payment_id(
        &self,
        record: &IdempotencyRecord,
        payment_id: &str,
    ) -> Result<IdempotencyRecord, StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE idempotency_keys
            SET payment_id = $2
            WHERE key_value = $1 AND (payment_id IS NULL OR payment_id = $2)
            RETURNING key_value, created_at, payment_id
            "#,
        )
        .bind(&record.key)
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = updated {
            return Ok(to_record(&row));
        }

        match self.find_by_key(&record.key).await? {
            Some(existing) => Err(StoreError::PaymentIdConflict {
                key: record.key.clone(),
                existing: existing.payment_id.unwrap_or_default(),
            }),
            None => Err(StoreError::NotFound(record.key.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
