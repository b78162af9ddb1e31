//! PostgreSQL implementation of the hook store.
//!
//! The `web_hooks` table carries a unique index on `endpoint_url`; a
//! unique-violation at commit time is translated into
//! [`GatewayError::DuplicateEndpoint`] so racing registrations surface
//! the same error as pre-write validation. Headers and delivery records
//! are foreign-keyed with `ON DELETE CASCADE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::store::HookStore;
use crate::domain::{DeliveryRecord, HookEventType, HookHeader, HookId, HookSummary, WebHook};
use crate::error::GatewayError;

/// PostgreSQL-backed [`HookStore`] using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresHookStore {
    pool: PgPool,
}

impl PostgresHookStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps an insert-time database error, turning a uniqueness conflict on
/// the endpoint URL into the same error shape validation produces.
fn translate_insert_error(e: sqlx::Error, url: &str) -> GatewayError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            GatewayError::DuplicateEndpoint(url.to_string())
        }
        _ => GatewayError::Storage(e.to_string()),
    }
}

fn storage(e: sqlx::Error) -> GatewayError {
    GatewayError::Storage(e.to_string())
}

fn encode_event_types(hook: &WebHook) -> Vec<String> {
    hook.event_types
        .iter()
        .map(|t| t.as_str().to_string())
        .collect()
}

fn decode_event_types(raw: Vec<String>) -> impl Iterator<Item = HookEventType> {
    raw.into_iter().filter_map(|s| HookEventType::parse(&s))
}

#[async_trait]
impl HookStore for PostgresHookStore {
    async fn insert(&self, hook: WebHook) -> Result<WebHook, GatewayError> {
        // Single statement, single transaction: the row plus its (empty)
        // child collections commit or fail as one unit.
        sqlx::query(
            "INSERT INTO web_hooks \
             (id, endpoint_url, secret, content_type, is_active, event_types, created_at, last_modified_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(hook.id.as_uuid())
        .bind(&hook.endpoint_url)
        .bind(&hook.secret)
        .bind(&hook.content_type)
        .bind(hook.is_active)
        .bind(encode_event_types(&hook))
        .bind(hook.created_at)
        .bind(hook.last_modified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| translate_insert_error(e, &hook.endpoint_url))?;

        Ok(hook)
    }

    async fn get(&self, id: HookId) -> Result<WebHook, GatewayError> {
        let row = sqlx::query_as::<
            _,
            (
                Uuid,
                String,
                Option<String>,
                String,
                bool,
                Vec<String>,
                DateTime<Utc>,
                DateTime<Utc>,
            ),
        >(
            "SELECT id, endpoint_url, secret, content_type, is_active, event_types, \
             created_at, last_modified_at FROM web_hooks WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?
        .ok_or(GatewayError::HookNotFound(*id.as_uuid()))?;

        let headers = sqlx::query_as::<_, (String, String)>(
            "SELECT name, value FROM hook_headers WHERE hook_id = $1 ORDER BY position ASC",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let (
            row_id,
            endpoint_url,
            secret,
            content_type,
            is_active,
            event_types,
            created_at,
            last_modified_at,
        ) = row;

        Ok(WebHook {
            id: HookId::from_uuid(row_id),
            endpoint_url,
            secret,
            content_type,
            is_active,
            event_types: decode_event_types(event_types).collect(),
            headers: headers
                .into_iter()
                .map(|(name, value)| HookHeader { name, value })
                .collect(),
            created_at,
            last_modified_at,
        })
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool, GatewayError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM web_hooks WHERE endpoint_url = $1)")
            .bind(url)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }

    async fn count(&self) -> Result<u64, GatewayError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM web_hooks")
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list(&self) -> Result<Vec<HookSummary>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, String, bool, Vec<String>, DateTime<Utc>)>(
            "SELECT id, endpoint_url, is_active, event_types, created_at \
             FROM web_hooks ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(
                |(id, endpoint_url, is_active, event_types, created_at)| HookSummary {
                    id: HookId::from_uuid(id),
                    endpoint_url,
                    is_active,
                    event_type_count: decode_event_types(event_types).count(),
                    created_at,
                },
            )
            .collect())
    }

    async fn remove(&self, id: HookId) -> Result<(), GatewayError> {
        // Headers and delivery records go with the row via FK cascade.
        let result = sqlx::query("DELETE FROM web_hooks WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::HookNotFound(*id.as_uuid()));
        }
        Ok(())
    }

    async fn append_delivery(&self, record: DeliveryRecord) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO delivery_records (hook_id, status_code, success, error, attempted_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.hook_id.as_uuid())
        .bind(record.status_code.map(i32::from))
        .bind(record.success)
        .bind(&record.error)
        .bind(record.attempted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                GatewayError::HookNotFound(*record.hook_id.as_uuid())
            }
            _ => GatewayError::Storage(e.to_string()),
        })?;
        Ok(())
    }

    async fn deliveries(&self, id: HookId) -> Result<Vec<DeliveryRecord>, GatewayError> {
        let exists = self.exists_hook(id).await?;
        if !exists {
            return Err(GatewayError::HookNotFound(*id.as_uuid()));
        }

        let rows = sqlx::query_as::<_, (Uuid, Option<i32>, bool, Option<String>, DateTime<Utc>)>(
            "SELECT hook_id, status_code, success, error, attempted_at \
             FROM delivery_records WHERE hook_id = $1 ORDER BY attempted_at ASC, id ASC",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(
                |(hook_id, status_code, success, error, attempted_at)| DeliveryRecord {
                    hook_id: HookId::from_uuid(hook_id),
                    status_code: status_code.and_then(|c| u16::try_from(c).ok()),
                    success,
                    error,
                    attempted_at,
                },
            )
            .collect())
    }
}

impl PostgresHookStore {
    async fn exists_hook(&self, id: HookId) -> Result<bool, GatewayError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM web_hooks WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }
}
