use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder, Row};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::db::error::StoreError;
use crate::db::store::{Collection, Condition, DocumentStore, Filter};

/// Document store on a single Postgres `documents` table with JSONB bodies.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("DATABASE_URL is not configured".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections.unwrap_or(10))
            .min_connections(config.min_connections.unwrap_or(1))
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        info!("Connected to Postgres document store");
        Ok(Self { pool })
    }
}

fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for condition in filter.conditions() {
        match condition {
            Condition::Eq(field, value) => {
                builder.push(" AND COALESCE(body -> ");
                builder.push_bind(field.clone());
                builder.push(", 'null'::jsonb) = ");
                builder.push_bind(Json(value.clone()));
            }
            Condition::In(field, values) => {
                if values.is_empty() {
                    builder.push(" AND FALSE");
                    continue;
                }
                builder.push(" AND (");
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        builder.push(" OR ");
                    }
                    builder.push("COALESCE(body -> ");
                    builder.push_bind(field.clone());
                    builder.push(", 'null'::jsonb) = ");
                    builder.push_bind(Json(value.clone()));
                }
                builder.push(")");
            }
            Condition::Gte(field, bound) => push_range(builder, field, ">=", bound),
            Condition::Lt(field, bound) => push_range(builder, field, "<", bound),
        }
    }
}

fn push_range(builder: &mut QueryBuilder<'_, Postgres>, field: &str, op: &str, bound: &Value) {
    match bound {
        Value::Number(number) => {
            builder.push(" AND jsonb_typeof(body -> ");
            builder.push_bind(field.to_string());
            builder.push(") = 'number' AND (body ->> ");
            builder.push_bind(field.to_string());
            builder.push(")::double precision ");
            builder.push(op);
            builder.push(" ");
            builder.push_bind(number.as_f64().unwrap_or(0.0));
        }
        Value::String(text) => {
            builder.push(" AND jsonb_typeof(body -> ");
            builder.push_bind(field.to_string());
            builder.push(") = 'string' AND (body ->> ");
            builder.push_bind(field.to_string());
            builder.push(") COLLATE \"C\" ");
            builder.push(op);
            builder.push(" ");
            builder.push_bind(text.clone());
        }
        // Mirrors the in-memory semantics: mixed types never match.
        _ => {
            builder.push(" AND FALSE");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT body FROM documents WHERE collection = ");
        builder.push_bind(collection.name());
        push_conditions(&mut builder, filter);
        builder.push(" ORDER BY seq ASC");

        debug!(collection = collection.name(), "find: {}", builder.sql());

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|row| {
                row.try_get::<Json<Value>, _>("body")
                    .map(|Json(body)| body)
                    .map_err(StoreError::from)
            })
            .collect()
    }

    async fn insert(
        &self,
        collection: Collection,
        id: Uuid,
        document: Value,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Duplicate {
                collection: collection.name(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Value,
    ) -> Result<bool, StoreError> {
        if !changes.is_object() {
            return Err(StoreError::Encode(
                "update changes must be a JSON object".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = body || $1, updated_at = NOW()
            WHERE collection = $2 AND id = $3
            "#,
        )
        .bind(Json(changes))
        .bind(collection.name())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM documents WHERE collection = ");
        builder.push_bind(collection.name());
        push_conditions(&mut builder, filter);

        let row = builder.build().fetch_one(&self.pool).await?;
        let total: i64 = row.try_get("total")?;
        Ok(total.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
