// Persistence for roadmap progress documents, keyed by the provider subject.
// The document is replaced wholesale on save and cleared in place on delete.

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::roadmap::RoadmapProgressData;

#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<RoadmapProgressData>, AppError>;
    async fn save(&self, user_id: &str, data: &RoadmapProgressData) -> Result<(), AppError>;
    async fn delete(&self, user_id: &str) -> Result<(), AppError>;
}

pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn load(&self, user_id: &str) -> Result<Option<RoadmapProgressData>, AppError> {
        let row: Option<Option<serde_json::Value>> =
            sqlx::query_scalar("SELECT roadmap_progress FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        match row.flatten() {
            Some(value) => {
                let data = serde_json::from_value(value).map_err(|e| {
                    AppError::Internal(anyhow!(
                        "Stored roadmap progress for user {user_id} is malformed: {e}"
                    ))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: &str, data: &RoadmapProgressData) -> Result<(), AppError> {
        let document = serde_json::to_value(data).map_err(|e| {
            AppError::Internal(anyhow!("Failed to serialize roadmap progress: {e}"))
        })?;

        sqlx::query(
            "INSERT INTO users (id, roadmap_progress) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE
             SET roadmap_progress = EXCLUDED.roadmap_progress, updated_at = now()",
        )
        .bind(user_id)
        .bind(document)
        .execute(&self.pool)
        .await?;

        info!("Saved roadmap progress for user {user_id}");
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<(), AppError> {
        // Clearing the field for a user with no row is a no-op, not an error.
        sqlx::query("UPDATE users SET roadmap_progress = NULL, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        info!("Deleted roadmap progress for user {user_id}");
        Ok(())
    }
}

/// Store backed by a map. Lets tests drive save/resume/delete without Postgres.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryProgressStore {
    documents: tokio::sync::RwLock<std::collections::HashMap<String, RoadmapProgressData>>,
}

#[cfg(test)]
#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn load(&self, user_id: &str) -> Result<Option<RoadmapProgressData>, AppError> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, data: &RoadmapProgressData) -> Result<(), AppError> {
        self.documents
            .write()
            .await
            .insert(user_id.to_string(), data.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<(), AppError> {
        self.documents.write().await.remove(user_id);
        Ok(())
    }
}
