use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::models::{UserId, UserProfile};
use crate::repository::{StoreResult, UserRepository};

#[async_trait]
impl UserRepository for PgStore {
    async fn find_profile(&self, id: UserId) -> StoreResult<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, full_name, avatar
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn find_profiles(&self, ids: &[UserId]) -> StoreResult<Vec<UserProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = ids.iter().map(UserId::as_uuid).collect();

        let profiles = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, full_name, avatar
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }
}
