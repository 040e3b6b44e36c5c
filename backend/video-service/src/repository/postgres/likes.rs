use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{map_insert_error, PgStore};
use crate::models::{Like, LikeId, LikeTarget, LikedVideo, TargetKind, UserId};
use crate::repository::{LikeRepository, StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct LikeRow {
    id: LikeId,
    liked_by: UserId,
    target_kind: String,
    target_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<LikeRow> for Like {
    type Error = StoreError;

    fn try_from(row: LikeRow) -> Result<Self, Self::Error> {
        let kind = TargetKind::parse(&row.target_kind).ok_or_else(|| {
            StoreError::Corrupt(format!(
                "like {} has unknown target kind '{}'",
                row.id, row.target_kind
            ))
        })?;

        Ok(Like {
            id: row.id,
            liked_by: row.liked_by,
            target: LikeTarget::from_parts(kind, row.target_id),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl LikeRepository for PgStore {
    async fn find_like(&self, liker: UserId, target: LikeTarget) -> StoreResult<Option<Like>> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT id, liked_by, target_kind, target_id, created_at
            FROM likes
            WHERE liked_by = $1 AND target_kind = $2 AND target_id = $3
            "#,
        )
        .bind(liker)
        .bind(target.kind().as_str())
        .bind(target.target_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Like::try_from).transpose()
    }

    async fn insert_like(&self, liker: UserId, target: LikeTarget) -> StoreResult<Like> {
        // Plain INSERT: the unique constraint is the authority on duplicates.
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            INSERT INTO likes (id, liked_by, target_kind, target_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, liked_by, target_kind, target_id, created_at
            "#,
        )
        .bind(LikeId::new())
        .bind(liker)
        .bind(target.kind().as_str())
        .bind(target.target_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Like::try_from(row)
    }

    async fn delete_like(&self, id: LikeId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_liked_videos(&self, liker: UserId) -> StoreResult<Vec<LikedVideo>> {
        let liked = sqlx::query_as::<_, LikedVideo>(
            r#"
            SELECT l.id AS like_id, l.created_at AS liked_at,
                   v.id AS video_id, v.title, v.thumbnail,
                   v.owner_id, u.username AS owner_username, u.avatar AS owner_avatar
            FROM likes l
            INNER JOIN videos v ON v.id = l.target_id
            LEFT JOIN users u ON u.id = v.owner_id
            WHERE l.liked_by = $1 AND l.target_kind = 'video'
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .bind(liker)
        .fetch_all(&self.pool)
        .await?;

        Ok(liked)
    }
}
