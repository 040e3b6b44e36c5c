use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{map_insert_error, PgStore};
use crate::models::{
    Comment, CommentId, CommentWithOwner, PageWindow, UserId, UserProfile, VideoId,
};
use crate::repository::{CommentRepository, StoreResult};

#[derive(sqlx::FromRow)]
struct CommentOwnerRow {
    id: CommentId,
    content: String,
    video_id: VideoId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_id: UserId,
    owner_username: String,
    owner_full_name: String,
    owner_avatar: Option<String>,
}

impl From<CommentOwnerRow> for CommentWithOwner {
    fn from(row: CommentOwnerRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            video_id: row.video_id,
            owner: UserProfile {
                id: row.owner_id,
                username: row.owner_username,
                full_name: row.owner_full_name,
                avatar: row.owner_avatar,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CommentRepository for PgStore {
    async fn insert_comment(
        &self,
        video_id: VideoId,
        owner: UserId,
        content: &str,
    ) -> StoreResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, content, video_id, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, video_id, owner_id, created_at, updated_at
            "#,
        )
        .bind(CommentId::new())
        .bind(content)
        .bind(video_id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(comment)
    }

    async fn find_comment(&self, id: CommentId) -> StoreResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, video_id, owner_id, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn update_comment_content(
        &self,
        id: CommentId,
        content: &str,
    ) -> StoreResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, content, video_id, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete_comment(&self, id: CommentId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_video_comments(
        &self,
        video_id: VideoId,
        window: PageWindow,
    ) -> StoreResult<(Vec<CommentWithOwner>, i64)> {
        // Inner join: comments whose author is unknown drop out of both the
        // page and the total.
        let rows = sqlx::query_as::<_, CommentOwnerRow>(
            r#"
            SELECT c.id, c.content, c.video_id, c.created_at, c.updated_at,
                   u.id AS owner_id, u.username AS owner_username,
                   u.full_name AS owner_full_name, u.avatar AS owner_avatar
            FROM comments c
            INNER JOIN users u ON u.id = c.owner_id
            WHERE c.video_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(video_id)
        .bind(window.limit)
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM comments c
            INNER JOIN users u ON u.id = c.owner_id
            WHERE c.video_id = $1
            "#,
        )
        .bind(video_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(CommentWithOwner::from).collect(), total))
    }
}
