use async_trait::async_trait;
use uuid::Uuid;

use super::{map_insert_error, PgStore};
use crate::models::{NewVideo, UserId, Video, VideoChanges, VideoId, VideoSummary};
use crate::repository::{StoreResult, VideoRepository};

const VIDEO_COLUMNS: &str = "id, owner_id, title, description, duration, video_file, thumbnail, \
                             views, is_published, created_at, updated_at";

#[async_trait]
impl VideoRepository for PgStore {
    async fn insert_video(&self, video: NewVideo) -> StoreResult<Video> {
        let sql = format!(
            r#"
            INSERT INTO videos (id, owner_id, title, description, duration, video_file, thumbnail)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {VIDEO_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Video>(&sql)
            .bind(VideoId::new())
            .bind(video.owner)
            .bind(&video.title)
            .bind(&video.description)
            .bind(video.duration)
            .bind(&video.video_file)
            .bind(&video.thumbnail)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        Ok(created)
    }

    async fn find_video(&self, id: VideoId) -> StoreResult<Option<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn record_view(&self, id: VideoId) -> StoreResult<Option<Video>> {
        let sql = format!(
            r#"
            UPDATE videos
            SET views = views + 1
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );
        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn list_published_videos(&self) -> StoreResult<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE is_published ORDER BY created_at DESC, id DESC"
        );
        let videos = sqlx::query_as::<_, Video>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn list_channel_videos(&self, owner: UserId) -> StoreResult<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let videos = sqlx::query_as::<_, Video>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn video_summaries(&self, ids: &[VideoId]) -> StoreResult<Vec<VideoSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = ids.iter().map(VideoId::as_uuid).collect();

        let summaries = sqlx::query_as::<_, VideoSummary>(
            r#"
            SELECT id, title, thumbnail, duration
            FROM videos
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn update_video(
        &self,
        id: VideoId,
        changes: &VideoChanges,
    ) -> StoreResult<Option<Video>> {
        let sql = format!(
            r#"
            UPDATE videos
            SET title = COALESCE(NULLIF(BTRIM($2), ''), title),
                description = COALESCE(NULLIF(BTRIM($3), ''), description),
                is_published = COALESCE($4, is_published),
                thumbnail = COALESCE($5, thumbnail),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );
        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .bind(changes.title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.is_published)
            .bind(changes.thumbnail.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn delete_video(&self, id: VideoId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
