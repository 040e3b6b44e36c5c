use async_trait::async_trait;

use super::PgStore;
use crate::models::UserId;
use crate::repository::{ChannelStatsRepository, StoreResult};

#[async_trait]
impl ChannelStatsRepository for PgStore {
    async fn count_channel_videos(&self, channel: UserId) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE owner_id = $1")
            .bind(channel)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn sum_channel_views(&self, channel: UserId) -> StoreResult<i64> {
        // SUM(BIGINT) is NUMERIC in Postgres; cast back and default to zero.
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(views), 0)::BIGINT FROM videos WHERE owner_id = $1",
        )
        .bind(channel)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn count_channel_subscribers(&self, channel: UserId) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1")
                .bind(channel)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_channel_video_likes(&self, channel: UserId) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM likes l
            INNER JOIN videos v ON v.id = l.target_id
            WHERE l.target_kind = 'video' AND v.owner_id = $1
            "#,
        )
        .bind(channel)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
