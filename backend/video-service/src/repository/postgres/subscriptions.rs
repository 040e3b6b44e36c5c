use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{map_insert_error, PgStore};
use crate::models::{Subscription, SubscriptionEdge, SubscriptionId, UserId, UserProfile};
use crate::repository::{StoreResult, SubscriptionRepository};

#[derive(sqlx::FromRow)]
struct EdgeRow {
    subscription_id: SubscriptionId,
    subscribed_at: DateTime<Utc>,
    user_id: UserId,
    username: String,
    full_name: String,
    avatar: Option<String>,
}

impl From<EdgeRow> for SubscriptionEdge {
    fn from(row: EdgeRow) -> Self {
        Self {
            subscription_id: row.subscription_id,
            user: UserProfile {
                id: row.user_id,
                username: row.username,
                full_name: row.full_name,
                avatar: row.avatar,
            },
            subscribed_at: row.subscribed_at,
        }
    }
}

#[async_trait]
impl SubscriptionRepository for PgStore {
    async fn find_subscription(
        &self,
        subscriber: UserId,
        channel: UserId,
    ) -> StoreResult<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id, subscriber_id, channel_id, created_at
            FROM subscriptions
            WHERE subscriber_id = $1 AND channel_id = $2
            "#,
        )
        .bind(subscriber)
        .bind(channel)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    async fn insert_subscription(
        &self,
        subscriber: UserId,
        channel: UserId,
    ) -> StoreResult<Subscription> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (id, subscriber_id, channel_id)
            VALUES ($1, $2, $3)
            RETURNING id, subscriber_id, channel_id, created_at
            "#,
        )
        .bind(SubscriptionId::new())
        .bind(subscriber)
        .bind(channel)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(subscription)
    }

    async fn delete_subscription(&self, id: SubscriptionId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_channel_subscribers(&self, channel: UserId) -> StoreResult<Vec<SubscriptionEdge>> {
        let rows = sqlx::query_as::<_, EdgeRow>(
            r#"
            SELECT s.id AS subscription_id, s.created_at AS subscribed_at,
                   u.id AS user_id, u.username, u.full_name, u.avatar
            FROM subscriptions s
            INNER JOIN users u ON u.id = s.subscriber_id
            WHERE s.channel_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(channel)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubscriptionEdge::from).collect())
    }

    async fn list_subscribed_channels(
        &self,
        subscriber: UserId,
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        let rows = sqlx::query_as::<_, EdgeRow>(
            r#"
            SELECT s.id AS subscription_id, s.created_at AS subscribed_at,
                   u.id AS user_id, u.username, u.full_name, u.avatar
            FROM subscriptions s
            INNER JOIN users u ON u.id = s.channel_id
            WHERE s.subscriber_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(subscriber)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubscriptionEdge::from).collect())
    }
}
