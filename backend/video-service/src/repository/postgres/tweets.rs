use async_trait::async_trait;

use super::{map_insert_error, PgStore};
use crate::models::{Tweet, TweetId, UserId};
use crate::repository::{StoreResult, TweetRepository};

#[async_trait]
impl TweetRepository for PgStore {
    async fn insert_tweet(&self, owner: UserId, content: &str) -> StoreResult<Tweet> {
        let tweet = sqlx::query_as::<_, Tweet>(
            r#"
            INSERT INTO tweets (id, content, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, owner_id, created_at, updated_at
            "#,
        )
        .bind(TweetId::new())
        .bind(content)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(tweet)
    }

    async fn find_tweet(&self, id: TweetId) -> StoreResult<Option<Tweet>> {
        let tweet = sqlx::query_as::<_, Tweet>(
            "SELECT id, content, owner_id, created_at, updated_at FROM tweets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tweet)
    }

    async fn list_user_tweets(&self, owner: UserId) -> StoreResult<Vec<Tweet>> {
        let tweets = sqlx::query_as::<_, Tweet>(
            r#"
            SELECT id, content, owner_id, created_at, updated_at
            FROM tweets
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }

    async fn update_tweet_content(
        &self,
        id: TweetId,
        content: &str,
    ) -> StoreResult<Option<Tweet>> {
        let tweet = sqlx::query_as::<_, Tweet>(
            r#"
            UPDATE tweets
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, content, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tweet)
    }

    async fn delete_tweet(&self, id: TweetId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
