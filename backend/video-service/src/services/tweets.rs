/// Tweet service - short text posts
use crate::error::{AppError, Result};
use crate::models::{Tweet, TweetId, UserId};
use crate::repository::DynStore;
use crate::services::authz::load_owned;

pub struct TweetService {
    store: DynStore,
}

impl TweetService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    pub async fn create_tweet(&self, actor: UserId, content: &str) -> Result<Tweet> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Tweet content is required".to_string()));
        }
        let tweet = self.store.insert_tweet(actor, content).await?;
        tracing::info!(tweet_id = %tweet.id, actor = %actor, "tweet created");
        Ok(tweet)
    }

    /// Newest first. A user without tweets is reported as 404.
    pub async fn user_tweets(&self, owner: UserId) -> Result<Vec<Tweet>> {
        let tweets = self.store.list_user_tweets(owner).await?;
        if tweets.is_empty() {
            return Err(AppError::NotFound("No tweets found for this user".to_string()));
        }
        Ok(tweets)
    }

    #[tracing::instrument(skip(self, content), fields(actor = %actor, tweet_id = %id))]
    pub async fn update_tweet(&self, actor: UserId, id: TweetId, content: &str) -> Result<Tweet> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest(
                "Updated tweet content is required".to_string(),
            ));
        }
        load_owned(actor, "edit", self.store.find_tweet(id)).await?;

        self.store
            .update_tweet_content(id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(actor = %actor, tweet_id = %id))]
    pub async fn delete_tweet(&self, actor: UserId, id: TweetId) -> Result<()> {
        load_owned(actor, "delete", self.store.find_tweet(id)).await?;
        self.store.delete_tweet(id).await?;
        tracing::info!("tweet deleted");
        Ok(())
    }
}
