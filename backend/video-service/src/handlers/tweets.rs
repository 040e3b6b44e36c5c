/// Tweet handlers - HTTP endpoints for tweet operations
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::middleware::Actor;
use crate::models::{ContentRequest, TweetId, UserId};
use crate::response;
use crate::services::TweetService;
use crate::AppState;

pub async fn create_tweet(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let tweet = TweetService::new(state.store.clone())
        .create_tweet(actor.id(), &req.content)
        .await?;
    Ok(response::created("Tweet created successfully", tweet))
}

pub async fn get_user_tweets(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = UserId::parse(&user_id)?;
    let tweets = TweetService::new(state.store.clone())
        .user_tweets(user_id)
        .await?;
    Ok(response::ok("User tweets fetched successfully", tweets))
}

pub async fn update_tweet(
    state: web::Data<AppState>,
    actor: Actor,
    tweet_id: web::Path<String>,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let tweet_id = TweetId::parse(&tweet_id)?;
    let tweet = TweetService::new(state.store.clone())
        .update_tweet(actor.id(), tweet_id, &req.content)
        .await?;
    Ok(response::ok("Tweet updated successfully", tweet))
}

pub async fn delete_tweet(
    state: web::Data<AppState>,
    actor: Actor,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse> {
    let tweet_id = TweetId::parse(&tweet_id)?;
    TweetService::new(state.store.clone())
        .delete_tweet(actor.id(), tweet_id)
        .await?;
    Ok(response::ok("Tweet deleted successfully", serde_json::Value::Null))
}
