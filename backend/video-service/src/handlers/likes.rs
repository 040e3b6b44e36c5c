/// Like handlers - one toggle endpoint per target kind
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::Result;
use crate::middleware::Actor;
use crate::models::{CommentId, LikeTarget, TweetId, VideoId};
use crate::response;
use crate::services::{LikeService, Toggled};
use crate::AppState;

async fn toggle(state: &AppState, actor: Actor, target: LikeTarget) -> Result<HttpResponse> {
    let noun = match target {
        LikeTarget::Video(_) => "Video",
        LikeTarget::Comment(_) => "Comment",
        LikeTarget::Tweet(_) => "Tweet",
    };

    match LikeService::new(state.store.clone())
        .toggle_like(actor.id(), target)
        .await?
    {
        Toggled::Added(like) => Ok(response::created(
            format!("{} liked successfully", noun),
            json!({ "state": "added", "like": like }),
        )),
        Toggled::Removed => Ok(response::ok(
            format!("{} unliked successfully", noun),
            json!({ "state": "removed" }),
        )),
    }
}

pub async fn toggle_video_like(
    state: web::Data<AppState>,
    actor: Actor,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let target = LikeTarget::Video(VideoId::parse(&video_id)?);
    toggle(&state, actor, target).await
}

pub async fn toggle_comment_like(
    state: web::Data<AppState>,
    actor: Actor,
    comment_id: web::Path<String>,
) -> Result<HttpResponse> {
    let target = LikeTarget::Comment(CommentId::parse(&comment_id)?);
    toggle(&state, actor, target).await
}

pub async fn toggle_tweet_like(
    state: web::Data<AppState>,
    actor: Actor,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse> {
    let target = LikeTarget::Tweet(TweetId::parse(&tweet_id)?);
    toggle(&state, actor, target).await
}

/// Videos the caller has liked
pub async fn liked_videos(state: web::Data<AppState>, actor: Actor) -> Result<HttpResponse> {
    let videos = LikeService::new(state.store.clone())
        .liked_videos(actor.id())
        .await?;
    Ok(response::ok("Liked videos fetched successfully", videos))
}
