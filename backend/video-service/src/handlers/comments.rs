/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::middleware::Actor;
use crate::models::{CommentId, ContentRequest, PaginationRequest, VideoId};
use crate::response;
use crate::services::CommentService;
use crate::AppState;

/// Paginated comments of a video, newest first
pub async fn list_video_comments(
    state: web::Data<AppState>,
    video_id: web::Path<String>,
    query: web::Query<PaginationRequest>,
) -> Result<HttpResponse> {
    let video_id = VideoId::parse(&video_id)?;
    let comments = CommentService::new(state.store.clone())
        .list_video_comments(video_id, &query, state.pagination_max_limit)
        .await?;
    Ok(response::ok("Comments fetched successfully", comments))
}

pub async fn add_comment(
    state: web::Data<AppState>,
    actor: Actor,
    video_id: web::Path<String>,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let video_id = VideoId::parse(&video_id)?;
    let comment = CommentService::new(state.store.clone())
        .add_comment(actor.id(), video_id, &req.content)
        .await?;
    Ok(response::created("Comment added successfully", comment))
}

pub async fn update_comment(
    state: web::Data<AppState>,
    actor: Actor,
    comment_id: web::Path<String>,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let comment_id = CommentId::parse(&comment_id)?;
    let comment = CommentService::new(state.store.clone())
        .update_comment(actor.id(), comment_id, &req.content)
        .await?;
    Ok(response::ok("Comment updated successfully", comment))
}

pub async fn delete_comment(
    state: web::Data<AppState>,
    actor: Actor,
    comment_id: web::Path<String>,
) -> Result<HttpResponse> {
    let comment_id = CommentId::parse(&comment_id)?;
    CommentService::new(state.store.clone())
        .delete_comment(actor.id(), comment_id)
        .await?;
    Ok(response::ok("Comment deleted successfully", serde_json::Value::Null))
}
