/// Video handlers - HTTP endpoints for video operations
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::handlers::multipart::{parse_flag, read_form};
use crate::media::MediaKind;
use crate::middleware::Actor;
use crate::models::VideoId;
use crate::response;
use crate::services::{VideoService, VideoUpdate, VideoUpload};
use crate::AppState;

fn service(state: &AppState) -> VideoService {
    VideoService::new(state.store.clone(), state.media.clone())
}

/// List published videos
pub async fn list_videos(state: web::Data<AppState>) -> Result<HttpResponse> {
    let videos = service(&state).list_published().await?;
    Ok(response::ok("All published videos fetched successfully", videos))
}

/// Fetch one video; counts as a view
pub async fn get_video(
    state: web::Data<AppState>,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = VideoId::parse(&video_id)?;
    let video = service(&state).get_video(id).await?;
    Ok(response::ok("Video fetched successfully", video))
}

/// Upload a video and its thumbnail
pub async fn upload_video(
    state: web::Data<AppState>,
    actor: Actor,
    payload: Multipart,
) -> Result<HttpResponse> {
    let mut form = read_form(payload, state.max_upload_bytes).await?;
    let upload = VideoUpload {
        title: form.text(&["title"]),
        description: form.text(&["description"]),
        duration: form.text(&["duration"]),
        video_file: form
            .take_file(&["videoFile", "video_file"])
            .map(|f| f.into_upload(MediaKind::Video)),
        thumbnail: form
            .take_file(&["thumbnail"])
            .map(|f| f.into_upload(MediaKind::Thumbnail)),
    };

    let video = service(&state).upload_video(actor.id(), upload).await?;
    Ok(response::created("Video uploaded successfully", video))
}

/// Update metadata and optionally replace the thumbnail
pub async fn update_video(
    state: web::Data<AppState>,
    actor: Actor,
    video_id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let id = VideoId::parse(&video_id)?;
    let mut form = read_form(payload, state.max_upload_bytes).await?;
    let update = VideoUpdate {
        title: form.text(&["title"]),
        description: form.text(&["description"]),
        is_published: form
            .text(&["isPublished", "is_published"])
            .map(|raw| parse_flag(&raw))
            .transpose()?,
        thumbnail: form
            .take_file(&["thumbnail"])
            .map(|f| f.into_upload(MediaKind::Thumbnail)),
    };

    let video = service(&state).update_video(actor.id(), id, update).await?;
    Ok(response::ok("Video updated successfully", video))
}

pub async fn delete_video(
    state: web::Data<AppState>,
    actor: Actor,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = VideoId::parse(&video_id)?;
    service(&state).delete_video(actor.id(), id).await?;
    Ok(response::ok("Video deleted successfully", serde_json::Value::Null))
}
