/// Playlist handlers - CRUD and membership; every route requires a caller
use actix_web::{web, HttpResponse};

use crate::error::{AppError, Result};
use crate::middleware::Actor;
use crate::models::{
    CreatePlaylistRequest, PlaylistId, UpdatePlaylistRequest, UserId, VideoId,
};
use crate::response;
use crate::services::PlaylistService;
use crate::AppState;

fn parse_member_path(playlist_id: &str, video_id: &str) -> Result<(PlaylistId, VideoId)> {
    match (PlaylistId::parse(playlist_id), VideoId::parse(video_id)) {
        (Ok(p), Ok(v)) => Ok((p, v)),
        _ => Err(AppError::BadRequest("Invalid playlist or video ID".to_string())),
    }
}

pub async fn create_playlist(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<CreatePlaylistRequest>,
) -> Result<HttpResponse> {
    let playlist = PlaylistService::new(state.store.clone())
        .create_playlist(actor.id(), &req)
        .await?;
    Ok(response::created("Playlist created successfully", playlist))
}

pub async fn user_playlists(
    state: web::Data<AppState>,
    _actor: Actor,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let owner = UserId::parse(&user_id)?;
    let playlists = PlaylistService::new(state.store.clone())
        .user_playlists(owner)
        .await?;
    Ok(response::ok("User playlists fetched successfully", playlists))
}

pub async fn get_playlist(
    state: web::Data<AppState>,
    _actor: Actor,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = PlaylistId::parse(&playlist_id)?;
    let playlist = PlaylistService::new(state.store.clone())
        .get_playlist(id)
        .await?;
    Ok(response::ok("Playlist fetched successfully", playlist))
}

pub async fn add_video(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (playlist_id, video_id) = parse_member_path(&path.0, &path.1)?;
    let playlist = PlaylistService::new(state.store.clone())
        .add_video(actor.id(), playlist_id, video_id)
        .await?;
    Ok(response::ok("Video added to playlist", playlist))
}

pub async fn remove_video(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (playlist_id, video_id) = parse_member_path(&path.0, &path.1)?;
    let playlist = PlaylistService::new(state.store.clone())
        .remove_video(actor.id(), playlist_id, video_id)
        .await?;
    Ok(response::ok("Video removed from playlist", playlist))
}

pub async fn update_playlist(
    state: web::Data<AppState>,
    actor: Actor,
    playlist_id: web::Path<String>,
    req: web::Json<UpdatePlaylistRequest>,
) -> Result<HttpResponse> {
    let id = PlaylistId::parse(&playlist_id)?;
    let playlist = PlaylistService::new(state.store.clone())
        .update_playlist(actor.id(), id, &req)
        .await?;
    Ok(response::ok("Playlist updated successfully", playlist))
}

pub async fn delete_playlist(
    state: web::Data<AppState>,
    actor: Actor,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = PlaylistId::parse(&playlist_id)?;
    PlaylistService::new(state.store.clone())
        .delete_playlist(actor.id(), id)
        .await?;
    Ok(response::ok("Playlist deleted successfully", serde_json::Value::Null))
}
