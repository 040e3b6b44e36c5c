/// Dashboard handlers - channel aggregates
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::middleware::Actor;
use crate::models::ids::parse_channel_id;
use crate::response;
use crate::services::{DashboardService, VideoService};
use crate::AppState;

/// Aggregates for the caller's own channel
pub async fn channel_stats(state: web::Data<AppState>, actor: Actor) -> Result<HttpResponse> {
    let stats = DashboardService::new(state.store.clone())
        .channel_stats(actor.id())
        .await?;
    Ok(response::ok("Channel stats fetched successfully", stats))
}

pub async fn channel_videos(
    state: web::Data<AppState>,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel = parse_channel_id(&channel_id)?;
    let videos = VideoService::new(state.store.clone(), state.media.clone())
        .channel_videos(channel)
        .await?;
    Ok(response::ok("Channel videos fetched successfully", videos))
}
