/// Subscription handlers - toggle and list edges of the subscription graph
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::Result;
use crate::middleware::Actor;
use crate::models::ids::parse_channel_id;
use crate::models::UserId;
use crate::response;
use crate::services::{SubscriptionService, Toggled};
use crate::AppState;

pub async fn toggle_subscription(
    state: web::Data<AppState>,
    actor: Actor,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel = parse_channel_id(&channel_id)?;

    match SubscriptionService::new(state.store.clone())
        .toggle_subscription(actor.id(), channel)
        .await?
    {
        Toggled::Added(subscription) => Ok(response::created(
            "Subscribed successfully",
            json!({ "state": "added", "subscription": subscription }),
        )),
        Toggled::Removed => Ok(response::ok(
            "Unsubscribed successfully",
            json!({ "state": "removed" }),
        )),
    }
}

pub async fn channel_subscribers(
    state: web::Data<AppState>,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel = parse_channel_id(&channel_id)?;
    let subscribers = SubscriptionService::new(state.store.clone())
        .channel_subscribers(channel)
        .await?;
    Ok(response::ok("Subscribers fetched successfully", subscribers))
}

pub async fn subscribed_channels(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let subscriber = UserId::parse(&user_id)
        .map_err(|_| crate::error::AppError::BadRequest("Invalid subscriber ID".to_string()))?;
    let channels = SubscriptionService::new(state.store.clone())
        .subscribed_channels(subscriber)
        .await?;
    Ok(response::ok("Subscribed channels fetched successfully", channels))
}
