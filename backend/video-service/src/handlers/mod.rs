//! HTTP handlers for Video Service
//!
//! All API routes live under `/api/v1`. Handlers parse path identifiers
//! themselves so a malformed id is a 400 with the service's own envelope.

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::metrics::serve_metrics;

pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod multipart;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod videos;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Register every route. Shared by `main` and the HTTP tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(health))
    .route("/metrics", web::get().to(serve_metrics))
    .service(
        web::scope("/api/v1")
            .service(
                web::scope("/videos")
                    .service(web::resource("").route(web::get().to(videos::list_videos)))
                    .service(
                        web::resource("/upload").route(web::post().to(videos::upload_video)),
                    )
                    .service(
                        web::resource("/{video_id}/comments")
                            .route(web::get().to(comments::list_video_comments)),
                    )
                    .service(
                        web::resource("/{video_id}")
                            .route(web::get().to(videos::get_video))
                            .route(web::patch().to(videos::update_video))
                            .route(web::delete().to(videos::delete_video)),
                    ),
            )
            .service(
                web::scope("/comments")
                    .service(
                        web::resource("/{id}")
                            // POST targets a video, PATCH/DELETE a comment.
                            .route(web::post().to(comments::add_comment))
                            .route(web::patch().to(comments::update_comment))
                            .route(web::delete().to(comments::delete_comment)),
                    ),
            )
            .service(
                web::scope("/tweets")
                    .service(web::resource("").route(web::post().to(tweets::create_tweet)))
                    .service(
                        web::resource("/user/{user_id}")
                            .route(web::get().to(tweets::get_user_tweets)),
                    )
                    .service(
                        web::resource("/{tweet_id}")
                            .route(web::patch().to(tweets::update_tweet))
                            .route(web::delete().to(tweets::delete_tweet)),
                    ),
            )
            .service(
                web::scope("/likes")
                    .route("/videos", web::get().to(likes::liked_videos))
                    .route("/video/{video_id}", web::post().to(likes::toggle_video_like))
                    .route(
                        "/comment/{comment_id}",
                        web::post().to(likes::toggle_comment_like),
                    )
                    .route("/tweet/{tweet_id}", web::post().to(likes::toggle_tweet_like)),
            )
            .service(
                web::scope("/subscriptions")
                    .route(
                        "/{channel_id}/subscribers",
                        web::get().to(subscriptions::channel_subscribers),
                    )
                    .route(
                        "/{channel_id}",
                        web::post().to(subscriptions::toggle_subscription),
                    ),
            )
            .route(
                "/users/{user_id}/subscriptions",
                web::get().to(subscriptions::subscribed_channels),
            )
            .service(
                web::scope("/playlists")
                    .service(
                        web::resource("").route(web::post().to(playlists::create_playlist)),
                    )
                    .service(
                        web::resource("/user/{user_id}")
                            .route(web::get().to(playlists::user_playlists)),
                    )
                    .service(
                        web::resource("/{playlist_id}/videos/{video_id}")
                            .route(web::post().to(playlists::add_video))
                            .route(web::delete().to(playlists::remove_video)),
                    )
                    .service(
                        web::resource("/{playlist_id}")
                            .route(web::get().to(playlists::get_playlist))
                            .route(web::patch().to(playlists::update_playlist))
                            .route(web::delete().to(playlists::delete_playlist)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .route("/stats", web::get().to(dashboard::channel_stats))
                    .route(
                        "/videos/{channel_id}",
                        web::get().to(dashboard::channel_videos),
                    ),
            ),
    );
}
