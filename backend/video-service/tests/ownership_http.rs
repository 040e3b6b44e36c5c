//! Owner-only mutations: malformed id, then existence, then ownership.

#[macro_use]
mod common;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{bearer, multipart_body, multipart_content_type, Part, TestContext};
use video_service::models::{NewVideo, UserId, VideoId};
use video_service::repository::{
    CommentRepository, PlaylistRepository, TweetRepository, VideoRepository,
};

async fn seed_video(ctx: &TestContext, owner: UserId) -> VideoId {
    ctx.store
        .insert_video(NewVideo {
            owner,
            title: "owned".to_string(),
            description: "about".to_string(),
            duration: 3.0,
            video_file: "https://media.test/videos/o.mp4".to_string(),
            thumbnail: "https://media.test/thumbnails/o.png".to_string(),
        })
        .await
        .unwrap()
        .id
}

async fn message(resp: actix_web::dev::ServiceResponse) -> String {
    let body: Value = test::read_body_json(resp).await;
    assert!(body["status"].as_u64().unwrap() >= 400);
    body["message"].as_str().unwrap_or_default().to_string()
}

#[actix_web::test]
async fn video_mutations_are_owner_only() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice").await;
    let mallory = ctx.user("mallory").await;
    let video = seed_video(&ctx, alice).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/videos/{}", video))
        .insert_header(bearer(mallory))
        .insert_header((CONTENT_TYPE, multipart_content_type()))
        .set_payload(multipart_body(&[Part::Text("title", "hijacked")]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        message(resp).await,
        "You are not authorized to update this video"
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/videos/{}", video))
        .insert_header(bearer(mallory))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let stored = ctx.store.find_video(video).await.unwrap().unwrap();
    assert_eq!(stored.title, "owned");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/videos/{}", video))
        .insert_header(bearer(alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.store.find_video(video).await.unwrap().is_none());
}

#[actix_web::test]
async fn comment_mutations_are_owner_only() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice").await;
    let mallory = ctx.user("mallory").await;
    let video = seed_video(&ctx, alice).await;
    let comment = ctx
        .store
        .insert_comment(video, alice, "mine")
        .await
        .unwrap()
        .id;
    let app = init_app!(ctx);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/comments/{}", comment))
        .insert_header(bearer(mallory))
        .set_json(json!({ "content": "not mine" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        message(resp).await,
        "You are not authorized to update this comment"
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/comments/{}", comment))
        .insert_header(bearer(mallory))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/comments/{}", comment))
        .insert_header(bearer(alice))
        .set_json(json!({ "content": "edited" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["content"], "edited");
}

#[actix_web::test]
async fn tweet_mutations_are_owner_only() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice").await;
    let mallory = ctx.user("mallory").await;
    let tweet = ctx.store.insert_tweet(alice, "hello").await.unwrap().id;
    let app = init_app!(ctx);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tweets/{}", tweet))
        .insert_header(bearer(mallory))
        .set_json(json!({ "content": "defaced" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(message(resp).await, "You are not authorized to edit this tweet");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tweets/{}", tweet))
        .insert_header(bearer(mallory))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let stored = ctx.store.find_tweet(tweet).await.unwrap().unwrap();
    assert_eq!(stored.content, "hello");
}

#[actix_web::test]
async fn playlist_mutations_are_owner_only() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice").await;
    let mallory = ctx.user("mallory").await;
    let video = seed_video(&ctx, alice).await;
    let playlist = ctx
        .store
        .insert_playlist(alice, "mix", "weekend")
        .await
        .unwrap()
        .id;
    let app = init_app!(ctx);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/playlists/{}", playlist))
        .insert_header(bearer(mallory))
        .set_json(json!({ "name": "stolen" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/playlists/{}/videos/{}", playlist, video))
        .insert_header(bearer(mallory))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        message(resp).await,
        "You are not authorized to modify this playlist"
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/playlists/{}", playlist))
        .insert_header(bearer(mallory))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let stored = ctx.store.find_playlist(playlist).await.unwrap().unwrap();
    assert_eq!(stored.name, "mix");
    assert!(stored.videos.is_empty());
}

#[actix_web::test]
async fn malformed_ids_are_rejected_before_lookup() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice").await;
    let app = init_app!(ctx);

    let cases = [
        (test::TestRequest::delete().uri("/api/v1/videos/nope"), "Invalid video ID"),
        (test::TestRequest::delete().uri("/api/v1/comments/nope"), "Invalid comment ID"),
        (test::TestRequest::delete().uri("/api/v1/tweets/nope"), "Invalid tweet ID"),
        (
            test::TestRequest::delete().uri("/api/v1/playlists/nope"),
            "Invalid playlist ID",
        ),
        (
            test::TestRequest::delete().uri(&format!("/api/v1/playlists/nope/videos/{}", VideoId::new())),
            "Invalid playlist or video ID",
        ),
    ];

    for (builder, expected) in cases {
        let req = builder.insert_header(bearer(alice)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(resp).await, expected);
    }
}

#[actix_web::test]
async fn missing_resources_are_not_found() {
    let ctx = TestContext::new();
    let alice = ctx.user("alice").await;
    let app = init_app!(ctx);

    let missing = uuid::Uuid::new_v4();
    let cases = [
        (format!("/api/v1/videos/{}", missing), "Video not found"),
        (format!("/api/v1/comments/{}", missing), "Comment not found"),
        (format!("/api/v1/tweets/{}", missing), "Tweet not found"),
        (format!("/api/v1/playlists/{}", missing), "Playlist not found"),
    ];

    for (uri, expected) in cases {
        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(alice))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(message(resp).await, expected);
    }
}
