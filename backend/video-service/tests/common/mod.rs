//! Shared fixtures for the HTTP tests.
//!
//! Apps are built over `MemoryStore` and a media store that keeps uploads in
//! memory, with HS256 tokens signed by a fixed test secret.
#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::{Arc, Mutex};

use video_service::error::Result;
use video_service::media::{MediaStorage, MediaUpload};
use video_service::middleware::{Claims, JwtValidator};
use video_service::models::{UserId, UserProfile};
use video_service::repository::MemoryStore;
use video_service::AppState;

pub const JWT_SECRET: &[u8] = b"video-service-test-secret";
pub const BOUNDARY: &str = "----vidtube-test-boundary";

/// Records stored keys and hands back deterministic URLs.
#[derive(Default)]
pub struct FakeMedia {
    pub stored: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStorage for FakeMedia {
    async fn store(&self, upload: MediaUpload) -> Result<String> {
        upload.validate()?;
        let key = upload.object_key();
        self.stored.lock().unwrap().push(key.clone());
        Ok(format!("https://media.test/{}", key))
    }
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub media: Arc<FakeMedia>,
    pub validator: Arc<JwtValidator>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            media: Arc::new(FakeMedia::default()),
            validator: Arc::new(JwtValidator::hs256(JWT_SECRET)),
        }
    }

    pub fn app_data(&self) -> web::Data<AppState> {
        web::Data::new(AppState {
            store: self.store.clone(),
            media: self.media.clone(),
            pagination_max_limit: 100,
            max_upload_bytes: 1024 * 1024,
        })
    }

    /// Register a user with the identity fixture and return its id.
    pub async fn user(&self, username: &str) -> UserId {
        let profile = UserProfile {
            id: UserId::new(),
            username: username.to_string(),
            full_name: format!("{} Example", username),
            avatar: Some(format!("https://media.test/avatars/{}.png", username)),
        };
        let id = profile.id;
        self.store.seed_user(profile).await;
        id
    }
}

/// Build the full app around a [`TestContext`].
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.app_data())
                .wrap(video_service::middleware::AuthMiddleware::new(
                    $ctx.validator.clone(),
                ))
                .configure(video_service::handlers::configure_routes),
        )
        .await
    };
}

pub fn token_for(user: UserId) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.to_string(),
        exp: now + 3600,
        iat: Some(now),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .expect("Failed to encode JWT")
}

pub fn bearer(user: UserId) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user)))
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                        name, value
                    )
                    .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
