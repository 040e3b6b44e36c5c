pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod response;
pub mod services;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, Result};

use media::MediaStorage;
use repository::DynStore;

/// Shared handler state. Built once in `main` (or by a test) and injected.
#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub media: Arc<dyn MediaStorage>,
    pub pagination_max_limit: i64,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: DynStore, media: Arc<dyn MediaStorage>, config: &Config) -> Self {
        Self {
            store,
            media,
            pagination_max_limit: config.pagination.max_limit,
            max_upload_bytes: config.media.max_upload_bytes,
        }
    }
}
