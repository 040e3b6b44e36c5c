/// Video service - upload, fetch, update and deletion of videos
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::media::{MediaStorage, MediaUpload};
use crate::metrics::engagement::record_view;
use crate::models::{NewVideo, UserId, Video, VideoChanges, VideoDetail, VideoId};
use crate::repository::DynStore;
use crate::services::authz::load_owned;

/// Fields of an upload form, as received.
#[derive(Debug, Default)]
pub struct VideoUpload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub video_file: Option<MediaUpload>,
    pub thumbnail: Option<MediaUpload>,
}

/// Fields of an update form. Blank text fields are ignored.
#[derive(Debug, Default)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_published: Option<bool>,
    pub thumbnail: Option<MediaUpload>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct VideoService {
    store: DynStore,
    media: Arc<dyn MediaStorage>,
}

impl VideoService {
    pub fn new(store: DynStore, media: Arc<dyn MediaStorage>) -> Self {
        Self { store, media }
    }

    /// Published videos, newest first, with owner profiles.
    pub async fn list_published(&self) -> Result<Vec<VideoDetail>> {
        let videos = self.store.list_published_videos().await?;
        self.with_owners(videos).await
    }

    /// Fetch one video. Every successful fetch counts as a view.
    pub async fn get_video(&self, id: VideoId) -> Result<VideoDetail> {
        let video = self
            .store
            .record_view(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
        record_view();

        let owner_profile = self.store.find_profile(video.owner).await?;
        Ok(VideoDetail {
            video,
            owner_profile,
        })
    }

    #[tracing::instrument(skip(self, upload), fields(actor = %actor))]
    pub async fn upload_video(&self, actor: UserId, upload: VideoUpload) -> Result<Video> {
        let (title, description, duration) = match (
            non_blank(upload.title),
            non_blank(upload.description),
            non_blank(upload.duration),
        ) {
            (Some(t), Some(d), Some(dur)) => (t, d, dur),
            _ => {
                return Err(AppError::BadRequest(
                    "All fields (title, description, duration) are required".to_string(),
                ))
            }
        };
        let duration: f64 = duration
            .parse()
            .ok()
            .filter(|d: &f64| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| AppError::BadRequest("Invalid duration".to_string()))?;

        let video_file = upload
            .video_file
            .ok_or_else(|| AppError::BadRequest("Video file is required".to_string()))?;
        let thumbnail = upload
            .thumbnail
            .ok_or_else(|| AppError::BadRequest("Thumbnail image is required".to_string()))?;
        video_file.validate()?;
        thumbnail.validate()?;

        let video_url = self.media.store(video_file).await?;
        let thumbnail_url = self.media.store(thumbnail).await?;

        let video = self
            .store
            .insert_video(NewVideo {
                owner: actor,
                title,
                description,
                duration,
                video_file: video_url,
                thumbnail: thumbnail_url,
            })
            .await?;

        tracing::info!(video_id = %video.id, "video uploaded");
        Ok(video)
    }

    #[tracing::instrument(skip(self, update), fields(actor = %actor, video_id = %id))]
    pub async fn update_video(
        &self,
        actor: UserId,
        id: VideoId,
        update: VideoUpdate,
    ) -> Result<Video> {
        load_owned(actor, "update", self.store.find_video(id)).await?;

        let thumbnail = match update.thumbnail {
            Some(upload) => {
                upload.validate()?;
                Some(self.media.store(upload).await?)
            }
            None => None,
        };
        let changes = VideoChanges {
            title: non_blank(update.title),
            description: non_blank(update.description),
            is_published: update.is_published,
            thumbnail,
        };

        self.store
            .update_video(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(actor = %actor, video_id = %id))]
    pub async fn delete_video(&self, actor: UserId, id: VideoId) -> Result<()> {
        load_owned(actor, "delete", self.store.find_video(id)).await?;
        self.store.delete_video(id).await?;
        tracing::info!("video deleted");
        Ok(())
    }

    /// Videos of a channel, newest first. An empty channel is reported as 404.
    pub async fn channel_videos(&self, channel: UserId) -> Result<Vec<Video>> {
        let videos = self.store.list_channel_videos(channel).await?;
        if videos.is_empty() {
            return Err(AppError::NotFound(
                "No videos found for this channel".to_string(),
            ));
        }
        Ok(videos)
    }

    async fn with_owners(&self, videos: Vec<Video>) -> Result<Vec<VideoDetail>> {
        let mut owner_ids: Vec<UserId> = videos.iter().map(|v| v.owner).collect();
        owner_ids.sort();
        owner_ids.dedup();

        let profiles: HashMap<UserId, _> = self
            .store
            .find_profiles(&owner_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(videos
            .into_iter()
            .map(|video| VideoDetail {
                owner_profile: profiles.get(&video.owner).cloned(),
                video,
            })
            .collect())
    }
}
