use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{UserId, VideoId};
use super::user::UserProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: VideoId,
    #[sqlx(rename = "owner_id")]
    pub owner: UserId,
    pub title: String,
    pub description: String,
    /// Seconds
    pub duration: f64,
    pub video_file: String,
    pub thumbnail: String,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A video with its owner's profile joined in.
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: Video,
    /// Absent when the owner is unknown to the identity service
    pub owner_profile: Option<UserProfile>,
}

/// Projection used when populating playlists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VideoSummary {
    pub id: VideoId,
    pub title: String,
    pub thumbnail: String,
    pub duration: f64,
}

impl From<&Video> for VideoSummary {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            thumbnail: video.thumbnail.clone(),
            duration: video.duration,
        }
    }
}

/// Fields for a freshly uploaded video; media locations come back from storage.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub video_file: String,
    pub thumbnail: String,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_published: Option<bool>,
    pub thumbnail: Option<String>,
}

impl VideoChanges {
    /// Apply onto an in-memory copy; blank text never overwrites.
    pub fn apply(&self, video: &mut Video) {
        if let Some(title) = self.title.as_ref().filter(|t| !t.trim().is_empty()) {
            video.title = title.clone();
        }
        if let Some(description) = self.description.as_ref().filter(|d| !d.trim().is_empty()) {
            video.description = description.clone();
        }
        if let Some(published) = self.is_published {
            video.is_published = published;
        }
        if let Some(thumbnail) = self.thumbnail.as_ref() {
            video.thumbnail = thumbnail.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Video {
        let now = Utc::now();
        Video {
            id: VideoId::new(),
            owner: UserId::new(),
            title: "first".into(),
            description: "desc".into(),
            duration: 12.5,
            video_file: "https://cdn/v.mp4".into(),
            thumbnail: "https://cdn/t.png".into(),
            views: 0,
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn blank_fields_do_not_overwrite() {
        let mut video = sample();
        VideoChanges {
            title: Some("   ".into()),
            description: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut video);

        assert_eq!(video.title, "first");
        assert_eq!(video.description, "desc");
    }

    #[test]
    fn supplied_fields_overwrite() {
        let mut video = sample();
        VideoChanges {
            title: Some("renamed".into()),
            is_published: Some(false),
            thumbnail: Some("https://cdn/t2.png".into()),
            ..Default::default()
        }
        .apply(&mut video);

        assert_eq!(video.title, "renamed");
        assert!(!video.is_published);
        assert_eq!(video.thumbnail, "https://cdn/t2.png");
        assert_eq!(video.description, "desc");
    }
}
