use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PlaylistId, UserId, VideoId};
use super::user::UserProfile;
use super::video::VideoSummary;
use crate::error::{AppError, Result};

/// A playlist and its ordered, duplicate-free membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub owner: UserId,
    pub name: String,
    pub description: String,
    pub videos: Vec<VideoId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn contains(&self, video_id: VideoId) -> bool {
        self.videos.contains(&video_id)
    }
}

/// Playlist with owner profile and member videos populated.
///
/// Members whose video no longer exists are left out of `videos`.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistView {
    pub id: PlaylistId,
    pub owner: UserId,
    pub owner_profile: Option<UserProfile>,
    pub name: String,
    pub description: String,
    pub videos: Vec<VideoSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreatePlaylistRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Name and description are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update: only non-blank supplied fields overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdatePlaylistRequest {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}
