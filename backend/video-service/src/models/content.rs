use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CommentId, TweetId, UserId, VideoId};
use super::user::UserProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub video_id: VideoId,
    #[sqlx(rename = "owner_id")]
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with its author's profile (comment listing read model)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentWithOwner {
    pub id: CommentId,
    pub content: String,
    pub video_id: VideoId,
    pub owner: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tweet {
    pub id: TweetId,
    pub content: String,
    #[sqlx(rename = "owner_id")]
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body carrying text content (comments and tweets, create and edit)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_content_defaults_to_blank() {
        let req: ContentRequest = serde_json::from_str("{}").unwrap();
        assert!(req.content.is_empty());
    }
}
