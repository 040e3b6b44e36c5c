//! Likes and subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ids::{CommentId, LikeId, SubscriptionId, TweetId, UserId, VideoId};
use super::user::UserProfile;

/// Which kind of entity a like points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Video,
    Comment,
    Tweet,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Video => "video",
            TargetKind::Comment => "comment",
            TargetKind::Tweet => "tweet",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "video" => Some(TargetKind::Video),
            "comment" => Some(TargetKind::Comment),
            "tweet" => Some(TargetKind::Tweet),
            _ => None,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one liked entity. Serialized as `{"video": "<id>"}` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeTarget {
    Video(VideoId),
    Comment(CommentId),
    Tweet(TweetId),
}

impl LikeTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            LikeTarget::Video(_) => TargetKind::Video,
            LikeTarget::Comment(_) => TargetKind::Comment,
            LikeTarget::Tweet(_) => TargetKind::Tweet,
        }
    }

    pub fn target_uuid(&self) -> Uuid {
        match self {
            LikeTarget::Video(id) => id.0,
            LikeTarget::Comment(id) => id.0,
            LikeTarget::Tweet(id) => id.0,
        }
    }

    /// Rebuild from the stored `(target_kind, target_id)` pair.
    pub fn from_parts(kind: TargetKind, id: Uuid) -> Self {
        match kind {
            TargetKind::Video => LikeTarget::Video(VideoId(id)),
            TargetKind::Comment => LikeTarget::Comment(CommentId(id)),
            TargetKind::Tweet => LikeTarget::Tweet(TweetId(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: LikeId,
    pub liked_by: UserId,
    pub target: LikeTarget,
    pub created_at: DateTime<Utc>,
}

/// One entry of the actor's liked-videos listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LikedVideo {
    pub like_id: LikeId,
    pub liked_at: DateTime<Utc>,
    pub video_id: VideoId,
    pub title: String,
    pub thumbnail: String,
    pub owner_id: UserId,
    pub owner_username: Option<String>,
    pub owner_avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: SubscriptionId,
    #[sqlx(rename = "subscriber_id")]
    pub subscriber: UserId,
    #[sqlx(rename = "channel_id")]
    pub channel: UserId,
    pub created_at: DateTime<Utc>,
}

/// The other end of a subscription edge, with its profile joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionEdge {
    pub subscription_id: SubscriptionId,
    pub user: UserProfile,
    pub subscribed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_target_round_trips_through_stored_parts() {
        let target = LikeTarget::Comment(CommentId::new());
        let rebuilt = LikeTarget::from_parts(target.kind(), target.target_uuid());
        assert_eq!(rebuilt, target);
    }

    #[test]
    fn like_target_serializes_as_single_tagged_slot() {
        let id = VideoId::new();
        let json = serde_json::to_value(LikeTarget::Video(id)).unwrap();
        assert_eq!(json, serde_json::json!({ "video": id.to_string() }));
    }

    #[test]
    fn unknown_target_kind_is_rejected() {
        assert_eq!(TargetKind::parse("tweet"), Some(TargetKind::Tweet));
        assert_eq!(TargetKind::parse("playlist"), None);
    }
}
