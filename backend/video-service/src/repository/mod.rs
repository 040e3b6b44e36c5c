//! Storage seams.
//!
//! One trait per aggregate; [`Store`] bundles them so handlers carry a single
//! injected `Arc<dyn Store>`. Uniqueness of likes, subscriptions and playlist
//! membership is a property of the store itself: implementations must reject
//! a duplicate insert with [`StoreError::UniqueViolation`] no matter how many
//! callers race on the same key.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    Comment, CommentId, CommentWithOwner, Like, LikeId, LikeTarget, LikedVideo,
    NewVideo, PageWindow, Playlist, PlaylistId, Subscription, SubscriptionEdge, SubscriptionId,
    Tweet, TweetId, UserId, UserProfile, Video, VideoChanges, VideoId, VideoSummary,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only access to identity-service users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_profile(&self, id: UserId) -> StoreResult<Option<UserProfile>>;

    async fn find_profiles(&self, ids: &[UserId]) -> StoreResult<Vec<UserProfile>>;
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn insert_video(&self, video: NewVideo) -> StoreResult<Video>;

    async fn find_video(&self, id: VideoId) -> StoreResult<Option<Video>>;

    /// Increment the view counter by one in a single write and return the
    /// updated video, or `None` if it does not exist.
    async fn record_view(&self, id: VideoId) -> StoreResult<Option<Video>>;

    /// Published videos, newest first.
    async fn list_published_videos(&self) -> StoreResult<Vec<Video>>;

    /// All videos owned by a channel, newest first.
    async fn list_channel_videos(&self, owner: UserId) -> StoreResult<Vec<Video>>;

    /// Summaries of the given videos in no particular order; missing ids are skipped.
    async fn video_summaries(&self, ids: &[VideoId]) -> StoreResult<Vec<VideoSummary>>;

    async fn update_video(
        &self,
        id: VideoId,
        changes: &VideoChanges,
    ) -> StoreResult<Option<Video>>;

    async fn delete_video(&self, id: VideoId) -> StoreResult<bool>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert_comment(
        &self,
        video_id: VideoId,
        owner: UserId,
        content: &str,
    ) -> StoreResult<Comment>;

    async fn find_comment(&self, id: CommentId) -> StoreResult<Option<Comment>>;

    async fn update_comment_content(
        &self,
        id: CommentId,
        content: &str,
    ) -> StoreResult<Option<Comment>>;

    async fn delete_comment(&self, id: CommentId) -> StoreResult<bool>;

    /// Comments on a video inner-joined with their author, newest first.
    /// Returns the requested window and the joined total.
    async fn list_video_comments(
        &self,
        video_id: VideoId,
        window: PageWindow,
    ) -> StoreResult<(Vec<CommentWithOwner>, i64)>;
}

#[async_trait]
pub trait TweetRepository: Send + Sync {
    async fn insert_tweet(&self, owner: UserId, content: &str) -> StoreResult<Tweet>;

    async fn find_tweet(&self, id: TweetId) -> StoreResult<Option<Tweet>>;

    /// Newest first.
    async fn list_user_tweets(&self, owner: UserId) -> StoreResult<Vec<Tweet>>;

    async fn update_tweet_content(&self, id: TweetId, content: &str)
        -> StoreResult<Option<Tweet>>;

    async fn delete_tweet(&self, id: TweetId) -> StoreResult<bool>;
}

#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find_like(&self, liker: UserId, target: LikeTarget) -> StoreResult<Option<Like>>;

    /// Fails with `UniqueViolation` if `(liker, target)` already exists.
    async fn insert_like(&self, liker: UserId, target: LikeTarget) -> StoreResult<Like>;

    async fn delete_like(&self, id: LikeId) -> StoreResult<bool>;

    /// Video likes of `liker` joined with the video and its owner, newest like first.
    /// Likes whose video is gone are omitted.
    async fn list_liked_videos(&self, liker: UserId) -> StoreResult<Vec<LikedVideo>>;
}

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_subscription(
        &self,
        subscriber: UserId,
        channel: UserId,
    ) -> StoreResult<Option<Subscription>>;

    /// Fails with `UniqueViolation` if `(subscriber, channel)` already exists.
    async fn insert_subscription(
        &self,
        subscriber: UserId,
        channel: UserId,
    ) -> StoreResult<Subscription>;

    async fn delete_subscription(&self, id: SubscriptionId) -> StoreResult<bool>;

    async fn list_channel_subscribers(&self, channel: UserId) -> StoreResult<Vec<SubscriptionEdge>>;

    async fn list_subscribed_channels(
        &self,
        subscriber: UserId,
    ) -> StoreResult<Vec<SubscriptionEdge>>;
}

#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn insert_playlist(
        &self,
        owner: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<Playlist>;

    async fn find_playlist(&self, id: PlaylistId) -> StoreResult<Option<Playlist>>;

    async fn list_user_playlists(&self, owner: UserId) -> StoreResult<Vec<Playlist>>;

    /// Append `video_id` at the end of the sequence in one conditional write.
    /// Returns `false` (and changes nothing) when it is already a member.
    async fn append_playlist_video(
        &self,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> StoreResult<bool>;

    /// Returns whether a member was actually removed.
    async fn remove_playlist_video(
        &self,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> StoreResult<bool>;

    async fn update_playlist(
        &self,
        id: PlaylistId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> StoreResult<Option<Playlist>>;

    async fn delete_playlist(&self, id: PlaylistId) -> StoreResult<bool>;
}

/// Per-channel aggregates backing the dashboard. Each returns zero, never null.
#[async_trait]
pub trait ChannelStatsRepository: Send + Sync {
    async fn count_channel_videos(&self, channel: UserId) -> StoreResult<i64>;

    async fn sum_channel_views(&self, channel: UserId) -> StoreResult<i64>;

    async fn count_channel_subscribers(&self, channel: UserId) -> StoreResult<i64>;

    /// Likes on videos owned by `channel`.
    async fn count_channel_video_likes(&self, channel: UserId) -> StoreResult<i64>;
}

/// Everything the service needs from storage.
pub trait Store:
    UserRepository
    + VideoRepository
    + CommentRepository
    + TweetRepository
    + LikeRepository
    + SubscriptionRepository
    + PlaylistRepository
    + ChannelStatsRepository
{
}

impl<T> Store for T where
    T: UserRepository
        + VideoRepository
        + CommentRepository
        + TweetRepository
        + LikeRepository
        + SubscriptionRepository
        + PlaylistRepository
        + ChannelStatsRepository
{
}

pub type DynStore = Arc<dyn Store>;
