/// In-process store
///
/// Mirrors the Postgres schema closely enough for the HTTP tests: the same
/// unique keys on likes, subscriptions and playlist membership, the same
/// inner-join semantics on read models, the same newest-first ordering.
/// Every write happens under a single write lock, so each trait call is atomic.
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{
    ChannelStatsRepository, CommentRepository, LikeRepository, PlaylistRepository, StoreError,
    StoreResult, SubscriptionRepository, TweetRepository, UserRepository, VideoRepository,
};
use crate::models::{
    Comment, CommentId, CommentWithOwner, Like, LikeId, LikeTarget, LikedVideo, NewVideo,
    PageWindow, Playlist, PlaylistId, Subscription, SubscriptionEdge, SubscriptionId, Tweet,
    TweetId, UserId, UserProfile, Video, VideoChanges, VideoId, VideoSummary,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, UserProfile>,
    videos: HashMap<VideoId, Video>,
    comments: HashMap<CommentId, Comment>,
    tweets: HashMap<TweetId, Tweet>,
    likes: HashMap<LikeId, Like>,
    like_keys: HashMap<(UserId, LikeTarget), LikeId>,
    subscriptions: HashMap<SubscriptionId, Subscription>,
    subscription_keys: HashMap<(UserId, UserId), SubscriptionId>,
    playlists: HashMap<PlaylistId, Playlist>,
    last_tick: Option<DateTime<Utc>>,
}

impl State {
    /// Strictly increasing timestamps, so newest-first ordering is total.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_tick {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(next);
        next
    }

    fn edge(&self, id: SubscriptionId, user: UserId, at: DateTime<Utc>) -> Option<SubscriptionEdge> {
        self.users.get(&user).map(|profile| SubscriptionEdge {
            subscription_id: id,
            user: profile.clone(),
            subscribed_at: at,
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users come from the identity service; tests register them here.
    pub async fn seed_user(&self, profile: UserProfile) {
        let mut state = self.state.write().await;
        state.users.insert(profile.id, profile);
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, uuid::Uuid)) {
    items.sort_by_key(|item| Reverse(key(item)));
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_profile(&self, id: UserId) -> StoreResult<Option<UserProfile>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_profiles(&self, ids: &[UserId]) -> StoreResult<Vec<UserProfile>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl VideoRepository for MemoryStore {
    async fn insert_video(&self, video: NewVideo) -> StoreResult<Video> {
        let mut state = self.state.write().await;
        let now = state.tick();
        let created = Video {
            id: VideoId::new(),
            owner: video.owner,
            title: video.title,
            description: video.description,
            duration: video.duration,
            video_file: video.video_file,
            thumbnail: video.thumbnail,
            views: 0,
            is_published: true,
            created_at: now,
            updated_at: now,
        };
        state.videos.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_video(&self, id: VideoId) -> StoreResult<Option<Video>> {
        Ok(self.state.read().await.videos.get(&id).cloned())
    }

    async fn record_view(&self, id: VideoId) -> StoreResult<Option<Video>> {
        let mut state = self.state.write().await;
        Ok(state.videos.get_mut(&id).map(|video| {
            video.views += 1;
            video.clone()
        }))
    }

    async fn list_published_videos(&self) -> StoreResult<Vec<Video>> {
        let state = self.state.read().await;
        let mut videos: Vec<Video> = state
            .videos
            .values()
            .filter(|v| v.is_published)
            .cloned()
            .collect();
        newest_first(&mut videos, |v| (v.created_at, v.id.as_uuid()));
        Ok(videos)
    }

    async fn list_channel_videos(&self, owner: UserId) -> StoreResult<Vec<Video>> {
        let state = self.state.read().await;
        let mut videos: Vec<Video> = state
            .videos
            .values()
            .filter(|v| v.owner == owner)
            .cloned()
            .collect();
        newest_first(&mut videos, |v| (v.created_at, v.id.as_uuid()));
        Ok(videos)
    }

    async fn video_summaries(&self, ids: &[VideoId]) -> StoreResult<Vec<VideoSummary>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.videos.get(id).map(VideoSummary::from))
            .collect())
    }

    async fn update_video(
        &self,
        id: VideoId,
        changes: &VideoChanges,
    ) -> StoreResult<Option<Video>> {
        let mut state = self.state.write().await;
        let now = state.tick();
        Ok(state.videos.get_mut(&id).map(|video| {
            changes.apply(video);
            video.updated_at = now;
            video.clone()
        }))
    }

    async fn delete_video(&self, id: VideoId) -> StoreResult<bool> {
        Ok(self.state.write().await.videos.remove(&id).is_some())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert_comment(
        &self,
        video_id: VideoId,
        owner: UserId,
        content: &str,
    ) -> StoreResult<Comment> {
        let mut state = self.state.write().await;
        let now = state.tick();
        let comment = Comment {
            id: CommentId::new(),
            content: content.to_string(),
            video_id,
            owner,
            created_at: now,
            updated_at: now,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: CommentId) -> StoreResult<Option<Comment>> {
        Ok(self.state.read().await.comments.get(&id).cloned())
    }

    async fn update_comment_content(
        &self,
        id: CommentId,
        content: &str,
    ) -> StoreResult<Option<Comment>> {
        let mut state = self.state.write().await;
        let now = state.tick();
        Ok(state.comments.get_mut(&id).map(|comment| {
            comment.content = content.to_string();
            comment.updated_at = now;
            comment.clone()
        }))
    }

    async fn delete_comment(&self, id: CommentId) -> StoreResult<bool> {
        Ok(self.state.write().await.comments.remove(&id).is_some())
    }

    async fn list_video_comments(
        &self,
        video_id: VideoId,
        window: PageWindow,
    ) -> StoreResult<(Vec<CommentWithOwner>, i64)> {
        let state = self.state.read().await;
        let mut joined: Vec<CommentWithOwner> = state
            .comments
            .values()
            .filter(|c| c.video_id == video_id)
            .filter_map(|c| {
                state.users.get(&c.owner).map(|owner| CommentWithOwner {
                    id: c.id,
                    content: c.content.clone(),
                    video_id: c.video_id,
                    owner: owner.clone(),
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                })
            })
            .collect();
        newest_first(&mut joined, |c| (c.created_at, c.id.as_uuid()));

        let total = joined.len() as i64;
        let page = joined
            .into_iter()
            .skip(window.offset() as usize)
            .take(window.limit as usize)
            .collect();
        Ok((page, total))
    }
}

#[async_trait]
impl TweetRepository for MemoryStore {
    async fn insert_tweet(&self, owner: UserId, content: &str) -> StoreResult<Tweet> {
        let mut state = self.state.write().await;
        let now = state.tick();
        let tweet = Tweet {
            id: TweetId::new(),
            content: content.to_string(),
            owner,
            created_at: now,
            updated_at: now,
        };
        state.tweets.insert(tweet.id, tweet.clone());
        Ok(tweet)
    }

    async fn find_tweet(&self, id: TweetId) -> StoreResult<Option<Tweet>> {
        Ok(self.state.read().await.tweets.get(&id).cloned())
    }

    async fn list_user_tweets(&self, owner: UserId) -> StoreResult<Vec<Tweet>> {
        let state = self.state.read().await;
        let mut tweets: Vec<Tweet> = state
            .tweets
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect();
        newest_first(&mut tweets, |t| (t.created_at, t.id.as_uuid()));
        Ok(tweets)
    }

    async fn update_tweet_content(
        &self,
        id: TweetId,
        content: &str,
    ) -> StoreResult<Option<Tweet>> {
        let mut state = self.state.write().await;
        let now = state.tick();
        Ok(state.tweets.get_mut(&id).map(|tweet| {
            tweet.content = content.to_string();
            tweet.updated_at = now;
            tweet.clone()
        }))
    }

    async fn delete_tweet(&self, id: TweetId) -> StoreResult<bool> {
        Ok(self.state.write().await.tweets.remove(&id).is_some())
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn find_like(&self, liker: UserId, target: LikeTarget) -> StoreResult<Option<Like>> {
        let state = self.state.read().await;
        Ok(state
            .like_keys
            .get(&(liker, target))
            .and_then(|id| state.likes.get(id))
            .cloned())
    }

    async fn insert_like(&self, liker: UserId, target: LikeTarget) -> StoreResult<Like> {
        let mut state = self.state.write().await;
        if state.like_keys.contains_key(&(liker, target)) {
            return Err(StoreError::UniqueViolation(
                "likes_liker_target_key".to_string(),
            ));
        }
        let like = Like {
            id: LikeId::new(),
            liked_by: liker,
            target,
            created_at: state.tick(),
        };
        state.like_keys.insert((liker, target), like.id);
        state.likes.insert(like.id, like.clone());
        Ok(like)
    }

    async fn delete_like(&self, id: LikeId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state.likes.remove(&id) {
            Some(like) => {
                state.like_keys.remove(&(like.liked_by, like.target));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_liked_videos(&self, liker: UserId) -> StoreResult<Vec<LikedVideo>> {
        let state = self.state.read().await;
        let mut liked: Vec<LikedVideo> = state
            .likes
            .values()
            .filter(|like| like.liked_by == liker)
            .filter_map(|like| match like.target {
                LikeTarget::Video(video_id) => state.videos.get(&video_id).map(|video| {
                    let owner = state.users.get(&video.owner);
                    LikedVideo {
                        like_id: like.id,
                        liked_at: like.created_at,
                        video_id: video.id,
                        title: video.title.clone(),
                        thumbnail: video.thumbnail.clone(),
                        owner_id: video.owner,
                        owner_username: owner.map(|o| o.username.clone()),
                        owner_avatar: owner.and_then(|o| o.avatar.clone()),
                    }
                }),
                _ => None,
            })
            .collect();
        newest_first(&mut liked, |l| (l.liked_at, l.like_id.as_uuid()));
        Ok(liked)
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn find_subscription(
        &self,
        subscriber: UserId,
        channel: UserId,
    ) -> StoreResult<Option<Subscription>> {
        let state = self.state.read().await;
        Ok(state
            .subscription_keys
            .get(&(subscriber, channel))
            .and_then(|id| state.subscriptions.get(id))
            .cloned())
    }

    async fn insert_subscription(
        &self,
        subscriber: UserId,
        channel: UserId,
    ) -> StoreResult<Subscription> {
        let mut state = self.state.write().await;
        if state.subscription_keys.contains_key(&(subscriber, channel)) {
            return Err(StoreError::UniqueViolation(
                "subscriptions_subscriber_channel_key".to_string(),
            ));
        }
        let subscription = Subscription {
            id: SubscriptionId::new(),
            subscriber,
            channel,
            created_at: state.tick(),
        };
        state
            .subscription_keys
            .insert((subscriber, channel), subscription.id);
        state
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn delete_subscription(&self, id: SubscriptionId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state.subscriptions.remove(&id) {
            Some(sub) => {
                state.subscription_keys.remove(&(sub.subscriber, sub.channel));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_channel_subscribers(&self, channel: UserId) -> StoreResult<Vec<SubscriptionEdge>> {
        let state = self.state.read().await;
        let mut edges: Vec<SubscriptionEdge> = state
            .subscriptions
            .values()
            .filter(|s| s.channel == channel)
            .filter_map(|s| state.edge(s.id, s.subscriber, s.created_at))
            .collect();
        newest_first(&mut edges, |e| (e.subscribed_at, e.subscription_id.as_uuid()));
        Ok(edges)
    }

    async fn list_subscribed_channels(
        &self,
        subscriber: UserId,
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        let state = self.state.read().await;
        let mut edges: Vec<SubscriptionEdge> = state
            .subscriptions
            .values()
            .filter(|s| s.subscriber == subscriber)
            .filter_map(|s| state.edge(s.id, s.channel, s.created_at))
            .collect();
        newest_first(&mut edges, |e| (e.subscribed_at, e.subscription_id.as_uuid()));
        Ok(edges)
    }
}

#[async_trait]
impl PlaylistRepository for MemoryStore {
    async fn insert_playlist(
        &self,
        owner: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<Playlist> {
        let mut state = self.state.write().await;
        let now = state.tick();
        let playlist = Playlist {
            id: PlaylistId::new(),
            owner,
            name: name.to_string(),
            description: description.to_string(),
            videos: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.playlists.insert(playlist.id, playlist.clone());
        Ok(playlist)
    }

    async fn find_playlist(&self, id: PlaylistId) -> StoreResult<Option<Playlist>> {
        Ok(self.state.read().await.playlists.get(&id).cloned())
    }

    async fn list_user_playlists(&self, owner: UserId) -> StoreResult<Vec<Playlist>> {
        let state = self.state.read().await;
        let mut playlists: Vec<Playlist> = state
            .playlists
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        newest_first(&mut playlists, |p| (p.created_at, p.id.as_uuid()));
        Ok(playlists)
    }

    async fn append_playlist_video(
        &self,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let now = state.tick();
        match state.playlists.get_mut(&playlist_id) {
            Some(playlist) if !playlist.contains(video_id) => {
                playlist.videos.push(video_id);
                playlist.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove_playlist_video(
        &self,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let now = state.tick();
        match state.playlists.get_mut(&playlist_id) {
            Some(playlist) if playlist.contains(video_id) => {
                playlist.videos.retain(|v| *v != video_id);
                playlist.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_playlist(
        &self,
        id: PlaylistId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> StoreResult<Option<Playlist>> {
        let mut state = self.state.write().await;
        let now = state.tick();
        Ok(state.playlists.get_mut(&id).map(|playlist| {
            if let Some(name) = name {
                playlist.name = name.to_string();
            }
            if let Some(description) = description {
                playlist.description = description.to_string();
            }
            playlist.updated_at = now;
            playlist.clone()
        }))
    }

    async fn delete_playlist(&self, id: PlaylistId) -> StoreResult<bool> {
        Ok(self.state.write().await.playlists.remove(&id).is_some())
    }
}

#[async_trait]
impl ChannelStatsRepository for MemoryStore {
    async fn count_channel_videos(&self, channel: UserId) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state.videos.values().filter(|v| v.owner == channel).count() as i64)
    }

    async fn sum_channel_views(&self, channel: UserId) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .videos
            .values()
            .filter(|v| v.owner == channel)
            .map(|v| v.views)
            .sum())
    }

    async fn count_channel_subscribers(&self, channel: UserId) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .subscriptions
            .values()
            .filter(|s| s.channel == channel)
            .count() as i64)
    }

    async fn count_channel_video_likes(&self, channel: UserId) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .likes
            .values()
            .filter(|like| match like.target {
                LikeTarget::Video(video_id) => state
                    .videos
                    .get(&video_id)
                    .map(|v| v.owner == channel)
                    .unwrap_or(false),
                _ => false,
            })
            .count() as i64)
    }
}
