/// Data models for video-service
///
/// - Typed identifiers for every entity
/// - Videos, comments, tweets, playlists
/// - Engagement relations (likes, subscriptions)
/// - Read models assembled by joins (comment listings, channel stats)
pub mod content;
pub mod engagement;
pub mod ids;
pub mod pagination;
pub mod playlist;
pub mod stats;
pub mod user;
pub mod video;

pub use content::{Comment, CommentWithOwner, ContentRequest, Tweet};
pub use engagement::{
    Like, LikeTarget, LikedVideo, Subscription, SubscriptionEdge, TargetKind,
};
pub use ids::{CommentId, LikeId, PlaylistId, SubscriptionId, TweetId, UserId, VideoId};
pub use pagination::{PageWindow, PagedResponse, PaginationRequest};
pub use playlist::{CreatePlaylistRequest, Playlist, PlaylistView, UpdatePlaylistRequest};
pub use stats::ChannelStats;
pub use user::UserProfile;
pub use video::{NewVideo, Video, VideoChanges, VideoDetail, VideoSummary};
