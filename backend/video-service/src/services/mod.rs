/// Business logic layer for video-service
pub mod authz;
pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod toggle;
pub mod tweets;
pub mod videos;

pub use comments::CommentService;
pub use dashboard::DashboardService;
pub use likes::LikeService;
pub use playlists::PlaylistService;
pub use subscriptions::SubscriptionService;
pub use toggle::Toggled;
pub use tweets::TweetService;
pub use videos::{VideoService, VideoUpdate, VideoUpload};
