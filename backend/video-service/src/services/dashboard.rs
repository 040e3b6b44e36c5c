/// Dashboard service - per-channel aggregates
use crate::error::Result;
use crate::models::{ChannelStats, UserId};
use crate::repository::DynStore;

pub struct DashboardService {
    store: DynStore,
}

impl DashboardService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// The four aggregates are independent queries, run concurrently.
    pub async fn channel_stats(&self, channel: UserId) -> Result<ChannelStats> {
        let (total_videos, total_views, total_subscribers, total_likes) = tokio::try_join!(
            self.store.count_channel_videos(channel),
            self.store.sum_channel_views(channel),
            self.store.count_channel_subscribers(channel),
            self.store.count_channel_video_likes(channel),
        )?;

        Ok(ChannelStats {
            total_videos,
            total_views,
            total_subscribers,
            total_likes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LikeTarget, NewVideo};
    use crate::repository::{
        LikeRepository, MemoryStore, SubscriptionRepository, VideoRepository,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn empty_channel_reports_zeros() {
        let service = DashboardService::new(Arc::new(MemoryStore::new()));
        let stats = service.channel_stats(UserId::new()).await.unwrap();
        assert_eq!(stats, ChannelStats::default());
    }

    #[tokio::test]
    async fn aggregates_views_subscribers_and_likes() {
        let store = Arc::new(MemoryStore::new());
        let channel = UserId::new();
        let video = store
            .insert_video(NewVideo {
                owner: channel,
                title: "t".into(),
                description: "d".into(),
                duration: 1.0,
                video_file: "https://cdn/v.mp4".into(),
                thumbnail: "https://cdn/t.png".into(),
            })
            .await
            .unwrap();
        store.record_view(video.id).await.unwrap();
        store.record_view(video.id).await.unwrap();
        store.insert_subscription(UserId::new(), channel).await.unwrap();
        store
            .insert_like(UserId::new(), LikeTarget::Video(video.id))
            .await
            .unwrap();

        let stats = DashboardService::new(store)
            .channel_stats(channel)
            .await
            .unwrap();
        assert_eq!(
            stats,
            ChannelStats {
                total_videos: 1,
                total_views: 2,
                total_subscribers: 1,
                total_likes: 1,
            }
        );
    }
}
