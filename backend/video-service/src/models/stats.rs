use serde::{Deserialize, Serialize};

/// Channel dashboard aggregates. Every field defaults to zero, never null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_subscribers: i64,
    pub total_likes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_serializes_all_zero_fields() {
        let json = serde_json::to_value(ChannelStats::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalVideos": 0,
                "totalViews": 0,
                "totalSubscribers": 0,
                "totalLikes": 0,
            })
        );
    }
}
