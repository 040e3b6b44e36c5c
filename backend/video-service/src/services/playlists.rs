/// Playlist service - playlists and their ordered, duplicate-free membership
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{
    CreatePlaylistRequest, Playlist, PlaylistId, PlaylistView, UpdatePlaylistRequest, UserId,
    UserProfile, VideoId, VideoSummary,
};
use crate::repository::DynStore;
use crate::services::authz::load_owned;

pub struct PlaylistService {
    store: DynStore,
}

impl PlaylistService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self, request), fields(actor = %actor))]
    pub async fn create_playlist(
        &self,
        actor: UserId,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist> {
        request.validate()?;
        let playlist = self
            .store
            .insert_playlist(actor, request.name.trim(), request.description.trim())
            .await?;
        tracing::info!(playlist_id = %playlist.id, "playlist created");
        Ok(playlist)
    }

    /// A user's playlists with their videos summarized.
    pub async fn user_playlists(&self, owner: UserId) -> Result<Vec<PlaylistView>> {
        let playlists = self.store.list_user_playlists(owner).await?;
        let video_ids: Vec<VideoId> = playlists
            .iter()
            .flat_map(|p| p.videos.iter().copied())
            .collect();
        let summaries = self.summaries(&video_ids).await?;

        Ok(playlists
            .into_iter()
            .map(|p| populate(p, None, &summaries))
            .collect())
    }

    /// One playlist with its owner profile and videos summarized.
    pub async fn get_playlist(&self, id: PlaylistId) -> Result<PlaylistView> {
        let playlist = self
            .store
            .find_playlist(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))?;
        let owner = self.store.find_profile(playlist.owner).await?;
        let summaries = self.summaries(&playlist.videos).await?;

        Ok(populate(playlist, owner, &summaries))
    }

    /// Append a video. Adding a video that is already a member is rejected.
    #[tracing::instrument(skip(self), fields(actor = %actor))]
    pub async fn add_video(
        &self,
        actor: UserId,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> Result<Playlist> {
        load_owned(actor, "modify", self.store.find_playlist(playlist_id)).await?;
        if self.store.find_video(video_id).await?.is_none() {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        if !self
            .store
            .append_playlist_video(playlist_id, video_id)
            .await?
        {
            return Err(AppError::BadRequest("Video already in playlist".to_string()));
        }
        tracing::info!("video added to playlist");

        self.reload(playlist_id).await
    }

    /// Remove a video. Removing a non-member succeeds without change.
    #[tracing::instrument(skip(self), fields(actor = %actor))]
    pub async fn remove_video(
        &self,
        actor: UserId,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> Result<Playlist> {
        load_owned(actor, "modify", self.store.find_playlist(playlist_id)).await?;
        let removed = self
            .store
            .remove_playlist_video(playlist_id, video_id)
            .await?;
        tracing::info!(removed, "video removed from playlist");

        self.reload(playlist_id).await
    }

    /// Overwrite only the fields supplied non-blank.
    #[tracing::instrument(skip(self, request), fields(actor = %actor))]
    pub async fn update_playlist(
        &self,
        actor: UserId,
        id: PlaylistId,
        request: &UpdatePlaylistRequest,
    ) -> Result<Playlist> {
        load_owned(actor, "update", self.store.find_playlist(id)).await?;

        self.store
            .update_playlist(
                id,
                request.name().map(str::trim),
                request.description().map(str::trim),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(actor = %actor))]
    pub async fn delete_playlist(&self, actor: UserId, id: PlaylistId) -> Result<()> {
        load_owned(actor, "delete", self.store.find_playlist(id)).await?;
        self.store.delete_playlist(id).await?;
        tracing::info!("playlist deleted");
        Ok(())
    }

    async fn reload(&self, id: PlaylistId) -> Result<Playlist> {
        self.store
            .find_playlist(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))
    }

    async fn summaries(&self, ids: &[VideoId]) -> Result<HashMap<VideoId, VideoSummary>> {
        let mut ids = ids.to_vec();
        ids.sort();
        ids.dedup();

        Ok(self
            .store
            .video_summaries(&ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect())
    }
}

/// Summaries in playlist order; members whose video is gone are left out.
fn populate(
    playlist: Playlist,
    owner_profile: Option<UserProfile>,
    summaries: &HashMap<VideoId, VideoSummary>,
) -> PlaylistView {
    let videos = playlist
        .videos
        .iter()
        .filter_map(|id| summaries.get(id).cloned())
        .collect();

    PlaylistView {
        id: playlist.id,
        owner: playlist.owner,
        owner_profile,
        name: playlist.name,
        description: playlist.description,
        videos,
        created_at: playlist.created_at,
        updated_at: playlist.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewVideo;
    use crate::repository::{MemoryStore, VideoRepository};
    use std::sync::Arc;

    async fn setup() -> (Arc<MemoryStore>, PlaylistService) {
        let store = Arc::new(MemoryStore::new());
        let service = PlaylistService::new(store.clone());
        (store, service)
    }

    async fn video(store: &MemoryStore, title: &str) -> VideoId {
        store
            .insert_video(NewVideo {
                owner: UserId::new(),
                title: title.to_string(),
                description: "d".to_string(),
                duration: 1.0,
                video_file: "https://cdn/v.mp4".to_string(),
                thumbnail: "https://cdn/t.png".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn request(name: &str, description: &str) -> CreatePlaylistRequest {
        CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected_and_membership_unchanged() {
        let (store, service) = setup().await;
        let owner = UserId::new();
        let playlist = service
            .create_playlist(owner, &request("mix", "weekend"))
            .await
            .unwrap();
        let v = video(&store, "one").await;

        let after = service.add_video(owner, playlist.id, v).await.unwrap();
        assert_eq!(after.videos, vec![v]);

        let err = service.add_video(owner, playlist.id, v).await.unwrap_err();
        assert_eq!(err.to_string(), "Video already in playlist");
        assert_eq!(service.reload(playlist.id).await.unwrap().videos, vec![v]);
    }

    #[tokio::test]
    async fn removing_a_non_member_is_a_no_op() {
        let (_store, service) = setup().await;
        let owner = UserId::new();
        let playlist = service
            .create_playlist(owner, &request("mix", "weekend"))
            .await
            .unwrap();

        let after = service
            .remove_video(owner, playlist.id, VideoId::new())
            .await
            .unwrap();
        assert!(after.videos.is_empty());
    }

    #[tokio::test]
    async fn non_owner_cannot_modify_membership() {
        let (store, service) = setup().await;
        let owner = UserId::new();
        let playlist = service
            .create_playlist(owner, &request("mix", "weekend"))
            .await
            .unwrap();
        let v = video(&store, "one").await;
        service.add_video(owner, playlist.id, v).await.unwrap();

        let err = service
            .remove_video(UserId::new(), playlist.id, v)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(service.reload(playlist.id).await.unwrap().videos, vec![v]);
    }

    #[tokio::test]
    async fn adding_a_missing_video_is_not_found() {
        let (_store, service) = setup().await;
        let owner = UserId::new();
        let playlist = service
            .create_playlist(owner, &request("mix", "weekend"))
            .await
            .unwrap();

        let err = service
            .add_video(owner, playlist.id, VideoId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Video not found"));
    }

    #[tokio::test]
    async fn populated_view_keeps_order_and_skips_deleted_videos() {
        let (store, service) = setup().await;
        let owner = UserId::new();
        let playlist = service
            .create_playlist(owner, &request("mix", "weekend"))
            .await
            .unwrap();
        let first = video(&store, "first").await;
        let gone = video(&store, "gone").await;
        let last = video(&store, "last").await;
        for v in [first, gone, last] {
            service.add_video(owner, playlist.id, v).await.unwrap();
        }
        store.delete_video(gone).await.unwrap();

        let view = service.get_playlist(playlist.id).await.unwrap();
        let titles: Vec<&str> = view.videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "last"]);
    }

    #[tokio::test]
    async fn update_keeps_fields_supplied_blank() {
        let (_store, service) = setup().await;
        let owner = UserId::new();
        let playlist = service
            .create_playlist(owner, &request("mix", "weekend"))
            .await
            .unwrap();

        let updated = service
            .update_playlist(
                owner,
                playlist.id,
                &UpdatePlaylistRequest {
                    name: Some("  ".into()),
                    description: Some("rainy day".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "mix");
        assert_eq!(updated.description, "rainy day");
    }
}
