use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::{map_insert_error, PgStore};
use crate::models::{Playlist, PlaylistId, UserId, VideoId};
use crate::repository::{PlaylistRepository, StoreResult};

#[derive(sqlx::FromRow)]
struct PlaylistRow {
    id: PlaylistId,
    owner_id: UserId,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlaylistRow {
    fn with_videos(self, videos: Vec<VideoId>) -> Playlist {
        Playlist {
            id: self.id,
            owner: self.owner_id,
            name: self.name,
            description: self.description,
            videos,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl PgStore {
    async fn playlist_members(&self, playlist_id: PlaylistId) -> StoreResult<Vec<VideoId>> {
        let members: Vec<VideoId> = sqlx::query_scalar(
            r#"
            SELECT video_id
            FROM playlist_videos
            WHERE playlist_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}

#[async_trait]
impl PlaylistRepository for PgStore {
    async fn insert_playlist(
        &self,
        owner: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<Playlist> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            INSERT INTO playlists (id, owner_id, name, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, name, description, created_at, updated_at
            "#,
        )
        .bind(PlaylistId::new())
        .bind(owner)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(row.with_videos(Vec::new()))
    }

    async fn find_playlist(&self, id: PlaylistId) -> StoreResult<Option<Playlist>> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            SELECT id, owner_id, name, description, created_at, updated_at
            FROM playlists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let videos = self.playlist_members(row.id).await?;
                Ok(Some(row.with_videos(videos)))
            }
            None => Ok(None),
        }
    }

    async fn list_user_playlists(&self, owner: UserId) -> StoreResult<Vec<Playlist>> {
        let rows = sqlx::query_as::<_, PlaylistRow>(
            r#"
            SELECT id, owner_id, name, description, created_at, updated_at
            FROM playlists
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id.as_uuid()).collect();
        let members: Vec<(PlaylistId, VideoId)> = sqlx::query_as(
            r#"
            SELECT playlist_id, video_id
            FROM playlist_videos
            WHERE playlist_id = ANY($1)
            ORDER BY position ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_playlist: HashMap<PlaylistId, Vec<VideoId>> = HashMap::new();
        for (playlist_id, video_id) in members {
            by_playlist.entry(playlist_id).or_default().push(video_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let videos = by_playlist.remove(&row.id).unwrap_or_default();
                row.with_videos(videos)
            })
            .collect())
    }

    async fn append_playlist_video(
        &self,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> StoreResult<bool> {
        // The primary key on (playlist_id, video_id) decides; the UPDATE only
        // runs when the insert actually happened.
        let result = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO playlist_videos (playlist_id, video_id)
                VALUES ($1, $2)
                ON CONFLICT (playlist_id, video_id) DO NOTHING
                RETURNING video_id
            )
            UPDATE playlists
            SET updated_at = NOW()
            WHERE id = $1 AND EXISTS (SELECT 1 FROM inserted)
            "#,
        )
        .bind(playlist_id)
        .bind(video_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_playlist_video(
        &self,
        playlist_id: PlaylistId,
        video_id: VideoId,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            WITH removed AS (
                DELETE FROM playlist_videos
                WHERE playlist_id = $1 AND video_id = $2
                RETURNING video_id
            )
            UPDATE playlists
            SET updated_at = NOW()
            WHERE id = $1 AND EXISTS (SELECT 1 FROM removed)
            "#,
        )
        .bind(playlist_id)
        .bind(video_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_playlist(
        &self,
        id: PlaylistId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> StoreResult<Option<Playlist>> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            UPDATE playlists
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let videos = self.playlist_members(row.id).await?;
                Ok(Some(row.with_videos(videos)))
            }
            None => Ok(None),
        }
    }

    async fn delete_playlist(&self, id: PlaylistId) -> StoreResult<bool> {
        // Membership rows go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
