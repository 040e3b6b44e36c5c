/// Comment service - comments on videos
use crate::error::{AppError, Result};
use crate::models::{
    Comment, CommentId, CommentWithOwner, PagedResponse, PaginationRequest, UserId, VideoId,
};
use crate::repository::DynStore;
use crate::services::authz::load_owned;

pub struct CommentService {
    store: DynStore,
}

impl CommentService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Newest-first page of a video's comments with author profiles.
    pub async fn list_video_comments(
        &self,
        video_id: VideoId,
        pagination: &PaginationRequest,
        max_limit: i64,
    ) -> Result<PagedResponse<CommentWithOwner>> {
        let window = pagination.resolve(max_limit)?;
        let (items, total) = self.store.list_video_comments(video_id, window).await?;
        Ok(PagedResponse::new(items, total, window))
    }

    #[tracing::instrument(skip(self, content), fields(actor = %actor, video_id = %video_id))]
    pub async fn add_comment(
        &self,
        actor: UserId,
        video_id: VideoId,
        content: &str,
    ) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Comment content is required".to_string()));
        }
        if self.store.find_video(video_id).await?.is_none() {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        let comment = self.store.insert_comment(video_id, actor, content).await?;
        tracing::info!(comment_id = %comment.id, "comment added");
        Ok(comment)
    }

    #[tracing::instrument(skip(self, content), fields(actor = %actor, comment_id = %id))]
    pub async fn update_comment(
        &self,
        actor: UserId,
        id: CommentId,
        content: &str,
    ) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Updated content is required".to_string()));
        }
        load_owned(actor, "update", self.store.find_comment(id)).await?;

        self.store
            .update_comment_content(id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(actor = %actor, comment_id = %id))]
    pub async fn delete_comment(&self, actor: UserId, id: CommentId) -> Result<()> {
        load_owned(actor, "delete", self.store.find_comment(id)).await?;
        self.store.delete_comment(id).await?;
        tracing::info!("comment deleted");
        Ok(())
    }
}
