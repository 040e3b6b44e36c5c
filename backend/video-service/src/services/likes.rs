/// Like service - toggles on videos, comments and tweets
use crate::error::Result;
use crate::models::{Like, LikeTarget, LikedVideo, UserId};
use crate::repository::DynStore;
use crate::services::toggle::{toggle, LikeRelation, Toggled};

pub struct LikeService {
    store: DynStore,
}

impl LikeService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Like `target` if the actor has not, otherwise unlike it. The target's
    /// existence is not checked.
    #[tracing::instrument(skip(self), fields(actor = %actor))]
    pub async fn toggle_like(&self, actor: UserId, target: LikeTarget) -> Result<Toggled<Like>> {
        let relation = LikeRelation {
            store: self.store.as_ref(),
            liker: actor,
            target,
        };
        toggle(&relation).await
    }

    pub async fn liked_videos(&self, actor: UserId) -> Result<Vec<LikedVideo>> {
        Ok(self.store.list_liked_videos(actor).await?)
    }
}
