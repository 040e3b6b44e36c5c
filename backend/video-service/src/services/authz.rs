/// Ownership gate for videos, comments, tweets and playlists
///
/// Callers run the three steps in order: parse the identifier, look the
/// resource up, then compare owners. Likes and subscriptions are never gated;
/// the actor performing the toggle is their owner.
use std::future::Future;

use crate::error::{AppError, Result};
use crate::metrics::engagement::record_denial;
use crate::models::{Comment, Playlist, Tweet, UserId, Video};
use crate::repository::StoreResult;

/// A resource with a single recorded owner.
pub trait Owned {
    /// Lowercase noun used in messages and metrics.
    const KIND: &'static str;
    const NOT_FOUND: &'static str;

    fn owner_id(&self) -> UserId;
}

impl Owned for Video {
    const KIND: &'static str = "video";
    const NOT_FOUND: &'static str = "Video not found";

    fn owner_id(&self) -> UserId {
        self.owner
    }
}

impl Owned for Comment {
    const KIND: &'static str = "comment";
    const NOT_FOUND: &'static str = "Comment not found";

    fn owner_id(&self) -> UserId {
        self.owner
    }
}

impl Owned for Tweet {
    const KIND: &'static str = "tweet";
    const NOT_FOUND: &'static str = "Tweet not found";

    fn owner_id(&self) -> UserId {
        self.owner
    }
}

impl Owned for Playlist {
    const KIND: &'static str = "playlist";
    const NOT_FOUND: &'static str = "Playlist not found";

    fn owner_id(&self) -> UserId {
        self.owner
    }
}

/// Check that `actor` owns `resource`.
pub fn authorize<T: Owned>(resource: &T, actor: UserId, action: &str) -> Result<()> {
    if resource.owner_id() == actor {
        return Ok(());
    }

    tracing::warn!(
        resource = T::KIND,
        owner = %resource.owner_id(),
        actor = %actor,
        action,
        "ownership check failed"
    );
    record_denial(T::KIND);

    Err(AppError::Forbidden(format!(
        "You are not authorized to {} this {}",
        action,
        T::KIND
    )))
}

/// Resolve a lookup to the resource (404 when absent), then gate it.
pub async fn load_owned<T, F>(actor: UserId, action: &str, lookup: F) -> Result<T>
where
    T: Owned,
    F: Future<Output = StoreResult<Option<T>>>,
{
    let resource = lookup
        .await?
        .ok_or_else(|| AppError::NotFound(T::NOT_FOUND.to_string()))?;
    authorize(&resource, actor, action)?;
    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TweetId, UserId};
    use chrono::Utc;

    fn tweet(owner: UserId) -> Tweet {
        let now = Utc::now();
        Tweet {
            id: TweetId::new(),
            content: "hi".into(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_passes() {
        let owner = UserId::new();
        assert!(authorize(&tweet(owner), owner, "edit").is_ok());
    }

    #[test]
    fn other_actor_is_forbidden() {
        let err = authorize(&tweet(UserId::new()), UserId::new(), "delete").unwrap_err();
        match err {
            AppError::Forbidden(msg) => {
                assert_eq!(msg, "You are not authorized to delete this tweet")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_resource_is_not_found_before_ownership() {
        let lookup = async { Ok::<Option<Tweet>, _>(None) };
        let err = load_owned(UserId::new(), "edit", lookup).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Tweet not found"));
    }

    #[tokio::test]
    async fn found_resource_is_gated() {
        let owner = UserId::new();
        let lookup = async move { Ok(Some(tweet(owner))) };
        let err = load_owned::<Tweet, _>(UserId::new(), "edit", lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
