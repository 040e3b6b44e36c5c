//! Toggle engine shared by likes and subscriptions.
//!
//! A toggle looks the relation up; if present it is deleted, otherwise it is
//! created. The read-then-write sequence is only a fast path: the store's
//! unique key on the relation is what guarantees at most one record. When
//! `create` loses a race to a concurrent writer the engine re-reads and
//! reports whatever state now exists instead of failing.

use async_trait::async_trait;

use crate::error::Result;
use crate::metrics::engagement::record_toggle;
use crate::models::{Like, LikeTarget, Subscription, UserId};
use crate::repository::{Store, StoreError, StoreResult};

/// Outcome of a toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum Toggled<T> {
    Added(T),
    Removed,
}

impl<T> Toggled<T> {
    pub fn is_added(&self) -> bool {
        matches!(self, Toggled::Added(_))
    }
}

/// One keyed relation that can be found, created and removed.
#[async_trait]
pub trait ToggleRelation: Send + Sync {
    type Record: Send;

    /// Metrics and log label.
    fn label(&self) -> &'static str;

    async fn find(&self) -> StoreResult<Option<Self::Record>>;

    async fn create(&self) -> StoreResult<Self::Record>;

    async fn remove(&self, existing: &Self::Record) -> StoreResult<bool>;
}

pub async fn toggle<R: ToggleRelation>(relation: &R) -> Result<Toggled<R::Record>> {
    if let Some(existing) = relation.find().await? {
        // A concurrent toggle may already have removed it; either way it is gone.
        relation.remove(&existing).await?;
        record_toggle(relation.label(), "removed");
        tracing::info!(relation = relation.label(), "relation removed");
        return Ok(Toggled::Removed);
    }

    match relation.create().await {
        Ok(record) => {
            record_toggle(relation.label(), "added");
            tracing::info!(relation = relation.label(), "relation added");
            Ok(Toggled::Added(record))
        }
        Err(StoreError::UniqueViolation(constraint)) => {
            record_toggle(relation.label(), "conflict");
            tracing::debug!(
                relation = relation.label(),
                constraint = %constraint,
                "concurrent toggle won the insert"
            );
            match relation.find().await? {
                Some(record) => Ok(Toggled::Added(record)),
                None => Ok(Toggled::Removed),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// `(liker, target)` like relation.
pub struct LikeRelation<'a> {
    pub store: &'a dyn Store,
    pub liker: UserId,
    pub target: LikeTarget,
}

#[async_trait]
impl<'a> ToggleRelation for LikeRelation<'a> {
    type Record = Like;

    fn label(&self) -> &'static str {
        match self.target {
            LikeTarget::Video(_) => "like_video",
            LikeTarget::Comment(_) => "like_comment",
            LikeTarget::Tweet(_) => "like_tweet",
        }
    }

    async fn find(&self) -> StoreResult<Option<Like>> {
        self.store.find_like(self.liker, self.target).await
    }

    async fn create(&self) -> StoreResult<Like> {
        self.store.insert_like(self.liker, self.target).await
    }

    async fn remove(&self, existing: &Like) -> StoreResult<bool> {
        self.store.delete_like(existing.id).await
    }
}

/// `(subscriber, channel)` subscription relation.
pub struct SubscriptionRelation<'a> {
    pub store: &'a dyn Store,
    pub subscriber: UserId,
    pub channel: UserId,
}

#[async_trait]
impl<'a> ToggleRelation for SubscriptionRelation<'a> {
    type Record = Subscription;

    fn label(&self) -> &'static str {
        "subscription"
    }

    async fn find(&self) -> StoreResult<Option<Subscription>> {
        self.store
            .find_subscription(self.subscriber, self.channel)
            .await
    }

    async fn create(&self) -> StoreResult<Subscription> {
        self.store
            .insert_subscription(self.subscriber, self.channel)
            .await
    }

    async fn remove(&self, existing: &Subscription) -> StoreResult<bool> {
        self.store.delete_subscription(existing.id).await
    }
}
