/// Subscription service - the subscriber/channel graph
use crate::error::{AppError, Result};
use crate::models::{Subscription, SubscriptionEdge, UserId};
use crate::repository::DynStore;
use crate::services::toggle::{toggle, SubscriptionRelation, Toggled};

pub struct SubscriptionService {
    store: DynStore,
}

impl SubscriptionService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Subscribe to `channel` or, if already subscribed, unsubscribe.
    /// Subscribing to oneself is allowed.
    #[tracing::instrument(skip(self), fields(actor = %actor, channel = %channel))]
    pub async fn toggle_subscription(
        &self,
        actor: UserId,
        channel: UserId,
    ) -> Result<Toggled<Subscription>> {
        if self.store.find_profile(channel).await?.is_none() {
            return Err(AppError::NotFound("Channel not found".to_string()));
        }

        let relation = SubscriptionRelation {
            store: self.store.as_ref(),
            subscriber: actor,
            channel,
        };
        toggle(&relation).await
    }

    /// Profiles subscribed to `channel`, newest subscription first.
    pub async fn channel_subscribers(&self, channel: UserId) -> Result<Vec<SubscriptionEdge>> {
        Ok(self.store.list_channel_subscribers(channel).await?)
    }

    /// Channels `subscriber` follows, newest subscription first.
    pub async fn subscribed_channels(&self, subscriber: UserId) -> Result<Vec<SubscriptionEdge>> {
        Ok(self.store.list_subscribed_channels(subscriber).await?)
    }
}
