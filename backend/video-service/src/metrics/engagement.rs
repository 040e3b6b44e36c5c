use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    /// Toggle outcomes by relation (like_video, like_comment, like_tweet, subscription).
    pub static ref ENGAGEMENT_TOGGLES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "engagement_toggles_total",
        "Toggle operations segmented by relation and outcome",
        &["relation", "outcome"]
    )
    .expect("failed to register engagement_toggles_total");

    /// Single-video fetches that incremented a view counter.
    pub static ref VIDEO_VIEWS_TOTAL: IntCounter = register_int_counter!(
        "video_views_total",
        "Video views recorded"
    )
    .expect("failed to register video_views_total");

    /// Mutations refused by the ownership gate.
    pub static ref AUTHORIZATION_DENIALS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "authorization_denials_total",
        "Ownership check failures segmented by resource kind",
        &["resource"]
    )
    .expect("failed to register authorization_denials_total");
}

pub fn record_toggle(relation: &str, outcome: &str) {
    ENGAGEMENT_TOGGLES_TOTAL
        .with_label_values(&[relation, outcome])
        .inc();
}

pub fn record_view() {
    VIDEO_VIEWS_TOTAL.inc();
}

pub fn record_denial(resource: &str) {
    AUTHORIZATION_DENIALS_TOTAL
        .with_label_values(&[resource])
        .inc();
}
