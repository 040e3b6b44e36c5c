//! Typed identifiers.
//!
//! Each entity gets its own newtype over a UUID so a `VideoId` can never be
//! compared with (or bound in place of) a `CommentId`. Parsing is the only
//! way in from untrusted text and fails with `BadRequest` before any lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::AppError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Human label used in error messages
            pub const LABEL: &'static str = $label;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse the store's identifier syntax (canonical UUID text).
            pub fn parse(raw: &str) -> Result<Self, AppError> {
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", $label)))
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// A user known to the external identity service. Consumed, never minted here.
    UserId,
    "user"
);
define_id!(VideoId, "video");
define_id!(CommentId, "comment");
define_id!(TweetId, "tweet");
define_id!(PlaylistId, "playlist");
define_id!(LikeId, "like");
define_id!(SubscriptionId, "subscription");

/// Parse a path segment naming a channel. Channels are users.
pub fn parse_channel_id(raw: &str) -> Result<UserId, AppError> {
    Uuid::parse_str(raw)
        .map(UserId)
        .map_err(|_| AppError::BadRequest("Invalid channel ID".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn parses_canonical_uuid() {
        let id = VideoId::parse(VALID).unwrap();
        assert_eq!(id.to_string(), VALID);
    }

    #[test]
    fn malformed_id_is_bad_request_naming_the_kind() {
        let err = CommentId::parse("not-an-id").unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "Invalid comment ID"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn channel_ids_report_channel_label() {
        let err = parse_channel_id("123").unwrap_err();
        assert_eq!(err.to_string(), "Invalid channel ID");
    }

    #[test]
    fn ids_serialize_as_bare_strings() {
        let id = TweetId::parse(VALID).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", VALID));
    }
}
