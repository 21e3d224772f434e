use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an issued bearer token.
///
/// `sub` is optional on the wire so that a token lacking it can be reported
/// as missing-subject rather than unparseable. Tokens minted by
/// [`TokenCodec::issue`](crate::TokenCodec::issue) always set all three
/// fields, and never anything secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp), fixed at issuance
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject, expiring `ttl` after `now`.
    pub fn for_subject(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Check whether the token is expired at `timestamp`.
    ///
    /// A token is valid strictly before its expiry instant; at the instant
    /// itself it is already expired.
    pub fn is_expired(&self, timestamp: i64) -> bool {
        self.exp <= timestamp
    }
}
