use auth::TokenError;
use thiserror::Error;

/// Authentication failures.
///
/// The kinds stay distinguishable for logging, but the HTTP boundary
/// collapses them into two outcomes: login failures become a single
/// forbidden response, resolution failures a single unauthorized one.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email or wrong password — deliberately the same variant for
    /// both, so responses cannot reveal which emails are registered.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token failed validation (expired, tampered, malformed, or missing
    /// its subject).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Token is valid but its subject no longer names an account (e.g. the
    /// user was deleted after issuance).
    #[error("Token subject does not match a known user: {0}")]
    UnknownSubject(String),

    #[error("Database error: {0}")]
    Database(String),
}
