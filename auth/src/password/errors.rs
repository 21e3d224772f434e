use thiserror::Error;

/// Error type for password hashing.
///
/// Hashing only fails when the backend is misconfigured (e.g. parameters out
/// of range), never because of the password content itself. Callers should
/// treat it as an internal fault, not a user error.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
