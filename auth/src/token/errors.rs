use thiserror::Error;

/// Error type for token issuance and validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Token cannot be parsed into header, claims, and signature.
    #[error("Token is malformed")]
    Malformed,

    /// Signature does not match the payload under the configured key.
    /// Covers tampering and tokens signed with a different secret.
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// Token expiry is at or before the validation instant.
    #[error("Token is expired")]
    Expired,

    /// Claims are parseable but carry no subject.
    #[error("Token is missing the subject claim")]
    MissingSubject,

    /// Algorithm is not usable with a shared-secret key.
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
