use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signed bearer token codec.
///
/// Issues and validates self-contained JWS tokens (`header.claims.signature`,
/// base64url segments). Key, algorithm, and TTL are fixed at construction and
/// immutable afterwards, so any server instance holding the same secret can
/// validate a token without shared session state.
///
/// Validation is a pure function of the token and the caller-supplied `now`:
/// the library's own clock-based expiry check is disabled and expiry is
/// compared against `now` explicitly. Signature comparison is constant-time
/// inside the jsonwebtoken crate.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from a shared secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes for HS256
    /// * `algorithm` - signing algorithm, must be an HMAC variant
    /// * `ttl` - validity window applied to every issued token
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - algorithm does not take a shared-secret key.
    ///   Surfacing this here lets startup abort instead of every request
    ///   failing later.
    pub fn new(secret: &[u8], algorithm: Algorithm, ttl: Duration) -> Result<Self, TokenError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                encoding_key: EncodingKey::from_secret(secret),
                decoding_key: DecodingKey::from_secret(secret),
                algorithm,
                ttl,
            }),
            other => Err(TokenError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    /// Issue a token for `subject`, expiring `ttl` after `now`.
    ///
    /// Expiry is computed once here and embedded in the claims; re-validating
    /// or re-serializing the token never moves it.
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, now, self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token at instant `now` and return its subject.
    ///
    /// # Errors
    /// * `InvalidSignature` - signature mismatch (tampering or wrong key)
    /// * `Malformed` - not parseable as a token of the expected shape
    /// * `Expired` - expiry is at or before `now`
    /// * `MissingSubject` - claims carry no `sub`
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        let claims = token_data.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        claims.sub.ok_or(TokenError::MissingSubject)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn codec_with_ttl(ttl: Duration) -> TokenCodec {
        TokenCodec::new(SECRET, Algorithm::HS256, ttl).expect("Failed to create codec")
    }

    #[test]
    fn test_issue_and_validate() {
        let codec = codec_with_ttl(Duration::minutes(30));
        let now = Utc::now();

        let token = codec.issue("42", now).expect("Failed to issue token");
        assert_eq!(token.matches('.').count(), 2);

        let subject = codec.validate(&token, now).expect("Failed to validate");
        assert_eq!(subject, "42");
    }

    #[test]
    fn test_validity_window() {
        let codec = codec_with_ttl(Duration::minutes(10));
        let issued_at = Utc::now();

        let token = codec.issue("42", issued_at).expect("Failed to issue token");

        // Valid from issuance up to (but excluding) the expiry instant
        assert!(codec.validate(&token, issued_at).is_ok());
        assert!(codec
            .validate(&token, issued_at + Duration::minutes(10) - Duration::seconds(1))
            .is_ok());

        assert_eq!(
            codec.validate(&token, issued_at + Duration::minutes(10)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.validate(&token, issued_at + Duration::hours(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_zero_ttl_expires_on_next_tick() {
        let codec = codec_with_ttl(Duration::zero());
        let issued_at = Utc::now();

        let token = codec.issue("42", issued_at).expect("Failed to issue token");

        assert_eq!(
            codec.validate(&token, issued_at + Duration::seconds(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let codec = codec_with_ttl(Duration::minutes(30));
        let now = Utc::now();

        let token = codec.issue("42", now).expect("Failed to issue token");

        // Flip the first character of the signature segment
        let (payload, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let flipped = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", payload, flipped, &signature[1..]);

        assert_eq!(
            codec.validate(&tampered, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_key_is_invalid_signature() {
        let issuer = codec_with_ttl(Duration::minutes(30));
        let verifier = TokenCodec::new(
            b"another_secret_key_32_bytes_long!!",
            Algorithm::HS256,
            Duration::minutes(30),
        )
        .expect("Failed to create codec");

        let now = Utc::now();
        let token = issuer.issue("42", now).expect("Failed to issue token");

        assert_eq!(
            verifier.validate(&token, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec_with_ttl(Duration::minutes(30));
        let now = Utc::now();

        assert_eq!(codec.validate("", now), Err(TokenError::Malformed));
        assert_eq!(
            codec.validate("not-a-token", now),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            codec.validate("invalid.token.here", now),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_missing_subject() {
        #[derive(Serialize)]
        struct BareClaims {
            exp: i64,
            iat: i64,
        }

        let codec = codec_with_ttl(Duration::minutes(30));
        let now = Utc::now();

        // Signed with the right key but carrying no subject
        let bare = BareClaims {
            exp: (now + Duration::minutes(30)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &bare,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode token");

        assert_eq!(
            codec.validate(&token, now),
            Err(TokenError::MissingSubject)
        );
    }

    #[test]
    fn test_rejects_non_hmac_algorithm() {
        let result = TokenCodec::new(SECRET, Algorithm::RS256, Duration::minutes(30));
        assert!(matches!(
            result,
            Err(TokenError::UnsupportedAlgorithm(_))
        ));
    }
}
