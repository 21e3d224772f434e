use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Credential verification and token-based identity resolution.
///
/// `login` turns an email and password into a signed bearer token; `resolve`
/// turns a presented token back into the user it was issued for. Both are
/// read-only against the repository and keep no state between calls.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create an auth service over a user repository and a configured codec.
    pub fn new(repository: Arc<UR>, token_codec: TokenCodec) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Verify credentials and issue a bearer token for the account.
    ///
    /// An unknown email and a wrong password both fail with
    /// `InvalidCredentials`; callers cannot tell which emails exist.
    ///
    /// # Errors
    /// * `InvalidCredentials` - no such account, or password mismatch
    /// * `Database` - repository lookup failed
    /// * `Token` - token issuance failed
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .token_codec
            .issue(&user.id.to_string(), Utc::now())?;

        Ok(token)
    }

    /// Validate a presented token and load the user it names.
    ///
    /// # Errors
    /// * `Token` - expired, tampered, malformed, or subject-less token
    /// * `UnknownSubject` - valid token whose user no longer exists
    /// * `Database` - repository lookup failed
    pub async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        let subject = self.token_codec.validate(token, Utc::now())?;

        // A subject that cannot name a user id is a payload defect
        let user_id = UserId::from_string(&subject)
            .map_err(|_| AuthError::Token(auth::TokenError::Malformed))?;

        self.repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?
            .ok_or(AuthError::UnknownSubject(subject))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenError;
    use chrono::Duration;
    use chrono::Utc;
    use jsonwebtoken::Algorithm;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, email: &str, password_hash: &str) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Algorithm::HS256, Duration::minutes(30))
            .expect("Failed to create codec")
    }

    fn stored_user(id: i64, email: &str, password: &str) -> User {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");
        User {
            id: UserId(id),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: hash,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_for_subject() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(42, "a@x.com", "secret");
        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), codec());

        let token = service.login("a@x.com", "secret").await.unwrap();

        // The token names the account it was issued for
        let subject = codec().validate(&token, Utc::now()).unwrap();
        assert_eq!(subject, "42");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), codec());

        let result = service.login("nobody@x.com", "secret").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_indistinguishable() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(42, "a@x.com", "secret");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), codec());

        // Same variant as the unknown-email case
        let result = service.login("a@x.com", "wrong").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_then_resolve_roundtrip() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(42, "a@x.com", "secret");
        let found = user.clone();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(42))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let service = AuthService::new(Arc::new(repository), codec());

        let token = service.login("a@x.com", "secret").await.unwrap();
        let resolved = service.resolve(&token).await.unwrap();

        assert_eq!(resolved.id, UserId(42));
        assert_eq!(resolved.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_resolve_deleted_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), codec());

        let token = codec().issue("42", Utc::now()).unwrap();
        let result = service.resolve(&token).await;
        assert!(matches!(result.unwrap_err(), AuthError::UnknownSubject(_)));
    }

    #[tokio::test]
    async fn test_resolve_expired_token() {
        let repository = MockTestUserRepository::new();

        let zero_ttl = TokenCodec::new(SECRET, Algorithm::HS256, Duration::zero())
            .expect("Failed to create codec");
        let token = zero_ttl
            .issue("42", Utc::now() - Duration::seconds(1))
            .unwrap();

        let service = AuthService::new(Arc::new(repository), zero_ttl);

        let result = service.resolve(&token).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::Token(TokenError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_resolve_garbage_token() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let result = service.resolve("not-a-token").await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::Token(TokenError::Malformed)
        ));
    }

    #[tokio::test]
    async fn test_resolve_token_from_other_key() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let other = TokenCodec::new(
            b"another_secret_key_32_bytes_long!!",
            Algorithm::HS256,
            Duration::minutes(30),
        )
        .unwrap();
        let token = other.issue("42", Utc::now()).unwrap();

        let result = service.resolve(&token).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::Token(TokenError::InvalidSignature)
        ));
    }

    #[tokio::test]
    async fn test_resolve_non_numeric_subject() {
        let repository = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repository), codec());

        let token = codec().issue("not-a-number", Utc::now()).unwrap();

        let result = service.resolve(&token).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::Token(TokenError::Malformed)
        ));
    }
}
