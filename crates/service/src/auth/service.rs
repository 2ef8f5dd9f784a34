use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};
use validator::{Validate, ValidationErrors};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_duration_secs: u64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.secret.clone(), token_duration_secs: c.token_duration_secs }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

/// First failing rule, checking fields in the order a form shows them.
fn first_violation(errors: &ValidationErrors, fields: &[&str]) -> String {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|f| by_field.get(*f))
        .flat_map(|list| list.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_duration_secs: 60 });
    /// let input = RegisterInput { first_name: "Ada".into(), last_name: "Byron".into(), email: "Ada@Example.com".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "ada@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        let input = RegisterInput { email: input.email.trim().to_lowercase(), ..input };
        input
            .validate()
            .map_err(|e| AuthError::Validation(first_violation(&e, &["email", "password"])))?;
        let email = input.email.as_str();
        if let Some(existing) = self.repo.find_user_by_email(email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self
            .repo
            .create_user(input.first_name.trim(), input.last_name.trim(), email, &hash)
            .await?;
        info!(user_id = user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { jwt_secret: "secret".into(), token_duration_secs: 60 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { first_name: "U".into(), last_name: "E".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// let user = tokio_test::block_on(svc.verify_token(&session.token)).unwrap();
    /// assert_eq!(user.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email.trim().to_lowercase())
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo.get_credentials(user.id).await?.ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let token = self.issue_token(user.id)?;
        info!(user_id = user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    pub fn issue_token(&self, user_id: i32) -> Result<String, AuthError> {
        let lifetime = chrono::Duration::seconds(self.cfg.token_duration_secs as i64);
        let exp = (chrono::Utc::now() + lifetime).timestamp() as usize;
        let claims = Claims { sub: user_id, exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Resolve a token to its active user.
    pub async fn verify_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::InvalidToken
        })?;
        self.repo.find_user_by_id(data.claims.sub).await?.ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc(secret: &str) -> AuthService<MockAuthRepository> {
        AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: secret.into(), token_duration_secs: 60 },
        )
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput { first_name: "Grace".into(), last_name: "Hopper".into(), email: email.into(), password: password.into() }
    }

    #[test]
    fn register_input_rules() {
        assert!(input("a.b+c@mail.example.org", "longenough").validate().is_ok());
        for bad in ["no-at-sign", "@example.com", "two@@example.com"] {
            let errs = input(bad, "longenough").validate().unwrap_err();
            assert_eq!(first_violation(&errs, &["email", "password"]), "Invalid email");
        }
        let errs = input("g@h.io", "short").validate().unwrap_err();
        assert_eq!(first_violation(&errs, &["email", "password"]), "Password must be at least 8 characters");
        let errs = input("bad", "short").validate().unwrap_err();
        assert_eq!(first_violation(&errs, &["email", "password"]), "Invalid email");
    }

    #[tokio::test]
    async fn register_validates_and_rejects_duplicates() {
        let svc = svc("s");
        assert!(matches!(svc.register(input("bad", "longenough")).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.register(input("g@h.io", "short")).await, Err(AuthError::Validation(_))));
        svc.register(input("g@h.io", "longenough")).await.unwrap();
        assert!(matches!(svc.register(input("G@H.io", "longenough")).await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = svc("s");
        svc.register(input("g@h.io", "longenough")).await.unwrap();
        let res = svc.login(LoginInput { email: "g@h.io".into(), password: "nottheone".into() }).await;
        assert!(matches!(res, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn token_from_another_secret_is_rejected() {
        let issuer = svc("one");
        let verifier = svc("two");
        issuer.register(input("g@h.io", "longenough")).await.unwrap();
        verifier.register(input("g@h.io", "longenough")).await.unwrap();
        let token = issuer.issue_token(1).unwrap();
        assert!(issuer.verify_token(&token).await.is_ok());
        assert!(matches!(verifier.verify_token(&token).await, Err(AuthError::InvalidToken)));
        assert!(matches!(issuer.verify_token("garbage").await, Err(AuthError::InvalidToken)));
    }
}
