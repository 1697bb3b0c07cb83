use std::collections::HashMap;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordDigest;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshToken;
use crate::refresh::RefreshTokenError;
use crate::refresh::RefreshTokenIssuer;

/// Authentication coordinator combining password verification, access token
/// issuance and refresh token generation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    refresh_issuer: RefreshTokenIssuer,
    access_token_lifetime: Duration,
}

/// Freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Refresh token to store on the user record
    pub refresh_token: RefreshToken,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),
}

impl Authenticator {
    pub const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 15;
    pub const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 7;

    /// Create a new authenticator.
    ///
    /// Access tokens last 15 minutes and refresh tokens 7 days until
    /// overridden.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(jwt_secret),
            refresh_issuer: RefreshTokenIssuer::new(Self::DEFAULT_REFRESH_TOKEN_DAYS),
            access_token_lifetime: Duration::minutes(Self::DEFAULT_ACCESS_TOKEN_MINUTES),
        }
    }

    /// Stamp issued access tokens with an issuer and audience.
    pub fn with_issuer_and_audience(mut self, issuer: &str, audience: &str) -> Self {
        self.token_codec = self
            .token_codec
            .with_issuer(issuer)
            .with_audience(audience);
        self
    }

    pub fn with_access_token_minutes(mut self, minutes: i64) -> Self {
        self.access_token_lifetime = Duration::minutes(minutes);
        self
    }

    pub fn with_refresh_token_days(mut self, days: i64) -> Self {
        self.refresh_issuer = RefreshTokenIssuer::new(days);
        self
    }

    /// Underlying token codec, for claim inspection.
    pub fn codec(&self) -> &TokenCodec {
        &self.token_codec
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password is blank or no salt could be generated
    pub fn hash_password(&self, password: &str) -> Result<PasswordDigest, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a new token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `digest` - Stored password hash and salt
    /// * `user_id` - Identifier embedded in the access token
    /// * `email` - Email embedded in the access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Password is blank or the stored digest is malformed
    /// * `Token` - Access token generation failed
    /// * `RefreshToken` - Refresh token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        digest: &PasswordDigest,
        user_id: i64,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self
            .password_hasher
            .verify(password, &digest.hash, &digest.salt)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        self.issue_tokens(user_id, email)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used right after registration, when the password was just set.
    pub fn issue_tokens(
        &self,
        user_id: i64,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let refresh_token = self.refresh_issuer.generate()?;
        let access_token = self.generate_token(user_id, email, &HashMap::new())?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Generate an access token with the configured lifetime.
    pub fn generate_token(
        &self,
        user_id: i64,
        email: &str,
        extra_claims: &HashMap<String, String>,
    ) -> Result<String, TokenError> {
        self.token_codec
            .issue(user_id, email, extra_claims, self.access_token_lifetime)
    }

    /// Generate a new refresh token.
    pub fn generate_refresh_token(&self) -> Result<RefreshToken, RefreshTokenError> {
        self.refresh_issuer.generate()
    }

    /// Validate a token's signature and, unless ignored, its lifetime.
    pub fn validate_token(
        &self,
        token: &str,
        ignore_expiration: bool,
    ) -> Result<Claims, TokenError> {
        self.token_codec.validate(token, ignore_expiration)
    }

    /// Re-issue an access token carrying the identity of an older one.
    ///
    /// `id`, `email` and custom claims are read from `token` without a
    /// signature check; validate it first.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or its `id` claim is not an integer
    pub fn refresh_access_token(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.token_codec.parse(token)?;
        let user_id = claims.user_id().ok_or(TokenError::InvalidToken)?;

        self.generate_token(user_id, &claims.email, &claims.custom())
    }
}
