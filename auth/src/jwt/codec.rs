use std::collections::HashMap;

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

use super::claims::is_reserved;
use super::claims::Claims;
use super::claims::EMAIL_CLAIM;
use super::claims::ID_CLAIM;
use super::errors::TokenError;

/// Access token codec.
///
/// Issues HS256-signed JWTs carrying `email`, `id` and caller supplied claims,
/// and reads them back. Issuer and audience are stamped on every token but
/// never validated.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: Option<String>,
    audience: Option<String>,
}

impl TokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: None,
            audience: None,
        }
    }

    /// Set the issuer written into issued tokens.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }

    /// Set the audience written into issued tokens.
    pub fn with_audience(mut self, audience: impl ToString) -> Self {
        self.audience = Some(audience.to_string());
        self
    }

    /// Issue a signed access token.
    ///
    /// # Arguments
    /// * `user_id` - User identifier, stored stringified in the `id` claim
    /// * `email` - User email, stored in the `email` claim
    /// * `extra_claims` - Additional string claims
    /// * `expiry` - Lifetime of the token starting now
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `ReservedClaim` - An extra claim uses a name managed by the codec
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        extra_claims: &HashMap<String, String>,
        expiry: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();

        let mut claims = Claims::for_user(user_id, email)
            .with_issued_at(now.timestamp())
            .with_expiration((now + expiry).timestamp());

        if let Some(issuer) = &self.issuer {
            claims = claims.with_issuer(issuer);
        }
        if let Some(audience) = &self.audience {
            claims = claims.with_audience(audience);
        }

        for (name, value) in extra_claims {
            if is_reserved(name) {
                return Err(TokenError::ReservedClaim(name.clone()));
            }
            claims = claims.with_extra(name, value);
        }

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Read the claims of a token without checking its signature or lifetime.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is not a well-formed JWT
    ///
    /// # Security Warning
    /// Never trust claims from this method for authorization decisions
    /// without calling [`TokenCodec::validate`] first.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidToken)
    }

    /// Validate a token's signature and, unless ignored, its lifetime.
    ///
    /// The signature is always checked with the full key. With
    /// `ignore_expiration` set, a correctly signed token whose `exp` has
    /// passed is accepted.
    ///
    /// # Returns
    /// The validated claims
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or its signature is invalid
    /// * `TokenExpired` - Token lifetime has passed and `ignore_expiration` is false
    pub fn validate(&self, token: &str, ignore_expiration: bool) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = !ignore_expiration;
        validation.validate_aud = false;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })
    }

    /// Look up a single claim by name.
    pub fn get_claim(&self, token: &str, name: &str) -> Result<Option<String>, TokenError> {
        Ok(self.parse(token)?.to_map().remove(name))
    }

    /// Claims of the token restricted to the given names.
    pub fn get_claims(
        &self,
        token: &str,
        names: &[&str],
    ) -> Result<HashMap<String, String>, TokenError> {
        let mut claims = self.parse(token)?.to_map();
        claims.retain(|name, _| names.contains(&name.as_str()));
        Ok(claims)
    }

    /// User identifier from the `id` claim; `None` if it is not an integer.
    pub fn get_user_id(&self, token: &str) -> Result<Option<i64>, TokenError> {
        Ok(self.parse(token)?.user_id())
    }

    /// Email from the `email` claim.
    pub fn get_email(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.parse(token)?.email)
    }

    /// All claims except `id` and `email`.
    pub fn get_extra_claims(&self, token: &str) -> Result<HashMap<String, String>, TokenError> {
        let mut claims = self.parse(token)?.to_map();
        claims.remove(ID_CLAIM);
        claims.remove(EMAIL_CLAIM);
        Ok(claims)
    }
}
