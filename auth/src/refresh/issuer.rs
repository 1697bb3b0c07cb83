use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RefreshTokenError;

/// Opaque refresh token secret with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub secret: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether the token has expired relative to `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Generates random refresh token secrets.
pub struct RefreshTokenIssuer {
    lifetime: Duration,
}

impl RefreshTokenIssuer {
    /// Number of random bytes behind each secret.
    pub const SECRET_LENGTH: usize = 32;

    /// Create an issuer whose tokens live for `lifetime_days` days.
    pub fn new(lifetime_days: i64) -> Self {
        Self {
            lifetime: Duration::days(lifetime_days),
        }
    }

    /// Generate a fresh refresh token.
    ///
    /// Draws 32 bytes from the OS random source and encodes them as base64.
    ///
    /// # Errors
    /// * `RandomSource` - The OS random source failed
    pub fn generate(&self) -> Result<RefreshToken, RefreshTokenError> {
        let mut bytes = [0u8; Self::SECRET_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RefreshTokenError::RandomSource(e.to_string()))?;

        Ok(RefreshToken {
            secret: STANDARD.encode(bytes),
            expires_at: Utc::now() + self.lifetime,
        })
    }
}
