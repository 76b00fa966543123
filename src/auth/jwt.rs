//! JWT issuance and validation for bearer authentication.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::AuthConfig;
use crate::errors::{AuthErrorType, Error, Result};

/// Tolerance applied to expiry checks to absorb clock skew between the
/// issuing and validating host. Five seconds keeps the expiry boundary tight
/// while surviving ordinary NTP drift.
const EXPIRY_LEEWAY_SECS: u64 = 5;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (the user's email)
    pub sub: String,
    /// Expiration time (unix seconds)
    pub exp: usize,
    /// Issued at time (unix seconds)
    pub iat: usize,
}

/// Issues and validates signed, time-limited bearer tokens.
///
/// The signing keys are derived once from the process-wide secret and shared
/// read-only for the process lifetime.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service with the given secret and token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = EXPIRY_LEEWAY_SECS;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Build the service from the process auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.token_expiry())
    }

    /// Issue a signed token for the given subject, expiring after the
    /// configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String> {
        let now = unix_now()?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: now + self.ttl.as_secs() as usize,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| Error::internal(format!("failed to sign token: {}", err)))
    }

    /// Validate a token and return its subject.
    ///
    /// The signature is verified before any claim is inspected, then expiry
    /// is checked. Every failure mode collapses to the same
    /// `InvalidCredentials` error so callers cannot distinguish a bad
    /// signature from an expired or malformed token.
    pub fn validate(&self, token: &str) -> Result<String> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| {
                tracing::debug!(error = %err, "bearer token rejected");
                invalid_credentials()
            })
    }
}

fn unix_now() -> Result<usize> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .map_err(|err| Error::internal(format!("system clock before unix epoch: {}", err)))
}

fn invalid_credentials() -> Error {
    Error::auth("Could not validate credentials", AuthErrorType::InvalidCredentials)
}
