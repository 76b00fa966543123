//! Password hashing and verification.
//!
//! One-way Argon2id transform with a per-call random salt embedded in the
//! PHC output string. Verification parses the stored string and recomputes;
//! the comparison inside the argon2 crate is constant-time.

use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use rand::rngs::OsRng;

use crate::errors::{Error, Result};

pub fn password_hasher() -> Argon2<'static> {
    // Tuned for interactive API calls: Argon2id with moderate memory and a single iteration
    // keeps verification under 10ms on development hardware while retaining side-channel
    // protections.
    const MEMORY_COST_KIB: u32 = 768;
    const ITERATIONS: u32 = 1;
    const PARALLELISM: u32 = 1;
    let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, Some(32))
        .expect("valid Argon2 parameters");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// Hash a plaintext password into a PHC-format string.
pub fn hash_password(plaintext: &str) -> Result<String> {
    if plaintext.is_empty() {
        return Err(Error::validation("password cannot be empty"));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = password_hasher()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|err| Error::internal(format!("failed to hash password: {}", err)))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash string.
///
/// A structurally invalid stored hash is an error rather than a mismatch.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|err| Error::internal(format!("invalid stored password hash: {}", err)))?;

    Ok(password_hasher().verify_password(plaintext.as_bytes(), &parsed).is_ok())
}
