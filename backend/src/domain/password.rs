//! Password primitives: plain-text secrets and their salted Argon2id hashes.
//!
//! Plain passwords live in [`Password`], which zeroises its buffer on drop.
//! Only [`PasswordHash`] values (PHC strings) ever reach a repository.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

/// Plain-text password supplied by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a caller-provided password.
    ///
    /// Whitespace is preserved; emptiness is checked by the form validators.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the password text.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Salted password hash in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a stored PHC string, checking that it parses.
    pub fn from_phc(raw: impl Into<String>) -> Result<Self, PasswordHashError> {
        let raw = raw.into();
        PhcString::new(&raw).map_err(|err| PasswordHashError::Malformed(err.to_string()))?;
        Ok(Self(raw))
    }

    /// Borrow the PHC string for persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Errors raised while hashing or parsing password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The Argon2 parameter set was rejected.
    #[error("invalid Argon2 parameters: {0}")]
    InvalidParams(String),
    /// Hashing itself failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
    /// A stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
}

/// Argon2id hasher used for registration and login.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Build a hasher with explicit cost parameters (memory in KiB,
    /// iterations, lanes). Useful for tests and constrained hosts.
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::InvalidParams(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hashing(err.to_string()))?;
        Ok(PasswordHash(hash.to_string()))
    }

    /// Check `password` against a stored hash.
    ///
    /// A malformed stored hash never verifies.
    #[must_use]
    pub fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        match PhcString::new(hash.as_str()) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.expose().as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored password hash failed to parse");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> PasswordHasher {
        PasswordHasher::with_costs(8, 1, 1).expect("cheap params are valid")
    }

    #[rstest]
    fn hash_verifies_matching_password(hasher: PasswordHasher) {
        let password = Password::new("1234");
        let hash = hasher.hash(&password).expect("hash password");
        assert!(hasher.verify(&password, &hash));
        assert!(!hasher.verify(&Password::new("4321"), &hash));
    }

    #[rstest]
    fn hashing_salts_each_password(hasher: PasswordHasher) {
        let password = Password::new("same secret");
        let first = hasher.hash(&password).expect("first hash");
        let second = hasher.hash(&password).expect("second hash");
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("$argon2id$"));
    }

    #[rstest]
    fn malformed_hash_never_verifies(hasher: PasswordHasher) {
        let bogus = PasswordHash("not-a-phc-string".to_owned());
        assert!(!hasher.verify(&Password::new("anything"), &bogus));
    }

    #[rstest]
    fn from_phc_rejects_garbage() {
        assert!(matches!(
            PasswordHash::from_phc("plain"),
            Err(PasswordHashError::Malformed(_))
        ));
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", Password::new("hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
