//! Password value object - Domain layer password handling.
//!
//! New hashes are always Argon2id in PHC string form, so the algorithm,
//! parameters and salt travel with the digest. Bcrypt strings written by the
//! earlier program are still accepted for verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{DomainError, DomainResult};

/// Argon2 cost parameters used when hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Smallest cost Argon2 accepts. Only meant for tests.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn argon2(&self) -> DomainResult<Argon2<'static>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| DomainError::InvalidCost(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Password value object that handles hashing and verification.
///
/// Holds only the encoded hash; the plaintext is never retained.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash the plain text with the default Argon2 cost.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::with_cost(plain_text, &HashCost::default())
    }

    /// Hash the plain text with an explicit cost.
    ///
    /// Every call draws a fresh salt, so hashing the same plain text twice
    /// yields two different strings that both verify.
    ///
    /// # Errors
    /// Returns `InvalidCost` if the cost parameters are out of range.
    pub fn with_cost(plain_text: &str, cost: &HashCost) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = cost
            .argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::Hashing(e.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing encoded hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Unknown or corrupt hash formats never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    /// Check if the stored hash is in a format this type can verify.
    pub fn is_recognized(&self) -> bool {
        Self::is_bcrypt(&self.hash) || PasswordHash::new(&self.hash).is_ok()
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        if Self::is_bcrypt(hash) {
            return bcrypt::verify(plain_text, hash)
                .map_err(|e| DomainError::UnrecognizedHash(e.to_string()));
        }

        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::UnrecognizedHash(e.to_string()))?;
        // Parameters come from the parsed hash, not from this instance.
        Ok(Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    fn is_bcrypt(hash: &str) -> bool {
        ["$2a$", "$2b$", "$2y$"].iter().any(|p| hash.starts_with(p))
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(plain: &str) -> Password {
        Password::with_cost(plain, &HashCost::minimal()).unwrap()
    }

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = hash(plain);

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash_str = hash(plain).as_str().to_string();

        let restored = Password::from_hash(hash_str);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_hash_is_self_describing() {
        let password = hash("pw1");
        assert!(password.as_str().starts_with("$argon2id$v=19$"));
        assert!(password.is_recognized());
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = hash(plain);
        let pass2 = hash(plain);

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        // But both verify correctly
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_short_passwords_are_hashed() {
        let password = hash("pw1");
        assert!(password.verify("pw1"));
    }

    #[test]
    fn test_verification_is_case_sensitive() {
        let password = hash("CaseSensitive1");
        assert!(!password.verify("casesensitive1"));
    }

    #[test]
    fn test_legacy_bcrypt_hash_verifies() {
        let legacy = bcrypt::hash("pw1", 4).unwrap();
        let password = Password::from_hash(legacy);

        assert!(password.is_recognized());
        assert!(password.verify("pw1"));
        assert!(!password.verify("wrong"));
    }

    #[test]
    fn test_unsalted_digest_never_verifies() {
        // Shaped like the hex digests the unsalted variant stored
        let digest = "b2a3bf8e7c4c0e3c9e4dd2d04c3b9b5e7e2ab4b8d0f1a2c3d4e5f60718293a4b";
        let password = Password::from_hash(digest);

        assert!(!password.is_recognized());
        assert!(!password.verify("pw1"));
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        let cost = HashCost {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        };
        let result = Password::with_cost("pw1", &cost);
        assert!(matches!(result, Err(DomainError::InvalidCost(_))));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = hash("pw1");
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2"));
    }
}
