use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::scheme::HashScheme;

/// Longest password prefix, in bytes, that takes part in hashing.
///
/// bcrypt ignores everything past this point. The same cut is applied to
/// every scheme and to both hashing and verification.
pub const MAX_PASSWORD_BYTES: usize = 72;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Cut a plaintext password down to its first [`MAX_PASSWORD_BYTES`] bytes.
///
/// The cut is made on raw UTF-8 bytes and may split a multi-byte character.
pub fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

/// Salted one-way password hashing.
///
/// New digests are produced with the configured scheme. Verification reads
/// the scheme from the stored digest, so digests of either family verify.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    scheme: HashScheme,
    bcrypt_cost: u32,
}

impl PasswordHasher {
    /// Create a password hasher producing bcrypt digests at the default cost.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            scheme: HashScheme::Bcrypt,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Select the scheme used for new digests.
    pub fn with_scheme(mut self, scheme: HashScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the bcrypt work factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost outside the range bcrypt accepts
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost {
                min: MIN_BCRYPT_COST,
                max: MAX_BCRYPT_COST,
                actual: cost,
            });
        }
        self.bcrypt_cost = cost;
        Ok(self)
    }

    /// Scheme used for new digests.
    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Self-describing digest (algorithm, parameters, salt and hash in one string)
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or the hashing primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = truncate(password);

        match self.scheme {
            HashScheme::Bcrypt => bcrypt::hash(password, self.bcrypt_cost)
                .map_err(|e| PasswordError::HashingFailed(e.to_string())),
            HashScheme::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password, &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a password against a stored digest.
    ///
    /// Malformed digests, unknown algorithm identifiers and internal decoding
    /// errors all report `false`, indistinguishable from a wrong password.
    ///
    /// # Arguments
    /// * `password` - Candidate plaintext password
    /// * `digest` - Digest previously produced by [`PasswordHasher::hash`]
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let password = truncate(password);

        match HashScheme::detect(digest) {
            Some(HashScheme::Bcrypt) => bcrypt::verify(password, digest).unwrap_or(false),
            Some(HashScheme::Argon2id) => PasswordHash::new(digest)
                .map(|parsed| Argon2::default().verify_password(password, &parsed).is_ok())
                .unwrap_or(false),
            None => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
