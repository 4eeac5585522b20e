use std::fmt;
use std::str::FromStr;

use super::errors::PasswordError;

/// Password hashing algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// bcrypt, `$2b$` modular crypt format
    Bcrypt,
    /// Argon2id, PHC string format
    Argon2id,
}

impl HashScheme {
    /// Identify the scheme that produced a stored digest.
    ///
    /// # Arguments
    /// * `digest` - Stored password digest
    ///
    /// # Returns
    /// The scheme, or None when the algorithm identifier is not recognised
    pub fn detect(digest: &str) -> Option<Self> {
        const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

        if BCRYPT_PREFIXES.iter().any(|p| digest.starts_with(p)) {
            Some(HashScheme::Bcrypt)
        } else if digest.starts_with("$argon2") {
            Some(HashScheme::Argon2id)
        } else {
            None
        }
    }
}

impl FromStr for HashScheme {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(HashScheme::Bcrypt),
            "argon2" | "argon2id" => Ok(HashScheme::Argon2id),
            other => Err(PasswordError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashScheme::Bcrypt => write!(f, "bcrypt"),
            HashScheme::Argon2id => write!(f, "argon2id"),
        }
    }
}
