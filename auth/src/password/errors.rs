use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error; only hashing and configuration do.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Unsupported password hashing scheme: {0}")]
    UnsupportedScheme(String),

    #[error("bcrypt cost must be between {min} and {max}, got {actual}")]
    InvalidCost { min: u32, max: u32, actual: u32 },
}
